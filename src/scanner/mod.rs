//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Recursive, ordered directory walking using walkdir
//! - 128-bit content fingerprints with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Content fingerprinting (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupclean::progress::LogReporter;
//! use dupclean::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! match walker.walk(&LogReporter) {
//!     Ok(files) => {
//!         for file in &files {
//!             println!("{}: {} bytes", file.path.display(), file.size);
//!         }
//!     }
//!     Err(e) => eprintln!("Scan failed: {}", e),
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// Re-export main types
pub use hasher::{fingerprint, fingerprint_bytes, Fingerprint, FINGERPRINT_LEN};
pub use walker::Walker;

/// Metadata for a discovered regular file.
///
/// Captured once at enumeration time. The metadata is informational only;
/// duplicate decisions are made on content fingerprints alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Root-joined path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Permission bits (`st_mode & 0o7777` on Unix)
    pub mode: u32,
    /// Position in enumeration order (0 unless produced by a walk)
    pub index: usize,
}

impl FileEntry {
    /// Create a new FileEntry with default permission bits.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            mode: 0o644,
            index: 0,
        }
    }

    /// Set the position in enumeration order.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Build an entry from filesystem metadata.
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        Self {
            path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode: permission_bits(metadata),
            index: 0,
        }
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Ordered list of discovered files, in enumeration order.
pub type FileList = Vec<FileEntry>;

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// A followed link that points back to an ancestor aborts the walk.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Enable/disable symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Errors that abort directory enumeration.
///
/// Any of these is fatal to a run: no file list is produced.
#[derive(thiserror::Error, Debug)]
pub enum EnumerationError {
    /// The root or a directory below it does not exist.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission was denied when listing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A followed symlink points back to one of its ancestors.
    #[error("Symlink loop at {path} (points to ancestor {ancestor})")]
    SymlinkLoop {
        /// Path of the looping link
        path: PathBuf,
        /// Ancestor directory the link resolves to
        ancestor: PathBuf,
    },

    /// Any other I/O error while reading a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl EnumerationError {
    /// Classify an I/O error by kind.
    #[must_use]
    pub fn from_io(path: PathBuf, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::NotADirectory(p) | Self::PermissionDenied(p) => p,
            Self::SymlinkLoop { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur while reading a file for fingerprinting.
///
/// These are per-file: the file is left out of classification and the
/// run continues.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file was not found (e.g. removed after enumeration).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// Classify an I/O error by kind.
    #[must_use]
    pub fn from_io(path: PathBuf, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
