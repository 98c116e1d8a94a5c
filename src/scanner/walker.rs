//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating every regular
//! file below a root directory. The walk is depth-first and sequential, and
//! its order is fixed: each directory's entries are visited in name order,
//! and a subdirectory is walked completely at its position in that order
//! before the next entry is looked at.
//!
//! Duplicate classification keeps the first file it sees, so this order is
//! what decides which copy survives.
//!
//! Any directory that cannot be read aborts the whole walk. A partial file
//! list would silently change which copies count as duplicates. Entries
//! that vanish while being listed (including links whose target is gone)
//! are skipped with a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{EnumerationError, FileEntry, FileList, WalkerConfig};
use crate::progress::{Phase, ScanReporter};

/// Directory walker for ordered file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupclean::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree and collect every regular file.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the root is missing, is not a
    /// directory, or if any directory in the tree cannot be read.
    pub fn walk(&self, reporter: &dyn ScanReporter) -> Result<FileList, EnumerationError> {
        self.check_root()?;

        reporter.on_phase_start(Phase::Walking, 0);

        let mut files = FileList::new();
        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for result in walk_dir {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if is_vanished(&e) => {
                    log::warn!(
                        "Skipping vanished entry: {}",
                        e.path().unwrap_or(self.root.as_path()).display()
                    );
                    continue;
                }
                Err(e) => return Err(self.convert_error(e)),
            };
            let file_type = entry.file_type();

            if file_type.is_dir() {
                reporter.on_directory(entry.path());
                continue;
            }

            if !file_type.is_file() {
                log::trace!("Skipping non-regular file: {}", entry.path().display());
                continue;
            }

            let Some(file) = stat_entry(entry) else {
                continue;
            };
            let file = file.with_index(files.len());
            reporter.on_file_found(&file);
            files.push(file);
        }

        reporter.on_phase_end(Phase::Walking);
        log::debug!("Walk of {} found {} files", self.root.display(), files.len());

        Ok(files)
    }

    /// Verify the root exists and is a directory before walking.
    fn check_root(&self) -> Result<(), EnumerationError> {
        // The root itself is always resolved, even when links are not followed.
        let metadata = fs::metadata(&self.root)
            .map_err(|e| EnumerationError::from_io(self.root.clone(), e))?;

        if !metadata.is_dir() {
            return Err(EnumerationError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    /// Convert a walkdir error into an [`EnumerationError`].
    fn convert_error(&self, error: walkdir::Error) -> EnumerationError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            let ancestor = ancestor.to_path_buf();
            log::error!(
                "Symlink loop: {} points to ancestor {}",
                path.display(),
                ancestor.display()
            );
            return EnumerationError::SymlinkLoop { path, ancestor };
        }

        log::error!("Error reading {}: {}", path.display(), error);
        let source = error
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("directory walk failed"));
        EnumerationError::from_io(path, source)
    }
}

/// A non-loop error for an entry that no longer exists below the root.
fn is_vanished(error: &walkdir::Error) -> bool {
    error.depth() > 0
        && error.loop_ancestor().is_none()
        && error
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

/// Stat a regular file found by the walk.
///
/// Returns `None` if the file cannot be stat'ed, typically because it was
/// removed between listing and stat.
fn stat_entry(entry: DirEntry) -> Option<FileEntry> {
    match entry.metadata() {
        Ok(metadata) => Some(FileEntry::from_metadata(entry.into_path(), &metadata)),
        Err(e) => {
            log::warn!("Skipping {}: {}", entry.path().display(), e);
            None
        }
    }
}
