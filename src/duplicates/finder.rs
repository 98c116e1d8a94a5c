//! Scan pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the three phases of a cleanup in order:
//! 1. **Walking**: enumerate every regular file below the root
//! 2. **Hashing**: fingerprint and classify, first occurrence wins
//! 3. **Deleting**: remove duplicates concurrently, only when confirmed
//!
//! An enumeration error aborts the run before anything is classified or
//! deleted. Per-file errors in later phases are collected in the
//! [`ScanReport`].
//!
//! # Example
//!
//! ```no_run
//! use dupclean::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let report = finder.run(Path::new("."), false).unwrap();
//! println!("{} duplicates", report.duplicate_count());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::classifier::{classify, Classification};
use crate::actions::delete::{delete_all, DeleteConfig, DeletionReport};
use crate::progress::{LogReporter, ScanReporter};
use crate::scanner::{EnumerationError, Walker, WalkerConfig};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Directory walking options
    pub walker: WalkerConfig,
    /// Deletion options
    pub delete: DeleteConfig,
}

impl FinderConfig {
    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.walker = self.walker.with_follow_symlinks(follow);
        self
    }

    /// Set the number of deletion workers (0 = one per CPU).
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.delete = self.delete.with_threads(threads);
        self
    }
}

/// Everything a run found and did.
#[derive(Debug)]
pub struct ScanReport {
    /// Root directory that was scanned
    pub root: PathBuf,
    /// Regular files found by the walk
    pub total_files: usize,
    /// Unique, duplicate and unreadable files
    pub classification: Classification,
    /// Deletion results (empty when not confirmed)
    pub deletion: DeletionReport,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl ScanReport {
    /// Number of unique files.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.classification.unique.len()
    }

    /// Number of duplicate files.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.classification.duplicates.len()
    }

    /// Number of files that could not be fingerprinted.
    #[must_use]
    pub fn read_error_count(&self) -> usize {
        self.classification.read_errors.len()
    }

    /// Whether any per-file error occurred (read or deletion).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.read_error_count() > 0 || self.deletion.failed_count() > 0
    }
}

/// Runs walk, classification and deletion against one root.
pub struct DuplicateFinder {
    config: FinderConfig,
    reporter: Arc<dyn ScanReporter>,
}

impl DuplicateFinder {
    /// Create a finder that reports through a [`LogReporter`].
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(LogReporter),
        }
    }

    /// Replace the event reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ScanReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Pipeline configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan `root` and, if `confirmed`, delete every duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the directory tree cannot be fully
    /// enumerated. No file is classified or deleted in that case.
    pub fn run(&self, root: &Path, confirmed: bool) -> Result<ScanReport, EnumerationError> {
        let start = Instant::now();
        let reporter = self.reporter.as_ref();

        log::info!("Scanning {}", root.display());
        let files = Walker::new(root, self.config.walker.clone()).walk(reporter)?;
        let total_files = files.len();
        log::info!("Files found: {}", total_files);

        let classification = classify(files, reporter);
        let deletion = delete_all(
            &classification.duplicates,
            confirmed,
            &self.config.delete,
            reporter,
        );

        let report = ScanReport {
            root: root.to_path_buf(),
            total_files,
            classification,
            deletion,
            duration: start.elapsed(),
        };

        log::info!(
            "Scan complete: {} files, {} unique, {} duplicates, {} unreadable in {:?}",
            report.total_files,
            report.unique_count(),
            report.duplicate_count(),
            report.read_error_count(),
            report.duration
        );

        Ok(report)
    }
}

impl std::fmt::Debug for DuplicateFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicateFinder")
            .field("config", &self.config)
            .field("reporter", &"<reporter>")
            .finish()
    }
}
