//! Concurrent permanent deletion of duplicate files.
//!
//! # Overview
//!
//! [`delete_all`] removes every duplicate found by the classifier. Each
//! removal is an independent task on a bounded rayon pool; a failure is
//! recorded against its own file and never stops the others. The call
//! returns only after every task has finished, with one outcome per
//! duplicate in input order.
//!
//! Nothing is touched unless the caller passes `confirmed = true`.
//!
//! # Example
//!
//! ```no_run
//! use dupclean::actions::delete::{delete_all, DeleteConfig};
//! use dupclean::progress::LogReporter;
//!
//! let report = delete_all(&[], true, &DeleteConfig::default(), &LogReporter);
//! println!("{}", report.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use rayon::prelude::*;
use thiserror::Error;

use crate::duplicates::DuplicateEntry;
use crate::progress::{Phase, ScanReporter};

/// Error type for a single removal.
#[derive(Debug, Error)]
pub enum DeletionError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeletionError {
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

/// Result of one removal task.
#[derive(Debug)]
pub struct DeletionOutcome {
    /// Path that removal was attempted on.
    pub path: PathBuf,
    /// Size recorded at enumeration time.
    pub size: u64,
    /// `Ok` if the file was removed.
    pub result: Result<(), DeletionError>,
}

impl DeletionOutcome {
    /// Whether the file was removed.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of a deletion batch.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Whether deletion was authorized for this run.
    pub confirmed: bool,
    /// One outcome per duplicate, in input order. Empty when not confirmed.
    pub outcomes: Vec<DeletionOutcome>,
}

impl DeletionReport {
    /// Report for a run that was not authorized to delete.
    #[must_use]
    pub fn unconfirmed() -> Self {
        Self::default()
    }

    /// Number of successful removals.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.deleted_count()
    }

    /// Errors of the failed removals, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &DeletionError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    /// Total bytes freed by successful removals.
    #[must_use]
    pub fn bytes_freed(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|o| o.is_deleted())
            .map(|o| o.size)
            .sum()
    }

    /// Check if all removals succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(DeletionOutcome::is_deleted)
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if !self.confirmed {
            return "Deletion not requested".to_string();
        }

        let freed = ByteSize::b(self.bytes_freed());
        if self.all_succeeded() {
            format!("Deleted {} file(s), freed {}", self.deleted_count(), freed)
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.deleted_count(),
                self.failed_count(),
                freed
            )
        }
    }
}

/// Configuration for deletion.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Worker threads for removal (0 = one per CPU).
    pub threads: usize,
}

impl DeleteConfig {
    /// Set the number of worker threads.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Permanently remove one duplicate.
fn remove_one(duplicate: &DuplicateEntry, reporter: &dyn ScanReporter) -> DeletionOutcome {
    let path = &duplicate.file.path;
    let result = fs::remove_file(path).map_err(|e| DeletionError::from_io(path.clone(), e));

    match &result {
        Ok(()) => reporter.on_deleted(&duplicate.file),
        Err(e) => reporter.on_delete_failed(e),
    }

    DeletionOutcome {
        path: path.clone(),
        size: duplicate.file.size,
        result,
    }
}

/// Delete every duplicate concurrently and wait for all of them.
///
/// # Arguments
///
/// * `duplicates` - Files to remove; their paths must be distinct
/// * `confirmed` - Without it, nothing is removed and no outcome is recorded
/// * `config` - Worker pool size
/// * `reporter` - Receives one deleted/failed event per file
///
/// # Returns
///
/// A [`DeletionReport`] whose outcomes line up index-for-index with
/// `duplicates`.
pub fn delete_all(
    duplicates: &[DuplicateEntry],
    confirmed: bool,
    config: &DeleteConfig,
    reporter: &dyn ScanReporter,
) -> DeletionReport {
    if !confirmed {
        log::info!(
            "Deletion not confirmed, keeping {} duplicate(s)",
            duplicates.len()
        );
        return DeletionReport::unconfirmed();
    }

    reporter.on_phase_start(Phase::Deleting, duplicates.len());
    log::info!("Deleting {} duplicate(s)", duplicates.len());

    let remove_batch = || -> Vec<DeletionOutcome> {
        duplicates
            .par_iter()
            .map(|dup| remove_one(dup, reporter))
            .collect()
    };

    let outcomes = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(remove_batch),
        Err(e) => {
            log::warn!(
                "Failed to create deletion thread pool ({}), using global pool with {} threads",
                e,
                rayon::current_num_threads()
            );
            remove_batch()
        }
    };

    reporter.on_phase_end(Phase::Deleting);

    let report = DeletionReport {
        confirmed: true,
        outcomes,
    };
    log::info!("{}", report.summary());
    report
}
