//! Scan event reporting.
//!
//! Every stage of a run reports what it does through a [`ScanReporter`]
//! passed in by the caller. Nothing in the pipeline writes to a global
//! logger directly for scan events; the reporter decides where they go.
//!
//! Two implementations are provided:
//! - [`LogReporter`]: structured log lines through the `log` facade
//! - [`Progress`]: indicatif progress bars on stderr, with every event
//!   also forwarded to a [`LogReporter`]

use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::actions::delete::DeletionError;
use crate::duplicates::DuplicateEntry;
use crate::scanner::{FileEntry, Fingerprint, ReadError};

/// Pipeline phases, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Directory enumeration
    Walking,
    /// Fingerprinting and classification
    Hashing,
    /// Concurrent removal of duplicates
    Deleting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Walking => write!(f, "walking"),
            Phase::Hashing => write!(f, "hashing"),
            Phase::Deleting => write!(f, "deleting"),
        }
    }
}

/// Receiver for scan events.
///
/// All methods have empty defaults so implementors only override what they
/// need. Deletion events arrive from worker threads, hence `Send + Sync`.
pub trait ScanReporter: Send + Sync {
    /// Called when a phase starts. `total` is 0 when unknown.
    fn on_phase_start(&self, _phase: Phase, _total: usize) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, _phase: Phase) {}

    /// Called for each directory entered during the walk.
    fn on_directory(&self, _path: &Path) {}

    /// Called for each regular file discovered.
    fn on_file_found(&self, _file: &FileEntry) {}

    /// Called when a file is the first with its fingerprint.
    fn on_unique(&self, _file: &FileEntry, _fingerprint: &Fingerprint) {}

    /// Called when a file repeats an earlier fingerprint.
    fn on_duplicate(&self, _duplicate: &DuplicateEntry) {}

    /// Called when a file could not be read for fingerprinting.
    fn on_read_error(&self, _error: &ReadError) {}

    /// Called after a duplicate was removed.
    fn on_deleted(&self, _file: &FileEntry) {}

    /// Called after a removal failed.
    fn on_delete_failed(&self, _error: &DeletionError) {}
}

/// Reporter that writes every event to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ScanReporter for LogReporter {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        if total > 0 {
            log::debug!("Phase {} started ({} items)", phase, total);
        } else {
            log::debug!("Phase {} started", phase);
        }
    }

    fn on_phase_end(&self, phase: Phase) {
        log::debug!("Phase {} complete", phase);
    }

    fn on_directory(&self, path: &Path) {
        log::debug!("Read dir {}", path.display());
    }

    fn on_file_found(&self, file: &FileEntry) {
        log::trace!("Found {} ({} bytes)", file.path.display(), file.size);
    }

    fn on_unique(&self, file: &FileEntry, fingerprint: &Fingerprint) {
        log::debug!("{} {}", fingerprint, file.path.display());
        log::info!("Unique file: {}", file.path.display());
    }

    fn on_duplicate(&self, duplicate: &DuplicateEntry) {
        log::debug!("{} {}", duplicate.fingerprint, duplicate.file.path.display());
        log::info!(
            "Duplicate file: {} (of {})",
            duplicate.file.path.display(),
            duplicate.original.display()
        );
    }

    fn on_read_error(&self, error: &ReadError) {
        log::error!("Cannot fingerprint {}: {}", error.path().display(), error);
    }

    fn on_deleted(&self, file: &FileEntry) {
        log::info!("Deleted {} ({} bytes)", file.path.display(), file.size);
    }

    fn on_delete_failed(&self, error: &DeletionError) {
        log::error!("Failed to delete {}: {}", error.path().display(), error);
    }
}

/// Progress reporter using indicatif.
///
/// Phases run one after another, so a single bar slot is enough. When
/// `quiet` is set no bar is ever created; events still reach the log.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
    inner: LogReporter,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupclean::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
            inner: LogReporter,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    /// Advance the active bar by one and show `path` as its message.
    fn tick(&self, path: &Path) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.inc(1);
                pb.set_message(truncate_path(&path.to_string_lossy(), 30));
            }
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl ScanReporter for Progress {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        self.inner.on_phase_start(phase, total);
        if self.quiet {
            return;
        }

        let pb = match phase {
            Phase::Walking => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::walking_style());
                pb.set_message("Walking directory");
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
            Phase::Hashing | Phase::Deleting => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::bar_style());
                pb.set_message(if phase == Phase::Hashing {
                    "Fingerprinting"
                } else {
                    "Deleting"
                });
                pb
            }
        };

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_phase_end(&self, phase: Phase) {
        self.inner.on_phase_end(phase);
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn on_directory(&self, path: &Path) {
        self.inner.on_directory(path);
    }

    fn on_file_found(&self, file: &FileEntry) {
        self.inner.on_file_found(file);
        self.tick(&file.path);
    }

    fn on_unique(&self, file: &FileEntry, fingerprint: &Fingerprint) {
        self.inner.on_unique(file, fingerprint);
        self.tick(&file.path);
    }

    fn on_duplicate(&self, duplicate: &DuplicateEntry) {
        self.inner.on_duplicate(duplicate);
        self.tick(&duplicate.file.path);
    }

    fn on_read_error(&self, error: &ReadError) {
        self.inner.on_read_error(error);
        self.tick(error.path());
    }

    fn on_deleted(&self, file: &FileEntry) {
        self.inner.on_deleted(file);
        self.tick(&file.path);
    }

    fn on_delete_failed(&self, error: &DeletionError) {
        self.inner.on_delete_failed(error);
        self.tick(error.path());
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len >= max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{}", tail);
    }

    format!(".../{}", file_name)
}
