//! JSON output formatter for scan reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/data",
//!   "summary": {
//!     "total_files": 3,
//!     "unique_files": 2,
//!     "duplicate_files": 1,
//!     "read_errors": 0,
//!     "deleted": 1,
//!     "failed": 0,
//!     "bytes_freed": 5,
//!     "duration_ms": 4,
//!     "exit_code": 0,
//!     "exit_code_name": "DC000"
//!   },
//!   "unique": ["/data/a.txt", "/data/sub/c.txt"],
//!   "duplicates": [
//!     {
//!       "path": "/data/sub/b.txt",
//!       "original": "/data/a.txt",
//!       "fingerprint": "ea8f163db38682925e4491c5e58d4bb3",
//!       "size": 5
//!     }
//!   ],
//!   "read_errors": [],
//!   "deletion": {
//!     "confirmed": true,
//!     "outcomes": [{ "path": "/data/sub/b.txt", "deleted": true, "error": null }]
//!   }
//! }
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::duplicates::ScanReport;
use crate::error::ExitCode;
use crate::scanner::Fingerprint;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files found by the walk
    pub total_files: usize,
    /// Files kept as the first copy of their content
    pub unique_files: usize,
    /// Later copies of already-seen content
    pub duplicate_files: usize,
    /// Files that could not be fingerprinted
    pub read_errors: usize,
    /// Duplicates removed
    pub deleted: usize,
    /// Duplicates whose removal failed
    pub failed: usize,
    /// Bytes freed by removals
    pub bytes_freed: u64,
    /// Duration of the run in milliseconds
    pub duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DC000")
    pub exit_code_name: String,
}

/// One duplicate in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    pub path: String,
    /// Path of the kept copy
    pub original: String,
    pub fingerprint: Fingerprint,
    pub size: u64,
}

/// One unreadable file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReadError {
    pub path: String,
    pub error: String,
}

/// One removal attempt in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutcome {
    pub path: String,
    pub deleted: bool,
    /// Failure cause, `null` on success
    pub error: Option<String>,
}

/// Deletion section in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDeletion {
    pub confirmed: bool,
    pub outcomes: Vec<JsonOutcome>,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned directory
    pub root: String,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Unique file paths, in enumeration order
    pub unique: Vec<String>,
    /// Duplicates, in enumeration order
    pub duplicates: Vec<JsonDuplicate>,
    /// Files that could not be read
    pub read_errors: Vec<JsonReadError>,
    /// Deletion results
    pub deletion: JsonDeletion,
}

impl JsonOutput {
    /// Build the JSON view of a report.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupclean::duplicates::{DuplicateFinder, FinderConfig};
    /// use dupclean::error::ExitCode;
    /// use dupclean::output::json::JsonOutput;
    /// use std::path::Path;
    ///
    /// let report = DuplicateFinder::new(FinderConfig::default())
    ///     .run(Path::new("."), false)
    ///     .unwrap();
    /// let output = JsonOutput::new(&report, ExitCode::for_report(&report));
    /// println!("{}", output.to_json_pretty().unwrap());
    /// ```
    #[must_use]
    pub fn new(report: &ScanReport, exit_code: ExitCode) -> Self {
        let classification = &report.classification;
        let deletion = &report.deletion;

        Self {
            root: path_string(&report.root),
            summary: JsonSummary {
                total_files: report.total_files,
                unique_files: report.unique_count(),
                duplicate_files: report.duplicate_count(),
                read_errors: report.read_error_count(),
                deleted: deletion.deleted_count(),
                failed: deletion.failed_count(),
                bytes_freed: deletion.bytes_freed(),
                duration_ms: report.duration.as_millis() as u64,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
            unique: classification
                .unique
                .iter()
                .map(|f| path_string(&f.path))
                .collect(),
            duplicates: classification
                .duplicates
                .iter()
                .map(|d| JsonDuplicate {
                    path: path_string(&d.file.path),
                    original: path_string(&d.original),
                    fingerprint: d.fingerprint,
                    size: d.file.size,
                })
                .collect(),
            read_errors: classification
                .read_errors
                .iter()
                .map(|e| JsonReadError {
                    path: path_string(e.path()),
                    error: e.to_string(),
                })
                .collect(),
            deletion: JsonDeletion {
                confirmed: deletion.confirmed,
                outcomes: deletion
                    .outcomes
                    .iter()
                    .map(|o| JsonOutcome {
                        path: path_string(&o.path),
                        deleted: o.is_deleted(),
                        error: o.result.as_ref().err().map(ToString::to_string),
                    })
                    .collect(),
            },
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty JSON and a trailing newline to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Paths are reported as walked (root-joined), never canonicalized: deleted
/// files no longer resolve.
fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
