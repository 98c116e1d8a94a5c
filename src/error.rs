//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::ScanReport;

/// Exit codes for dupclean.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (fatal failure, nothing classified)
/// - 2: No duplicates found (completed normally, no duplicates)
/// - 3: Partial success (completed with per-file read or deletion errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: Scan completed but some files could not be read or deleted.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DC000",
            Self::GeneralError => "DC001",
            Self::NoDuplicates => "DC002",
            Self::PartialSuccess => "DC003",
        }
    }

    /// Exit code for a completed run.
    ///
    /// Per-file errors take precedence over the duplicate count.
    #[must_use]
    pub fn for_report(report: &ScanReport) -> Self {
        if report.has_errors() {
            Self::PartialSuccess
        } else if report.duplicate_count() == 0 {
            Self::NoDuplicates
        } else {
            Self::Success
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DC001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
