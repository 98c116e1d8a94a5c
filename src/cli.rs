//! Command-line interface definitions for dupclean.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates without touching anything
//! dupclean -p ~/Downloads
//!
//! # Delete duplicates, asking for confirmation first
//! dupclean -p ~/Downloads -f
//!
//! # Delete without prompting, JSON report for scripting
//! dupclean -p ~/Downloads -f -y --output json
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find duplicate files by content and optionally delete them.
///
/// Files are compared by a 128-bit BLAKE3 fingerprint of their full content.
/// The first copy found in a depth-first walk is kept; every later copy is a
/// duplicate. Entries are visited in name order, and each subdirectory is
/// walked completely at its place in that order.
#[derive(Debug, Parser)]
#[command(name = "dupclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(short, long, value_name = "DIR", env = "DUPCLEAN_PATH")]
    pub path: PathBuf,

    /// Permanently delete duplicates (asks for confirmation)
    #[arg(short = 'f', long = "delete")]
    pub delete: bool,

    /// Skip the confirmation prompt when deleting
    #[arg(short = 'y', long, requires = "delete")]
    pub yes: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Worker threads for deletion (0 = one per CPU)
    #[arg(long, value_name = "N", default_value = "0", env = "DUPCLEAN_THREADS")]
    pub threads: usize,

    /// Follow symbolic links during the walk
    ///
    /// A link that loops back to an ancestor directory aborts the scan.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars and all logs except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for the scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON report for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
