//! dupclean - content-based duplicate file cleaner
//!
//! Walks a directory tree in a fixed depth-first order, fingerprints every
//! regular file with 128-bit BLAKE3, keeps the first copy of each content and
//! reports (or, once confirmed, permanently deletes) every later copy.

pub mod actions;
pub mod cli;
pub mod confirm;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::JsonOutput;
use crate::progress::Progress;

/// Run the application with the process's stdin and stdout.
///
/// # Errors
///
/// Returns an error if the directory cannot be enumerated or the report
/// cannot be written. Per-file failures are not errors; they show up in
/// the report and in the returned [`ExitCode`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cli, stdin.lock(), &mut stdout.lock())
}

/// Run the application against explicit input and output streams.
///
/// `input` is only read for the deletion prompt; the prompt itself goes to
/// stderr so that `out` carries nothing but the report.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_with<R: BufRead, W: Write>(cli: Cli, input: R, out: &mut W) -> anyhow::Result<ExitCode> {
    log::debug!("Parsed arguments: {:?}", cli);

    let confirmed = if !cli.delete {
        false
    } else if cli.yes {
        log::info!("Deletion confirmed by --yes");
        true
    } else {
        confirm::prompt_confirmation(input, &mut io::stderr())
            .context("Failed to read deletion confirmation")?
    };
    if cli.delete && !confirmed {
        log::warn!("Deletion not confirmed, reporting only");
    }

    let config = FinderConfig::default()
        .with_follow_symlinks(cli.follow_symlinks)
        .with_threads(cli.threads);

    let quiet = cli.quiet || cli.output == OutputFormat::Json;
    let finder = DuplicateFinder::new(config).with_reporter(Arc::new(Progress::new(quiet)));

    let report = finder
        .run(&cli.path, confirmed)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;

    let exit_code = ExitCode::for_report(&report);

    match cli.output {
        OutputFormat::Text => {
            output::write_report(&report, out).context("Failed to write report")?;
        }
        OutputFormat::Json => {
            JsonOutput::new(&report, exit_code)
                .write_to(out)
                .context("Failed to write JSON report")?;
        }
    }
    out.flush().context("Failed to write report")?;

    Ok(exit_code)
}
