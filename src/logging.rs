//! Logging infrastructure for dupclean.
//!
//! Structured logging uses the `log` facade with the `env_logger` backend.
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only) or `-v`/`-vv`/`-vvv`
//! 3. Default: warn level
//!
//! # Build-specific Formatting
//!
//! - **Debug builds**: timestamp, level, and module path
//! - **Release builds**: level and message only
//!
//! # Example
//!
//! ```rust,no_run
//! use dupclean::logging::init_logging;
//!
//! // Warnings and errors only
//! init_logging(0, false);
//!
//! // Every unique/duplicate decision (-v)
//! init_logging(1, false);
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Safe to call more than once; later calls are ignored.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=warn, 1=info, 2=debug, 3+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder);

    if builder.try_init().is_err() {
        // Already initialized (e.g. by a test harness)
        return;
    }

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!("Logging initialized at level: {}", current_level_name());
    }
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Configure the log format based on build type.
fn configure_format(builder: &mut Builder) {
    #[cfg(debug_assertions)]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        });
    }

    #[cfg(not(debug_assertions))]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}

/// Get the current log level as a string.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
