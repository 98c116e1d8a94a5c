//! Output formatters for scan reports.
//!
//! - [`text`]: human-readable listing and summary
//! - [`json`]: machine-readable report for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupclean::duplicates::{DuplicateFinder, FinderConfig};
//! use dupclean::output::text::write_report;
//! use std::path::Path;
//!
//! let report = DuplicateFinder::new(FinderConfig::default())
//!     .run(Path::new("."), false)
//!     .unwrap();
//! write_report(&report, &mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::{JsonOutput, JsonOutputError};
pub use text::write_report;
