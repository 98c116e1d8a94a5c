//! File actions module.
//!
//! The only action is permanent deletion of duplicates, run concurrently on a
//! bounded rayon pool once the caller has confirmed it.
//!
//! ```no_run
//! use dupclean::actions::{delete_all, DeleteConfig};
//! use dupclean::progress::LogReporter;
//!
//! let report = delete_all(&[], false, &DeleteConfig::default(), &LogReporter);
//! assert!(report.outcomes.is_empty());
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{delete_all, DeleteConfig, DeletionError, DeletionOutcome, DeletionReport};
