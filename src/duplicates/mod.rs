//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - First-seen-wins classification by content fingerprint
//! - The scan pipeline that ties walking, classification and deletion together

pub mod classifier;
pub mod finder;

pub use classifier::{classify, Classification, DuplicateEntry, FingerprintIndex};
pub use finder::{DuplicateFinder, FinderConfig, ScanReport};
