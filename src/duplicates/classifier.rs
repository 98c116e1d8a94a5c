//! First-seen-wins duplicate classification.
//!
//! # Overview
//!
//! [`classify`] fingerprints each file in list order. The first file with a
//! given fingerprint is kept as the canonical copy and recorded in a
//! [`FingerprintIndex`]; every later file with the same fingerprint is a
//! duplicate of that first path. The index is never overwritten, so the
//! canonical copy is fixed for the whole run.
//!
//! Classification is sequential on purpose. The winner is defined by list
//! order, and a parallel pass would have to re-impose that order anyway.
//!
//! Files that cannot be read are set aside as [`ReadError`]s. They are never
//! compared against anything.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::progress::{Phase, ScanReporter};
use crate::scanner::{fingerprint, FileEntry, Fingerprint, ReadError};

/// Map from fingerprint to the first path seen with it.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    first_seen: HashMap<Fingerprint, PathBuf>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` as the owner of `fingerprint` unless one exists.
    ///
    /// Returns `None` when `path` became the owner, or the existing owner's
    /// path when the fingerprint was already taken.
    pub fn claim(&mut self, fingerprint: Fingerprint, path: &Path) -> Option<&Path> {
        use std::collections::hash_map::Entry;

        match self.first_seen.entry(fingerprint) {
            Entry::Occupied(existing) => Some(existing.into_mut().as_path()),
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
                None
            }
        }
    }

    /// Path that owns `fingerprint`, if any.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&Path> {
        self.first_seen.get(fingerprint).map(PathBuf::as_path)
    }

    /// Number of distinct fingerprints recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    /// Whether no fingerprint has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}

/// A file whose content matches an earlier file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    /// The duplicate file
    pub file: FileEntry,
    /// Shared content fingerprint
    pub fingerprint: Fingerprint,
    /// Path of the first file seen with this fingerprint (the kept copy)
    pub original: PathBuf,
}

/// Result of classifying a file list.
#[derive(Debug, Default)]
pub struct Classification {
    /// First occurrence of each fingerprint, in list order
    pub unique: Vec<FileEntry>,
    /// Later occurrences, in list order
    pub duplicates: Vec<DuplicateEntry>,
    /// Files that could not be fingerprinted
    pub read_errors: Vec<ReadError>,
}

impl Classification {
    /// Number of files that were classified (unique + duplicate).
    #[must_use]
    pub fn classified_count(&self) -> usize {
        self.unique.len() + self.duplicates.len()
    }

    /// Total bytes held by duplicates.
    #[must_use]
    pub fn duplicate_bytes(&self) -> u64 {
        self.duplicates.iter().map(|d| d.file.size).sum()
    }
}

/// Classify files as unique or duplicate, first occurrence wins.
///
/// # Arguments
///
/// * `files` - Files in enumeration order
/// * `reporter` - Receives one unique/duplicate/read-error event per file
///
/// # Example
///
/// ```no_run
/// use dupclean::duplicates::classify;
/// use dupclean::progress::LogReporter;
/// use dupclean::scanner::{Walker, WalkerConfig};
/// use std::path::Path;
///
/// let files = Walker::new(Path::new("."), WalkerConfig::default())
///     .walk(&LogReporter)
///     .unwrap();
/// let result = classify(files, &LogReporter);
/// println!("{} duplicates", result.duplicates.len());
/// ```
pub fn classify(files: Vec<FileEntry>, reporter: &dyn ScanReporter) -> Classification {
    reporter.on_phase_start(Phase::Hashing, files.len());

    let mut index = FingerprintIndex::new();
    let mut result = Classification::default();

    for file in files {
        let fp = match fingerprint(&file.path) {
            Ok(fp) => fp,
            Err(e) => {
                reporter.on_read_error(&e);
                result.read_errors.push(e);
                continue;
            }
        };

        match index.claim(fp, &file.path) {
            None => {
                reporter.on_unique(&file, &fp);
                result.unique.push(file);
            }
            Some(original) => {
                let duplicate = DuplicateEntry {
                    original: original.to_path_buf(),
                    fingerprint: fp,
                    file,
                };
                reporter.on_duplicate(&duplicate);
                result.duplicates.push(duplicate);
            }
        }
    }

    reporter.on_phase_end(Phase::Hashing);
    log::debug!(
        "Classified {} files: {} unique, {} duplicates, {} unreadable",
        result.classified_count() + result.read_errors.len(),
        result.unique.len(),
        result.duplicates.len(),
        result.read_errors.len()
    );

    result
}
