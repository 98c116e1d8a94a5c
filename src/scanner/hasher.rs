//! 128-bit content fingerprints with streaming BLAKE3.
//!
//! # Overview
//! A [`Fingerprint`] is the first 16 bytes of BLAKE3's extendable output over
//! the complete file content. Identical bytes always give identical
//! fingerprints; any difference changes it with overwhelming probability.
//! Files are streamed through the hasher, so memory use does not grow with
//! file size.

use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::{Serialize, Serializer};

use super::ReadError;

/// Fingerprint width in bytes.
pub const FINGERPRINT_LEN: usize = 16;

/// Fixed-size content digest of a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal form (32 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn from_hasher(hasher: &blake3::Hasher) -> Self {
        let mut out = [0u8; FINGERPRINT_LEN];
        hasher.finalize_xof().fill(&mut out);
        Self(out)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fingerprint an in-memory byte slice.
#[must_use]
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(data);
    Fingerprint::from_hasher(&hasher)
}

/// Compute the fingerprint of a file's full content.
///
/// # Errors
///
/// Returns [`ReadError`] if the file cannot be opened or read. The caller
/// decides what to do with the file; nothing here aborts a scan.
pub fn fingerprint(path: &Path) -> Result<Fingerprint, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::from_io(path.to_path_buf(), e))?;

    let mut hasher = blake3::Hasher::new();
    hasher
        .update_reader(file)
        .map_err(|e| ReadError::from_io(path.to_path_buf(), e))?;

    Ok(Fingerprint::from_hasher(&hasher))
}
