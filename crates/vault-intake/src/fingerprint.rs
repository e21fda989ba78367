//! Content fingerprinting for provenance tracking.

use sha2::{Digest, Sha256};

/// SHA-256 digest of the raw bytes as a lowercase hex string.
///
/// Deterministic and infallible for in-memory payloads of any size.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
