//! Access token hashing.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of `input`. The configured access token is only kept
/// in this form.
#[must_use]
pub fn hash_secret(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `presented` hashes to `expected_hash`.
#[must_use]
pub fn token_matches(expected_hash: &str, presented: &str) -> bool {
    hash_secret(presented) == expected_hash
}
