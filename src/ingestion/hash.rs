//! Content fingerprinting for duplicate-upload detection.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest over raw file bytes.
///
/// Used purely for change detection (same bytes, same hash, regardless of
/// file name), not for integrity or security.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_hash_identically() {
        assert_eq!(content_hash(b"abc"), content_hash(b"abc"));
    }

    #[test]
    fn different_bytes_hash_differently() {
        assert_ne!(content_hash(b"abc"), content_hash(b"abd"));
    }

    #[test]
    fn hash_is_hex_of_sha256() {
        // Well-known SHA-256 of the empty input.
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
