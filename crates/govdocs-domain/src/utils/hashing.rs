//! Content hashing used for document deduplication (spec §3, invariant 3).

use sha2::{Digest, Sha256};

/// Compute the SHA-256 content hash of raw document bytes, hex-encoded.
///
/// This is the hash persisted as `DocumentRecord.content_hash` and used to
/// deduplicate within a source: identical bytes downloaded on a rerun always
/// produce the same hash, which is what the "re-extract ⇒ identical hash"
/// round-trip law (spec §8) depends on.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::content_hash;

    #[test]
    fn is_deterministic() {
        let bytes = b"policy document contents";
        assert_eq!(content_hash(bytes), content_hash(bytes));
    }

    #[test]
    fn differs_for_different_input() {
        assert_ne!(content_hash(b"a"), content_hash(b"b"));
    }
}
