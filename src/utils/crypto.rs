//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hash bytes using SHA-256, hex encoded
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Hash a string using SHA-256
pub fn hash_string(input: &str) -> String {
    hash_bytes(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_string() {
        let hash1 = hash_string("test");
        let hash2 = hash_string("test");
        let hash3 = hash_string("different");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_bytes_matches_hash_string() {
        assert_eq!(hash_bytes(b"%PDF-"), hash_string("%PDF-"));
    }
}
