//! SHA-256 hashing of session tokens.

use sha2::{Digest, Sha256};

use legalconnect_core::integration::hash::TokenHasher;

/// Lowercase hex SHA-256 of bearer tokens.
#[derive(Debug, Clone, Copy)]
pub struct Sha256TokenHasher;

impl Sha256TokenHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256TokenHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenHasher for Sha256TokenHasher {
    fn hash(&self, token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Sha256TokenHasher::new().hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_distinct_tokens_hash_differently() {
        let hasher = Sha256TokenHasher::new();
        let a = hasher.hash("token-a");
        assert_eq!(a, hasher.hash("token-a"));
        assert_ne!(a, hasher.hash("token-b"));
        assert_eq!(a.len(), 64);
    }
}
