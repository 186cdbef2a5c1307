//! TokenHasher trait for session tokens.
//!
//! The `Sha256TokenHasher` adapter lives in legalconnect-infra.

/// Hashes bearer tokens so only digests are persisted.
pub trait TokenHasher: Send + Sync {
    /// Hex-encoded digest of `token`.
    fn hash(&self, token: &str) -> String;
}
