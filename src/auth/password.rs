//! Password hashing
//!
//! Wraps bcrypt so the rest of the core never touches plaintext handling
//! primitives directly. Hashing is salted and cost-parameterized; verification
//! is one-way, never a plaintext equality check.

use bcrypt::{hash, verify};

use crate::error::AuthError;

/// Derives the stored hash for a secret. Each call salts independently, so
/// identical secrets across accounts produce different hashes.
pub fn hash_secret(secret: &str, cost: u32) -> Result<String, AuthError> {
    hash(secret, cost).map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Verifies a candidate secret against a stored hash. A malformed stored
/// hash verifies false rather than erroring; the caller cannot distinguish
/// it from a mismatch, which is the point.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    verify(secret, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_verifies_and_salts() {
        let first = hash_secret("secret1", TEST_COST).unwrap();
        let second = hash_secret("secret1", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_secret("secret1", &first));
        assert!(verify_secret("secret1", &second));
        assert!(!verify_secret("secret2", &first));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hashed = hash_secret("hunter2secret", TEST_COST).unwrap();
        assert!(!hashed.contains("hunter2secret"));
    }

    #[test]
    fn test_malformed_stored_hash_verifies_false() {
        assert!(!verify_secret("anything", "not-a-bcrypt-hash"));
        assert!(!verify_secret("anything", ""));
    }
}
