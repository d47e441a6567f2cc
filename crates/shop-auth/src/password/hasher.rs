//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use shop_core::error::AppError;

/// Plaintext hashed once to produce the decoy digest.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Hashes and verifies passwords using Argon2id with the crate's default cost.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    /// Digest verified against when the account does not exist, so a login
    /// for an unknown email costs the same as a wrong password.
    decoy: OnceLock<Option<String>>,
}

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// Returns a PHC-format string. Hashing the same input twice yields
    /// two different digests.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored digest.
    ///
    /// A mismatch and a malformed digest both return `false`.
    pub fn verify(&self, digest: &str, password: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password digest is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spends one verification against the decoy digest. Always rejects.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self
            .decoy
            .get_or_init(|| self.hash(DECOY_PASSWORD).ok());
        if let Some(digest) = decoy {
            let _ = self.verify(digest, password);
        }
        false
    }
}
