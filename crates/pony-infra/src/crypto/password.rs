//! Argon2id password hasher.
//!
//! Implements the `PasswordHasher` trait from pony-core. Each hash carries
//! its own random salt in the PHC output string, so verification needs no
//! separate salt storage, and `Argon2::verify_password` compares in
//! constant time.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher as _};

use pony_types::error::PasswordHashError;

/// Argon2id implementation of the password-hashing seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl pony_core::auth::hash::PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError(e.to_string()))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        // A stored hash that does not parse as PHC fails verification,
        // indistinguishable from a wrong password.
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
