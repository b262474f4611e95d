//! PasswordHasher trait for one-way credential hashing.
//!
//! Defined in pony-core so the auth service can hash and verify passwords
//! without coupling to a specific algorithm. The `Argon2PasswordHasher`
//! adapter lives in pony-infra.

use pony_types::error::PasswordHashError;

/// Abstraction over adaptive, salted password hashing.
///
/// `hash` embeds a per-call random salt in its output, so `verify` needs
/// no separate salt storage.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque, self-describing string.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed stored hash yields `false`, never an error: the caller
    /// treats it exactly like a wrong password.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool;
}
