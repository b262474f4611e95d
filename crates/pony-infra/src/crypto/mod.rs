//! Cryptographic primitives: password hashing.

pub mod password;

pub use password::Argon2PasswordHasher;
