//! Business logic for Pony Express.
//!
//! Repository traits, the password-hasher seam, the token signer, and the
//! services that orchestrate them. This crate never depends on pony-infra;
//! concrete SQLite and Argon2 implementations are injected by the caller.

pub mod auth;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
