//! Infrastructure implementations for Pony Express.
//!
//! SQLite repositories (sqlx, WAL mode, split reader/writer pools), the
//! Argon2 password hasher, and environment-driven configuration.

pub mod config;
pub mod crypto;
pub mod sqlite;
