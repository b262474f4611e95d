//! Repository trait definitions.
//!
//! Implementations live in pony-infra (e.g., `SqliteUserRepository`).
//! All traits use native async fn in traits (RPITIT, Rust 2024 edition).

pub mod chat;
pub mod message;
pub mod user;

pub use chat::ChatRepository;
pub use message::MessageRepository;
pub use user::UserRepository;
