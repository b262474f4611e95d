//! SQLite persistence layer.

pub mod chat;
pub mod message;
pub mod pool;
pub mod user;

pub use chat::SqliteChatRepository;
pub use message::SqliteMessageRepository;
pub use pool::DatabasePool;
pub use user::SqliteUserRepository;
