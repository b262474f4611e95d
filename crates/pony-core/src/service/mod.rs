//! Services orchestrating repositories into domain operations.

pub mod chat;

pub use chat::ChatService;
