//! Shared domain types for Pony Express.
//!
//! This crate contains the core domain types used across the Pony Express
//! backend: User, Chat, Message, the auth payloads, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod auth;
pub mod chat;
pub mod error;
pub mod message;
pub mod user;
