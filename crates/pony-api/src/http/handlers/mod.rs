//! Request handlers.

pub mod auth;
pub mod chat;
pub mod user;

pub(crate) mod sort;
