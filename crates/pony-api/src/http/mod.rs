//! HTTP/REST layer for Pony Express.
//!
//! Axum-based REST API with bearer-token authentication. Handlers validate
//! request bodies, call into the services, and map domain errors to the
//! structured response bodies in `error`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
