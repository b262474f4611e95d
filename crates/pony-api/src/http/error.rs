//! Application error type mapping to HTTP status codes and structured bodies.
//!
//! Every error body carries a machine-readable `type` discriminator:
//! `duplicate_value` (422), `invalid_credentials` / `invalid_token` /
//! `expired_token` (401), `entity_not_found` (404), `duplicate_entity` (422).

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pony_types::error::{AuthError, EntityError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Authentication and registration errors.
    Auth(AuthError),
    /// Entity lookup/mutation errors.
    Entity(EntityError),
    /// Request body failed validation.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<EntityError> for AppError {
    fn from(e: EntityError) -> Self {
        AppError::Entity(e)
    }
}

impl AppError {
    /// Status code this error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::DuplicateUsername(_))
            | AppError::Auth(AuthError::DuplicateEmail(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Auth(AuthError::InvalidCredentials)
            | AppError::Auth(AuthError::InvalidToken)
            | AppError::Auth(AuthError::ExpiredToken) => StatusCode::UNAUTHORIZED,
            AppError::Auth(AuthError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Entity(EntityError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Entity(EntityError::Duplicate { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Entity(EntityError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            AppError::Auth(AuthError::DuplicateUsername(value)) => json!({
                "type": "duplicate_value",
                "entity_name": "User",
                "entity_field": "username",
                "entity_value": value,
            }),
            AppError::Auth(AuthError::DuplicateEmail(value)) => json!({
                "type": "duplicate_value",
                "entity_name": "User",
                "entity_field": "email",
                "entity_value": value,
            }),
            AppError::Auth(AuthError::InvalidCredentials) => json!({
                "type": "invalid_credentials",
                "message": "invalid username or password",
            }),
            AppError::Auth(AuthError::InvalidToken) => json!({
                "type": "invalid_token",
                "message": "invalid bearer token",
            }),
            AppError::Auth(AuthError::ExpiredToken) => json!({
                "type": "expired_token",
                "message": "bearer token has expired",
            }),
            AppError::Entity(EntityError::NotFound {
                entity_name,
                entity_id,
            }) => json!({
                "type": "entity_not_found",
                "entity_name": entity_name,
                "entity_id": entity_id,
            }),
            AppError::Entity(EntityError::Duplicate {
                entity_name,
                entity_id,
            }) => json!({
                "type": "duplicate_entity",
                "entity_name": entity_name,
                "entity_id": entity_id,
            }),
            AppError::Validation(message) => json!({
                "type": "validation_error",
                "message": message,
            }),
            AppError::Auth(AuthError::Storage(_))
            | AppError::Entity(EntityError::Storage(_))
            | AppError::Internal(_) => json!({
                "type": "internal_error",
                "message": "internal server error",
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Detail stays server-side for 500s.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
        }

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body().to_string(),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
