//! Authentication HTTP handlers.
//!
//! Endpoints:
//! - POST /auth/registration - Register a new user
//! - POST /auth/token        - Exchange credentials for a bearer token

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};

use pony_types::auth::{AccessToken, LoginForm, UserRegistration};

use crate::http::error::AppError;
use crate::http::response::UserResponse;
use crate::state::AppState;

/// POST /auth/registration - Register a new user.
///
/// 201 with the created user (the password hash is never echoed), or 422
/// `duplicate_value` naming the colliding field. The username check takes
/// precedence over the email check when both collide.
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<UserRegistration>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    validate_registration(&registration)?;

    let user = state.auth_service.register(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user: user.into_user(),
        }),
    ))
}

/// POST /auth/token - Exchange form-encoded credentials for a bearer token.
///
/// 200 with `{access_token, token_type: "Bearer", expires_in: 3600}`, or
/// 401 `invalid_credentials` with no hint as to which factor failed.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, AppError> {
    let token = state.auth_service.login(&form).await?;
    Ok(Json(token))
}

fn validate_registration(registration: &UserRegistration) -> Result<(), AppError> {
    if registration.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if registration.email.trim().is_empty() || !registration.email.contains('@') {
        return Err(AppError::Validation(
            "email must be a non-empty address".to_string(),
        ));
    }
    if registration.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".to_string()));
    }
    Ok(())
}
