//! Bearer-token authentication extractor.
//!
//! Extracting [`CurrentUser`] from a request verifies the
//! `Authorization: Bearer <token>` header and resolves the token's subject
//! to a user. Verification failures reject the request with 401 before the
//! handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pony_types::error::AuthError;
use pony_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated principal for a request.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(parts)?;
        let user = state.auth_service.authenticate(&token).await?;
        Ok(CurrentUser(user.into_user()))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A missing or malformed header is the same failure as a forged token.
fn extract_bearer(parts: &Parts) -> Result<String, AppError> {
    let header = parts
        .headers
        .get("authorization")
        .ok_or(AppError::Auth(AuthError::InvalidToken))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::Auth(AuthError::InvalidToken))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AppError::Auth(AuthError::InvalidToken))?;
    Ok(token.trim().to_string())
}
