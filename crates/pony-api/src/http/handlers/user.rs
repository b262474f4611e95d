//! User HTTP handlers.
//!
//! Endpoints:
//! - GET /users            - List users
//! - GET /users/me         - The authenticated principal
//! - GET /users/{id}       - Get a user by id
//! - GET /users/{id}/chats - Chats the user is a member of

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use pony_types::error::EntityError;
use pony_types::user::UserId;

use crate::http::error::AppError;
use crate::http::extractors::CurrentUser;
use crate::http::handlers::sort::{sort_chats, sort_users, ChatSort, UserSort};
use crate::http::response::{ChatCollection, UserCollection, UserResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub sort: UserSort,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatListQuery {
    #[serde(default)]
    pub sort: ChatSort,
}

/// Parse a user id from a path parameter. A string that is not a UUID
/// cannot name any user, so it reads as not-found rather than bad-request,
/// matching lookups by well-formed-but-absent ids.
fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<UserId>()
        .map_err(|_| AppError::Entity(EntityError::not_found("User", raw)))
}

/// GET /users - List all users.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserCollection>, AppError> {
    let mut users = state.chat_service.list_users().await?;
    sort_users(&mut users, query.sort);
    Ok(Json(UserCollection::new(users)))
}

/// GET /users/me - The user identified by the bearer token.
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse { user })
}

/// GET /users/{id} - Get a user by id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_user_id(&user_id)?;
    let user = state.chat_service.get_user(&id).await?;
    Ok(Json(UserResponse { user }))
}

/// GET /users/{id}/chats - Chats the user is a member of.
pub async fn get_user_chats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ChatListQuery>,
) -> Result<Json<ChatCollection>, AppError> {
    let id = parse_user_id(&user_id)?;
    let mut chats = state.chat_service.chats_for_user(&id).await?;
    sort_chats(&mut chats, query.sort);
    Ok(Json(ChatCollection::new(chats)))
}
