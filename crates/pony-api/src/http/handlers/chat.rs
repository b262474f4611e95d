//! Chat HTTP handlers.
//!
//! Endpoints:
//! - GET    /chats                - List chats
//! - POST   /chats                - Create a chat (authenticated)
//! - GET    /chats/{id}           - Get a chat by id
//! - PUT    /chats/{id}           - Update a chat (authenticated)
//! - DELETE /chats/{id}           - Delete a chat (authenticated)
//! - GET    /chats/{id}/messages  - Messages in a chat
//! - POST   /chats/{id}/messages  - Post a message (authenticated)
//! - GET    /chats/{id}/users     - Members of a chat

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pony_types::chat::{ChatCreate, ChatId, ChatUpdate};
use pony_types::error::EntityError;
use pony_types::message::MessageCreate;

use crate::http::error::AppError;
use crate::http::extractors::CurrentUser;
use crate::http::handlers::sort::{
    sort_chats, sort_messages, sort_users, ChatSort, MessageSort, UserSort,
};
use crate::http::response::{
    ChatCollection, ChatResponse, MessageCollection, MessageResponse, UserCollection,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatListQuery {
    #[serde(default)]
    pub sort: ChatSort,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageListQuery {
    #[serde(default)]
    pub sort: MessageSort,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    #[serde(default)]
    pub sort: UserSort,
}

/// Parse a chat id from a path parameter; a non-UUID string names nothing.
fn parse_chat_id(raw: &str) -> Result<ChatId, AppError> {
    raw.parse::<ChatId>()
        .map_err(|_| AppError::Entity(EntityError::not_found("Chat", raw)))
}

/// GET /chats - List all chats.
pub async fn list_chats(
    State(state): State<AppState>,
    Query(query): Query<ChatListQuery>,
) -> Result<Json<ChatCollection>, AppError> {
    let mut chats = state.chat_service.list_chats().await?;
    sort_chats(&mut chats, query.sort);
    Ok(Json(ChatCollection::new(chats)))
}

/// POST /chats - Create a chat owned by the authenticated user.
pub async fn create_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(create): Json<ChatCreate>,
) -> Result<(StatusCode, Json<ChatResponse>), AppError> {
    if create.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let chat = state.chat_service.create_chat(user.id, create.name).await?;
    Ok((StatusCode::CREATED, Json(ChatResponse { chat })))
}

/// GET /chats/{id} - Get a chat by id.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatResponse>, AppError> {
    let id = parse_chat_id(&chat_id)?;
    let chat = state.chat_service.get_chat(&id).await?;
    Ok(Json(ChatResponse { chat }))
}

/// PUT /chats/{id} - Apply a partial update to a chat.
pub async fn update_chat(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(chat_id): Path<String>,
    Json(update): Json<ChatUpdate>,
) -> Result<Json<ChatResponse>, AppError> {
    let id = parse_chat_id(&chat_id)?;
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
    }
    let chat = state.chat_service.update_chat(&id, update).await?;
    Ok(Json(ChatResponse { chat }))
}

/// DELETE /chats/{id} - Delete a chat and its messages.
pub async fn delete_chat(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_chat_id(&chat_id)?;
    state.chat_service.delete_chat(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /chats/{id}/messages - Messages in a chat.
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<MessageCollection>, AppError> {
    let id = parse_chat_id(&chat_id)?;
    let mut messages = state.chat_service.messages_in(&id).await?;
    sort_messages(&mut messages, query.sort);
    Ok(Json(MessageCollection::new(messages)))
}

/// POST /chats/{id}/messages - Post a message as the authenticated user.
pub async fn post_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
    Json(create): Json<MessageCreate>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let id = parse_chat_id(&chat_id)?;
    if create.text.is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let message = state
        .chat_service
        .post_message(user.id, &id, create.text)
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse { message })))
}

/// GET /chats/{id}/users - Members of a chat.
pub async fn get_chat_users(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Query(query): Query<MemberListQuery>,
) -> Result<Json<UserCollection>, AppError> {
    let id = parse_chat_id(&chat_id)?;
    let mut users = state.chat_service.users_in(&id).await?;
    sort_users(&mut users, query.sort);
    Ok(Json(UserCollection::new(users)))
}
