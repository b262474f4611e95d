//! Sort parameters for collection endpoints.
//!
//! Each collection endpoint accepts `?sort=<attribute>` with an
//! endpoint-specific default. Sorting happens server-side on the fetched
//! collection; ties keep the repository's id order (stable sort).

use serde::Deserialize;

use pony_types::chat::Chat;
use pony_types::message::Message;
use pony_types::user::User;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSort {
    #[default]
    Id,
    CreatedAt,
}

pub fn sort_users(users: &mut [User], sort: UserSort) {
    match sort {
        UserSort::Id => users.sort_by_key(|u| u.id),
        UserSort::CreatedAt => users.sort_by_key(|u| u.created_at),
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSort {
    #[default]
    Name,
    Id,
    CreatedAt,
}

pub fn sort_chats(chats: &mut [Chat], sort: ChatSort) {
    match sort {
        ChatSort::Name => chats.sort_by(|a, b| a.name.cmp(&b.name)),
        ChatSort::Id => chats.sort_by_key(|c| c.id),
        ChatSort::CreatedAt => chats.sort_by_key(|c| c.created_at),
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSort {
    #[default]
    CreatedAt,
    Id,
    Text,
    UserId,
}

pub fn sort_messages(messages: &mut [Message], sort: MessageSort) {
    match sort {
        MessageSort::CreatedAt => messages.sort_by_key(|m| m.created_at),
        MessageSort::Id => messages.sort_by_key(|m| m.id),
        MessageSort::Text => messages.sort_by(|a, b| a.text.cmp(&b.text)),
        MessageSort::UserId => messages.sort_by_key(|m| m.user_id),
    }
}
