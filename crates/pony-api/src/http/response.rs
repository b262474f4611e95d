//! Response envelope types.
//!
//! Collections carry a `meta.count` alongside the items; single entities
//! are wrapped in a field named after the entity:
//! `{"user": {...}}`, `{"chat": {...}}`, `{"message": {...}}`.

use serde::Serialize;

use pony_types::chat::Chat;
use pony_types::message::Message;
use pony_types::user::User;

/// Collection metadata.
#[derive(Debug, Serialize)]
pub struct Meta {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UserCollection {
    pub meta: Meta,
    pub users: Vec<User>,
}

impl UserCollection {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            meta: Meta {
                count: users.len(),
            },
            users,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCollection {
    pub meta: Meta,
    pub chats: Vec<Chat>,
}

impl ChatCollection {
    pub fn new(chats: Vec<Chat>) -> Self {
        Self {
            meta: Meta {
                count: chats.len(),
            },
            chats,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageCollection {
    pub meta: Meta,
    pub messages: Vec<Message>,
}

impl MessageCollection {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            meta: Meta {
                count: messages.len(),
            },
            messages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub chat: Chat,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Message,
}
