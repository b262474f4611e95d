//! Chat types: the chat room itself plus its explicit membership list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a chat, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChatId(pub Uuid);

impl ChatId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A chat room.
///
/// `user_ids` is the explicit membership list (sorted ascending); the owner
/// is always a member. The owner reference is never dangling -- creation
/// requires an existing user and user deletion is restricted by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
    pub user_ids: Vec<UserId>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a chat. Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatUpdate {
    pub name: Option<String>,
}

/// Request body for creating a chat. The owner comes from the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCreate {
    pub name: String,
}
