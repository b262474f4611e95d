use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::chat::ChatId;
use crate::user::UserId;

/// Unique identifier for a message, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A single message posted to a chat.
///
/// Both references must point at existing rows; the schema enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Request body for posting a message. The author comes from the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreate {
    pub text: String,
}

/// Partial update for a message. Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageUpdate {
    pub text: Option<String>,
}
