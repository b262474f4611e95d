use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a user, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new UserId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a UserId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered user as exposed over the API.
///
/// The password hash never appears here; it lives only on [`UserInDb`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user record as persisted, including the salted password hash.
///
/// Deliberately not `Serialize`: the hash must never leave the process
/// through a response body. Convert with [`UserInDb::into_user`] before
/// handing the record to any outward-facing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInDb {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a user. Only fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserInDb {
    /// Strip the credential material, leaving the public view.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }

    /// Public view without consuming the record.
    pub fn to_user(&self) -> User {
        self.clone().into_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_ids_are_time_sortable() {
        let a = UserId::new();
        let b = UserId::new();
        assert!(a < b, "UUID v7 ids should sort by creation order");
    }

    #[test]
    fn test_user_update_partial_deserialize() {
        let update: UserUpdate = serde_json::from_str(r#"{"email":"new@ex.com"}"#).unwrap();
        assert!(update.username.is_none());
        assert_eq!(update.email.as_deref(), Some("new@ex.com"));

        let empty: UserUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.username.is_none() && empty.email.is_none());
    }

    #[test]
    fn test_into_user_drops_hash() {
        let record = UserInDb {
            id: UserId::new(),
            username: "sarah".to_string(),
            email: "sarah@ex.com".to_string(),
            hashed_password: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let user = record.clone().into_user();
        assert_eq!(user.username, record.username);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"), "hash must not serialize");
        assert!(!json.contains("hashed_password"));
    }
}
