//! SQLite chat repository implementation.
//!
//! A chat aggregate spans the `chats` row and its `chat_members` rows;
//! create and delete touch both inside a transaction on the writer pool.

use std::collections::HashMap;

use pony_core::repository::chat::ChatRepository;
use pony_types::chat::{Chat, ChatId};
use pony_types::error::RepositoryError;
use pony_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Fetch the membership list for a chat, sorted ascending.
    async fn member_ids(&self, chat_id: &ChatId) -> Result<Vec<UserId>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT user_id FROM chat_members WHERE chat_id = ? ORDER BY user_id ASC",
        )
        .bind(chat_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let id: String = row
                    .try_get("user_id")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                id.parse::<UserId>()
                    .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))
            })
            .collect()
    }
}

/// Internal row type for mapping SQLite rows to domain Chat (sans members).
struct ChatRow {
    id: String,
    name: String,
    owner_id: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            owner_id: row.try_get("owner_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self, user_ids: Vec<UserId>) -> Result<Chat, RepositoryError> {
        let id = self
            .id
            .parse::<ChatId>()
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let owner_id = self
            .owner_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid owner id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Chat {
            id,
            name: self.name,
            user_ids,
            owner_id,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepositoryError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339()
}

/// Fetch and group all memberships, for list queries.
async fn all_memberships(
    pool: &DatabasePool,
) -> Result<HashMap<String, Vec<UserId>>, RepositoryError> {
    let rows = sqlx::query("SELECT chat_id, user_id FROM chat_members ORDER BY user_id ASC")
        .fetch_all(&pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    let mut by_chat: HashMap<String, Vec<UserId>> = HashMap::new();
    for row in &rows {
        let chat_id: String = row
            .try_get("chat_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let user_id = user_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        by_chat.entry(chat_id).or_default().push(user_id);
    }
    Ok(by_chat)
}

impl ChatRepository for SqliteChatRepository {
    async fn create(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("INSERT INTO chats (id, name, owner_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(chat.id.to_string())
            .bind(&chat.name)
            .bind(chat.owner_id.to_string())
            .bind(format_datetime(&chat.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for user_id in &chat.user_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO chat_members (chat_id, user_id) VALUES (?, ?)",
            )
            .bind(chat.id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn get_by_id(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let members = self.member_ids(id).await?;
                Ok(Some(chat_row.into_chat(members)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut memberships = all_memberships(&self.pool).await?;

        rows.iter()
            .map(|row| {
                let chat_row =
                    ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let members = memberships.remove(&chat_row.id).unwrap_or_default();
                chat_row.into_chat(members)
            })
            .collect()
    }

    async fn chats_for_user(&self, user_id: &UserId) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT c.* FROM chats c
             JOIN chat_members cm ON cm.chat_id = c.id
             WHERE cm.user_id = ?
             ORDER BY c.id ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut memberships = all_memberships(&self.pool).await?;

        rows.iter()
            .map(|row| {
                let chat_row =
                    ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let members = memberships.remove(&chat_row.id).unwrap_or_default();
                chat_row.into_chat(members)
            })
            .collect()
    }

    async fn update_name(&self, id: &ChatId, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE chats SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_member(&self, chat_id: &ChatId, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO chat_members (chat_id, user_id) VALUES (?, ?)")
            .bind(chat_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, id: &ChatId) -> Result<bool, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("DELETE FROM chat_members WHERE chat_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
