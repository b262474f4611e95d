//! SQLite message repository implementation.

use pony_core::repository::message::MessageRepository;
use pony_types::chat::ChatId;
use pony_types::error::RepositoryError;
use pony_types::message::{Message, MessageId, MessageUpdate};
use pony_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    chat_id: String,
    user_id: String,
    text: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            user_id: row.try_get("user_id")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = self
            .id
            .parse::<MessageId>()
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = self
            .chat_id
            .parse::<ChatId>()
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let user_id = self
            .user_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Message {
            id,
            text: self.text,
            chat_id,
            user_id,
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

impl MessageRepository for SqliteMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (id, chat_id, user_id, text, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.to_string())
        .bind(message.user_id.to_string())
        .bind(&message.text)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            MessageRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_message()
        })
        .transpose()
    }

    async fn messages_in(&self, chat_id: &ChatId) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }

    async fn update(
        &self,
        id: &MessageId,
        update: &MessageUpdate,
    ) -> Result<bool, RepositoryError> {
        match &update.text {
            Some(text) => {
                let result = sqlx::query("UPDATE messages SET text = ? WHERE id = ?")
                    .bind(text)
                    .bind(id.to_string())
                    .execute(&self.pool.writer)
                    .await
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(result.rows_affected() > 0)
            }
            // An empty update still reports whether the message exists.
            None => Ok(self.get_by_id(id).await?.is_some()),
        }
    }

    async fn delete_for_chat(&self, chat_id: &ChatId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE chat_id = ?")
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
