//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `pony-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, UNIQUE violations
//! surfaced as `RepositoryError::Conflict`.

use pony_core::repository::user::UserRepository;
use pony_types::chat::ChatId;
use pony_types::error::RepositoryError;
use pony_types::user::{UserId, UserInDb, UserUpdate};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain UserInDb.
struct UserRow {
    id: String,
    username: String,
    email: String,
    hashed_password: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<UserInDb, RepositoryError> {
        let id = self
            .id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(UserInDb {
            id,
            username: self.username,
            email: self.email,
            hashed_password: self.hashed_password,
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

/// Map an insert failure, surfacing UNIQUE violations as `Conflict` with the
/// constraint text (e.g. "UNIQUE constraint failed: users.username").
fn map_write_err(e: sqlx::Error) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Conflict(db.message().to_string()),
        _ => RepositoryError::Query(e.to_string()),
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &UserInDb) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, hashed_password, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_write_err)?;

        Ok(())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserInDb>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            UserRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_user()
        })
        .transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserInDb>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            UserRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_user()
        })
        .transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserInDb>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            UserRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_user()
        })
        .transpose()
    }

    async fn list(&self) -> Result<Vec<UserInDb>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                UserRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_user()
            })
            .collect()
    }

    async fn users_in_chat(&self, chat_id: &ChatId) -> Result<Vec<UserInDb>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT u.* FROM users u
             JOIN chat_members cm ON cm.user_id = u.id
             WHERE cm.chat_id = ?
             ORDER BY u.id ASC",
        )
        .bind(chat_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                UserRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_user()
            })
            .collect()
    }

    async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<bool, RepositoryError> {
        let mut found = true;

        if let Some(username) = &update.username {
            let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
                .bind(username)
                .bind(id.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(map_write_err)?;
            found = result.rows_affected() > 0;
        }

        if let Some(email) = &update.email {
            let result = sqlx::query("UPDATE users SET email = ? WHERE id = ?")
                .bind(email)
                .bind(id.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(map_write_err)?;
            found = result.rows_affected() > 0;
        }

        // An empty update still reports whether the user exists.
        if update.username.is_none() && update.email.is_none() {
            found = self.get_by_id(id).await?.is_some();
        }

        Ok(found)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
