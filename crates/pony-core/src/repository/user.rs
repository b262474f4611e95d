//! UserRepository trait definition.

use pony_types::chat::ChatId;
use pony_types::error::RepositoryError;
use pony_types::user::{UserId, UserInDb, UserUpdate};

/// Repository trait for user persistence.
///
/// `create` must surface UNIQUE-constraint violations as
/// [`RepositoryError::Conflict`] naming the offending column; the auth
/// service relies on this as a backstop for its explicit duplicate checks.
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    fn create(
        &self,
        user: &UserInDb,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<UserInDb>, RepositoryError>> + Send;

    /// Get a user by exact username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserInDb>, RepositoryError>> + Send;

    /// Get a user by exact email.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserInDb>, RepositoryError>> + Send;

    /// List all users, ordered by id ascending.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<UserInDb>, RepositoryError>> + Send;

    /// List the members of a chat, ordered by id ascending.
    fn users_in_chat(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<UserInDb>, RepositoryError>> + Send;

    /// Apply a partial update; each `Some` field is a single UPDATE
    /// statement. Returns false when no such user existed. Colliding
    /// username or email surfaces as [`RepositoryError::Conflict`], same
    /// as `create`.
    fn update(
        &self,
        id: &UserId,
        update: &UserUpdate,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete a user. Returns false when no such user existed.
    fn delete(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
