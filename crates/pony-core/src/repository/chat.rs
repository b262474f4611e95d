//! ChatRepository trait definition.

use pony_types::chat::{Chat, ChatId};
use pony_types::error::RepositoryError;
use pony_types::user::UserId;

/// Repository trait for chat persistence.
///
/// A chat is an aggregate of the chat row plus its membership rows:
/// `create` inserts both, `delete` removes both. Messages are a separate
/// aggregate (see `MessageRepository`); deleting them first is the chat
/// service's job.
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat together with its initial membership list.
    fn create(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a chat by id, membership list included (sorted ascending).
    fn get_by_id(
        &self,
        id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// List all chats with their membership lists.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// List the chats a user is a member of.
    ///
    /// Ownership implies membership (creation inserts the owner into the
    /// membership list), so a user's owned chats are always a subset of
    /// this result; there is no separate owned-chats query.
    fn chats_for_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Rename a chat in a single statement. Returns false when no such
    /// chat existed.
    fn update_name(
        &self,
        id: &ChatId,
        name: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Add a user to the membership list. Idempotent.
    fn add_member(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a chat and its membership rows. Returns false when no such
    /// chat existed.
    fn delete(
        &self,
        id: &ChatId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
