//! MessageRepository trait definition.

use pony_types::chat::ChatId;
use pony_types::error::RepositoryError;
use pony_types::message::{Message, MessageId, MessageUpdate};

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Insert a new message.
    fn create(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a message by id.
    fn get_by_id(
        &self,
        id: &MessageId,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// List the messages in a chat, ordered by created_at ascending.
    fn messages_in(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Apply a partial update; each `Some` field is a single UPDATE
    /// statement. Returns false when no such message existed.
    fn update(
        &self,
        id: &MessageId,
        update: &MessageUpdate,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete all messages in a chat, returning how many were removed.
    fn delete_for_chat(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete a single message. Returns false when no such message existed.
    fn delete(
        &self,
        id: &MessageId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
