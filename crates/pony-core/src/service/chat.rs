//! Chat and message orchestration.
//!
//! Ties the chat, message, and user repositories together: chat CRUD,
//! membership queries, and message posting. Deleting a chat removes its
//! messages and membership rows explicitly here; the schema does not
//! cascade.

use pony_types::chat::{Chat, ChatId, ChatUpdate};
use pony_types::error::{EntityError, RepositoryError};
use pony_types::message::{Message, MessageId, MessageUpdate};
use pony_types::user::{User, UserId, UserUpdate};

use crate::repository::chat::ChatRepository;
use crate::repository::message::MessageRepository;
use crate::repository::user::UserRepository;

/// Service for chats, their members, and their messages.
pub struct ChatService<C: ChatRepository, M: MessageRepository, U: UserRepository> {
    chats: C,
    messages: M,
    users: U,
}

impl<C: ChatRepository, M: MessageRepository, U: UserRepository> ChatService<C, M, U> {
    pub fn new(chats: C, messages: M, users: U) -> Self {
        Self {
            chats,
            messages,
            users,
        }
    }

    /// List all chats.
    pub async fn list_chats(&self) -> Result<Vec<Chat>, EntityError> {
        self.chats.list().await.map_err(storage_err)
    }

    /// Get a chat by id.
    pub async fn get_chat(&self, id: &ChatId) -> Result<Chat, EntityError> {
        self.chats
            .get_by_id(id)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| EntityError::not_found("Chat", id))
    }

    /// Create a chat owned by `owner`, who becomes its first member.
    ///
    /// The owner id comes from an authenticated principal, so the owner
    /// reference can never dangle at creation time.
    pub async fn create_chat(&self, owner: UserId, name: String) -> Result<Chat, EntityError> {
        let chat = Chat {
            id: ChatId::new(),
            name,
            user_ids: vec![owner],
            owner_id: owner,
            created_at: chrono::Utc::now(),
        };
        self.chats.create(&chat).await.map_err(storage_err)?;
        tracing::info!(chat_id = %chat.id, owner_id = %owner, "chat created");
        Ok(chat)
    }

    /// Apply a partial update to a chat and return the updated record.
    ///
    /// Only fields present in `update` are touched; each touched field is
    /// a single UPDATE statement, so concurrent readers never observe a
    /// half-applied write.
    pub async fn update_chat(&self, id: &ChatId, update: ChatUpdate) -> Result<Chat, EntityError> {
        if let Some(name) = update.name {
            let renamed = self
                .chats
                .update_name(id, &name)
                .await
                .map_err(storage_err)?;
            if !renamed {
                return Err(EntityError::not_found("Chat", id));
            }
        }
        self.get_chat(id).await
    }

    /// Delete a chat, its messages, and its membership rows.
    pub async fn delete_chat(&self, id: &ChatId) -> Result<(), EntityError> {
        // Verify existence first so a bad id is a 404, not a silent no-op.
        self.get_chat(id).await?;

        let removed = self
            .messages
            .delete_for_chat(id)
            .await
            .map_err(storage_err)?;
        self.chats.delete(id).await.map_err(storage_err)?;
        tracing::info!(chat_id = %id, messages_removed = removed, "chat deleted");
        Ok(())
    }

    /// List the messages in a chat.
    pub async fn messages_in(&self, chat_id: &ChatId) -> Result<Vec<Message>, EntityError> {
        self.get_chat(chat_id).await?;
        self.messages
            .messages_in(chat_id)
            .await
            .map_err(storage_err)
    }

    /// List the users that are members of a chat.
    pub async fn users_in(&self, chat_id: &ChatId) -> Result<Vec<User>, EntityError> {
        self.get_chat(chat_id).await?;
        let users = self
            .users
            .users_in_chat(chat_id)
            .await
            .map_err(storage_err)?;
        Ok(users.into_iter().map(|u| u.into_user()).collect())
    }

    /// List the chats a user is a member of.
    pub async fn chats_for_user(&self, user_id: &UserId) -> Result<Vec<Chat>, EntityError> {
        if self
            .users
            .get_by_id(user_id)
            .await
            .map_err(storage_err)?
            .is_none()
        {
            return Err(EntityError::not_found("User", user_id));
        }
        self.chats.chats_for_user(user_id).await.map_err(storage_err)
    }

    /// Post a message to a chat. The author joins the membership list.
    pub async fn post_message(
        &self,
        author: UserId,
        chat_id: &ChatId,
        text: String,
    ) -> Result<Message, EntityError> {
        self.get_chat(chat_id).await?;

        let message = Message {
            id: MessageId::new(),
            text,
            chat_id: *chat_id,
            user_id: author,
            created_at: chrono::Utc::now(),
        };
        self.messages.create(&message).await.map_err(storage_err)?;
        self.chats
            .add_member(chat_id, &author)
            .await
            .map_err(storage_err)?;
        Ok(message)
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, EntityError> {
        let users = self.users.list().await.map_err(storage_err)?;
        Ok(users.into_iter().map(|u| u.into_user()).collect())
    }

    /// Get a user by id (public view).
    pub async fn get_user(&self, id: &UserId) -> Result<User, EntityError> {
        self.users
            .get_by_id(id)
            .await
            .map_err(|e| EntityError::Storage(e.to_string()))?
            .map(|u| u.into_user())
            .ok_or_else(|| EntityError::not_found("User", id))
    }

    /// Apply a partial update to a user and return the updated record.
    ///
    /// A username or email that collides with another user surfaces as
    /// [`EntityError::Duplicate`] naming the offending value.
    pub async fn update_user(&self, id: &UserId, update: UserUpdate) -> Result<User, EntityError> {
        let updated = match self.users.update(id, &update).await {
            Ok(updated) => updated,
            Err(RepositoryError::Conflict(constraint)) => {
                let value = if constraint.contains("username") {
                    update.username
                } else {
                    update.email
                };
                return Err(EntityError::Duplicate {
                    entity_name: "User",
                    entity_id: value.unwrap_or_default(),
                });
            }
            Err(e) => return Err(storage_err(e)),
        };
        if !updated {
            return Err(EntityError::not_found("User", id));
        }
        self.get_user(id).await
    }

    /// Apply a partial update to a message and return the updated record.
    pub async fn update_message(
        &self,
        id: &MessageId,
        update: MessageUpdate,
    ) -> Result<Message, EntityError> {
        let updated = self.messages.update(id, &update).await.map_err(storage_err)?;
        if !updated {
            return Err(EntityError::not_found("Message", id));
        }
        self.messages
            .get_by_id(id)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| EntityError::not_found("Message", id))
    }
}

fn storage_err(e: RepositoryError) -> EntityError {
    EntityError::Storage(e.to_string())
}
