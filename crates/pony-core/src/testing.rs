//! In-memory repository and hasher implementations for service tests.
//!
//! All three repositories are views over one shared `MemoryStore`, mirroring
//! how the SQLite implementations share a database, so cross-entity queries
//! (membership joins) behave the same way.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use pony_types::chat::{Chat, ChatId};
use pony_types::error::{PasswordHashError, RepositoryError};
use pony_types::message::{Message, MessageId, MessageUpdate};
use pony_types::user::{UserId, UserInDb, UserUpdate};

use crate::auth::hash::PasswordHasher;
use crate::repository::chat::ChatRepository;
use crate::repository::message::MessageRepository;
use crate::repository::user::UserRepository;

#[derive(Default)]
struct StoreInner {
    users: BTreeMap<UserId, UserInDb>,
    chats: BTreeMap<ChatId, Chat>,
    messages: BTreeMap<MessageId, Message>,
}

/// Shared backing store for the in-memory repositories.
#[derive(Clone, Default)]
pub struct MemoryStore(Arc<Mutex<StoreInner>>);

pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &UserInDb) -> Result<(), RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict("users.username".to_string()));
        }
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("users.email".to_string()));
        }
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserInDb>, RepositoryError> {
        Ok(self.store.0.lock().unwrap().users.get(id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserInDb>, RepositoryError> {
        Ok(self
            .store
            .0
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserInDb>, RepositoryError> {
        Ok(self
            .store
            .0
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<UserInDb>, RepositoryError> {
        Ok(self.store.0.lock().unwrap().users.values().cloned().collect())
    }

    async fn users_in_chat(&self, chat_id: &ChatId) -> Result<Vec<UserInDb>, RepositoryError> {
        let inner = self.store.0.lock().unwrap();
        let Some(chat) = inner.chats.get(chat_id) else {
            return Ok(Vec::new());
        };
        Ok(inner
            .users
            .values()
            .filter(|u| chat.user_ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<bool, RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        if let Some(username) = &update.username {
            if inner
                .users
                .values()
                .any(|u| u.id != *id && u.username == *username)
            {
                return Err(RepositoryError::Conflict("users.username".to_string()));
            }
        }
        if let Some(email) = &update.email {
            if inner.users.values().any(|u| u.id != *id && u.email == *email) {
                return Err(RepositoryError::Conflict("users.email".to_string()));
            }
        }
        match inner.users.get_mut(id) {
            Some(user) => {
                if let Some(username) = &update.username {
                    user.username = username.clone();
                }
                if let Some(email) = &update.email {
                    user.email = email.clone();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.store.0.lock().unwrap().users.remove(id).is_some())
    }
}

pub struct MemoryChatRepository {
    store: MemoryStore,
}

impl MemoryChatRepository {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn create(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        if inner.chats.contains_key(&chat.id) {
            return Err(RepositoryError::Conflict("chats.id".to_string()));
        }
        inner.chats.insert(chat.id, chat.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        Ok(self.store.0.lock().unwrap().chats.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Chat>, RepositoryError> {
        Ok(self.store.0.lock().unwrap().chats.values().cloned().collect())
    }

    async fn chats_for_user(&self, user_id: &UserId) -> Result<Vec<Chat>, RepositoryError> {
        Ok(self
            .store
            .0
            .lock()
            .unwrap()
            .chats
            .values()
            .filter(|c| c.user_ids.contains(user_id))
            .cloned()
            .collect())
    }

    async fn update_name(&self, id: &ChatId, name: &str) -> Result<bool, RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        match inner.chats.get_mut(id) {
            Some(chat) => {
                chat.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_member(&self, chat_id: &ChatId, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        let chat = inner
            .chats
            .get_mut(chat_id)
            .ok_or_else(|| RepositoryError::Query("no such chat".to_string()))?;
        if !chat.user_ids.contains(user_id) {
            chat.user_ids.push(*user_id);
            chat.user_ids.sort();
        }
        Ok(())
    }

    async fn delete(&self, id: &ChatId) -> Result<bool, RepositoryError> {
        Ok(self.store.0.lock().unwrap().chats.remove(id).is_some())
    }
}

pub struct MemoryMessageRepository {
    store: MemoryStore,
}

impl MemoryMessageRepository {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl MessageRepository for MemoryMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), RepositoryError> {
        self.store
            .0
            .lock()
            .unwrap()
            .messages
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError> {
        Ok(self.store.0.lock().unwrap().messages.get(id).cloned())
    }

    async fn messages_in(&self, chat_id: &ChatId) -> Result<Vec<Message>, RepositoryError> {
        let mut messages: Vec<Message> = self
            .store
            .0
            .lock()
            .unwrap()
            .messages
            .values()
            .filter(|m| m.chat_id == *chat_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn update(
        &self,
        id: &MessageId,
        update: &MessageUpdate,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        match inner.messages.get_mut(id) {
            Some(message) => {
                if let Some(text) = &update.text {
                    message.text = text.clone();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_for_chat(&self, chat_id: &ChatId) -> Result<u64, RepositoryError> {
        let mut inner = self.store.0.lock().unwrap();
        let before = inner.messages.len();
        inner.messages.retain(|_, m| m.chat_id != *chat_id);
        Ok((before - inner.messages.len()) as u64)
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        Ok(self.store.0.lock().unwrap().messages.remove(id).is_some())
    }
}

/// Transparent "hasher" for tests: fast, deterministic, and obviously not
/// for production. Malformed stored values fail verification like the real
/// implementation.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${plaintext}"))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        stored_hash.strip_prefix("plain$") == Some(plaintext)
    }
}
