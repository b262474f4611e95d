//! Application state wiring the services together.
//!
//! Services are generic over repository and hasher traits; AppState pins
//! them to the concrete SQLite and Argon2 implementations.

use std::sync::Arc;

use pony_core::auth::service::AuthService;
use pony_core::auth::token::TokenSigner;
use pony_core::service::chat::ChatService;
use pony_infra::config::ServerConfig;
use pony_infra::crypto::password::Argon2PasswordHasher;
use pony_infra::sqlite::chat::SqliteChatRepository;
use pony_infra::sqlite::message::SqliteMessageRepository;
use pony_infra::sqlite::pool::DatabasePool;
use pony_infra::sqlite::user::SqliteUserRepository;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthService = AuthService<SqliteUserRepository, Argon2PasswordHasher>;

pub type ConcreteChatService =
    ChatService<SqliteChatRepository, SqliteMessageRepository, SqliteUserRepository>;

/// Shared application state holding the services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, run
    /// migrations, wire services.
    pub async fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;

        let signer = TokenSigner::new(&config.jwt_key);
        let auth_service = AuthService::new(
            SqliteUserRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            signer,
        );

        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            SqliteUserRepository::new(db_pool.clone()),
        );

        Ok(Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            db_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pony_types::auth::{LoginForm, UserRegistration};
    use pony_types::chat::ChatUpdate;
    use pony_types::error::{AuthError, EntityError};

    async fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            jwt_key: "test-jwt-key".to_string(),
            database_url: format!("sqlite://{}?mode=rwc", dir.path().join("pony.db").display()),
        };
        let state = AppState::init(&config).await.unwrap();
        (state, dir)
    }

    fn registration(username: &str) -> UserRegistration {
        UserRegistration {
            username: username.to_string(),
            email: format!("{username}@ex.com"),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn registration_login_and_token_roundtrip() {
        let (state, _dir) = state().await;

        let sarah = state
            .auth_service
            .register(registration("sarah"))
            .await
            .unwrap();

        // Second registration with the same username is rejected.
        let err = state
            .auth_service
            .register(registration("sarah"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername(_)));

        // Wrong password and right password through the real Argon2 hasher.
        let err = state
            .auth_service
            .login(&LoginForm {
                username: "sarah".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let token = state
            .auth_service
            .login(&LoginForm {
                username: "sarah".to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();

        let resolved = state
            .auth_service
            .authenticate(&token.access_token)
            .await
            .unwrap();
        assert_eq!(resolved.id, sarah.id);
    }

    #[tokio::test]
    async fn chat_lifecycle_over_sqlite() {
        let (state, _dir) = state().await;

        let sarah = state
            .auth_service
            .register(registration("sarah"))
            .await
            .unwrap();
        let kyle = state
            .auth_service
            .register(registration("kyle"))
            .await
            .unwrap();

        let chat = state
            .chat_service
            .create_chat(sarah.id, "resistance".to_string())
            .await
            .unwrap();

        state
            .chat_service
            .post_message(kyle.id, &chat.id, "come with me".to_string())
            .await
            .unwrap();

        // Posting made kyle a member.
        let members = state.chat_service.users_in(&chat.id).await.unwrap();
        assert_eq!(members.len(), 2);

        let renamed = state
            .chat_service
            .update_chat(
                &chat.id,
                ChatUpdate {
                    name: Some("tech-noir".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "tech-noir");

        state.chat_service.delete_chat(&chat.id).await.unwrap();
        let err = state.chat_service.get_chat(&chat.id).await.unwrap_err();
        assert!(matches!(err, EntityError::NotFound { .. }));
    }
}
