//! Credential store and token-based session verification.
//!
//! `AuthService` owns all writes to user records: registration hashes the
//! password and persists the record, login verifies credentials and mints a
//! bearer token, and `authenticate` resolves a presented token back to the
//! user it was issued for.

use pony_types::auth::{AccessToken, LoginForm, UserRegistration};
use pony_types::error::{AuthError, EntityError, RepositoryError};
use pony_types::user::{UserId, UserInDb};

use crate::auth::hash::PasswordHasher;
use crate::auth::token::TokenSigner;
use crate::repository::user::UserRepository;

/// Service orchestrating registration, login, and token verification.
///
/// Generic over the repository and hasher traits to maintain clean
/// architecture -- pony-core never depends on pony-infra.
pub struct AuthService<U: UserRepository, H: PasswordHasher> {
    users: U,
    hasher: H,
    signer: TokenSigner,
}

impl<U: UserRepository, H: PasswordHasher> AuthService<U, H> {
    pub fn new(users: U, hasher: H, signer: TokenSigner) -> Self {
        Self {
            users,
            hasher,
            signer,
        }
    }

    /// Register a new user.
    ///
    /// The username check runs before the email check; when both collide,
    /// the username wins. This ordering is a behavioral contract, not an
    /// accident. The UNIQUE constraints in the schema backstop the race
    /// between check and insert.
    pub async fn register(&self, registration: UserRegistration) -> Result<UserInDb, AuthError> {
        let UserRegistration {
            username,
            email,
            password,
        } = registration;

        if self
            .users
            .get_by_username(&username)
            .await
            .map_err(storage_err)?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername(username));
        }

        if self
            .users
            .get_by_email(&email)
            .await
            .map_err(storage_err)?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail(email));
        }

        let hashed_password = self
            .hasher
            .hash(&password)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let user = UserInDb {
            id: UserId::new(),
            username,
            email,
            hashed_password,
            created_at: chrono::Utc::now(),
        };

        match self.users.create(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, username = %user.username, "user registered");
                Ok(user)
            }
            // Lost the race: another request inserted between check and
            // insert. The constraint name tells us which field collided.
            Err(RepositoryError::Conflict(constraint)) if constraint.contains("username") => {
                Err(AuthError::DuplicateUsername(user.username))
            }
            Err(RepositoryError::Conflict(_)) => Err(AuthError::DuplicateEmail(user.email)),
            Err(e) => Err(storage_err(e)),
        }
    }

    /// Look up a user by username and verify the password.
    ///
    /// Unknown username and wrong password both return
    /// [`AuthError::InvalidCredentials`] -- indistinguishable by design,
    /// so callers cannot enumerate accounts.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserInDb, AuthError> {
        let user = self
            .users
            .get_by_username(username)
            .await
            .map_err(storage_err)?;

        match user {
            Some(user) if self.hasher.verify(password, &user.hashed_password) => Ok(user),
            _ => {
                tracing::debug!("login attempt rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Verify credentials and mint a bearer token for the user.
    pub async fn login(&self, form: &LoginForm) -> Result<AccessToken, AuthError> {
        let user = self
            .find_by_credentials(&form.username, &form.password)
            .await?;
        self.signer.issue(&user.id)
    }

    /// Resolve a presented bearer token to the user it identifies.
    ///
    /// Single deterministic pass: decode (signature + expiry), parse the
    /// subject, one user lookup. A token whose subject no longer exists
    /// fails with [`AuthError::InvalidToken`], the same class as a forged
    /// token, so deleted accounts leak no existence information.
    pub async fn authenticate(&self, token: &str) -> Result<UserInDb, AuthError> {
        let claims = self.signer.decode(token)?;
        let user_id: UserId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        self.users
            .get_by_id(&user_id)
            .await
            .map_err(storage_err)?
            .ok_or(AuthError::InvalidToken)
    }

    /// Get a user by id, with a not-found error naming the entity.
    pub async fn find_by_id(&self, id: &UserId) -> Result<UserInDb, EntityError> {
        self.users
            .get_by_id(id)
            .await
            .map_err(|e| EntityError::Storage(e.to_string()))?
            .ok_or_else(|| EntityError::not_found("User", id))
    }

    /// Access the token signer (for issuing tokens outside the login path).
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}

fn storage_err(e: RepositoryError) -> AuthError {
    AuthError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryUserRepository, PlainHasher};
    use pony_types::auth::Claims;

    fn service() -> AuthService<MemoryUserRepository, PlainHasher> {
        AuthService::new(
            MemoryUserRepository::new(),
            PlainHasher,
            TokenSigner::new("test-secret"),
        )
    }

    fn registration(username: &str, email: &str, password: &str) -> UserRegistration {
        UserRegistration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let svc = service();
        let user = svc
            .register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        let found = svc.find_by_credentials("sarah", "pw1").await.unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "sarah");
        assert_eq!(found.email, "sarah@ex.com");
        assert_ne!(found.hashed_password, "pw1", "plaintext must not be stored");
    }

    #[tokio::test]
    async fn register_duplicate_username_fails() {
        let svc = service();
        svc.register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        let err = svc
            .register(registration("sarah", "other@ex.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername(u) if u == "sarah"));
    }

    #[tokio::test]
    async fn register_duplicate_email_checked_after_username() {
        let svc = service();
        svc.register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        // Distinct username, colliding email.
        let err = svc
            .register(registration("sara", "sarah@ex.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail(e) if e == "sarah@ex.com"));

        // Both collide: username takes precedence.
        let err = svc
            .register(registration("sarah", "sarah@ex.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let svc = service();
        svc.register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        let wrong_password = svc.find_by_credentials("sarah", "nope").await.unwrap_err();
        let unknown_user = svc.find_by_credentials("nobody", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn login_token_authenticates_to_same_user() {
        let svc = service();
        let user = svc
            .register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        let token = svc
            .login(&LoginForm {
                username: "sarah".to_string(),
                password: "pw1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let resolved = svc.authenticate(&token.access_token).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_invalid_not_missing() {
        let svc = service();
        let user = svc
            .register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();
        let token = svc.signer().issue(&user.id).unwrap();

        svc.users.delete(&user.id).await.unwrap();

        let err = svc.authenticate(&token.access_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn non_uuid_subject_is_invalid() {
        let svc = service();
        let token = svc
            .signer()
            .encode_claims(&Claims {
                sub: "not-a-uuid".to_string(),
                exp: chrono::Utc::now().timestamp() + 60,
            })
            .unwrap();

        let err = svc.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let svc = service();
        let user = svc
            .register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();
        let token = svc
            .signer()
            .encode_claims(&Claims {
                sub: user.id.to_string(),
                exp: chrono::Utc::now().timestamp() - 10,
            })
            .unwrap();

        let err = svc.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[tokio::test]
    async fn register_maps_insert_race_to_duplicate() {
        let svc = service();
        svc.register(registration("sarah", "sarah@ex.com", "pw1"))
            .await
            .unwrap();

        // Simulate losing the check/insert race by inserting directly.
        let colliding = UserInDb {
            id: UserId::new(),
            username: "sarah".to_string(),
            email: "late@ex.com".to_string(),
            hashed_password: "x".to_string(),
            created_at: chrono::Utc::now(),
        };
        let err = svc.users.create(&colliding).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(c) if c.contains("username")));
    }
}
