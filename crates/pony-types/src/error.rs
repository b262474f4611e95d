use thiserror::Error;

/// Errors from the authentication subsystem.
///
/// `InvalidCredentials` is deliberately non-specific: unknown username and
/// wrong password produce the same variant so callers cannot enumerate users.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid bearer token")]
    InvalidToken,

    #[error("bearer token has expired")]
    ExpiredToken,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from entity lookups and mutations.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_name} with id '{entity_id}' not found")]
    NotFound {
        entity_name: &'static str,
        entity_id: String,
    },

    #[error("duplicate {entity_name} '{entity_id}'")]
    Duplicate {
        entity_name: &'static str,
        entity_id: String,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

impl EntityError {
    /// Convenience constructor for the common not-found case.
    pub fn not_found(entity_name: &'static str, entity_id: impl ToString) -> Self {
        Self::NotFound {
            entity_name,
            entity_id: entity_id.to_string(),
        }
    }
}

/// Errors from repository operations (used by trait definitions in pony-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Error from password hashing. Verification never returns this; a malformed
/// stored hash simply fails to verify.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::DuplicateUsername("sarah".to_string());
        assert_eq!(err.to_string(), "username 'sarah' is already taken");

        let err = AuthError::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid username or password");
    }

    #[test]
    fn test_invalid_credentials_reveals_nothing() {
        // The display text must not say which factor failed.
        let msg = AuthError::InvalidCredentials.to_string();
        assert!(!msg.contains("unknown"));
        assert!(!msg.contains("wrong"));
        assert!(!msg.contains("not found"));
    }

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::not_found("Chat", "abc123");
        assert_eq!(err.to_string(), "Chat with id 'abc123' not found");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
