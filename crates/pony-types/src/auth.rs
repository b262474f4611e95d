//! Authentication payloads: registration, login, issued tokens, JWT claims.

use serde::{Deserialize, Serialize};

/// Lifetime of an access token in seconds.
pub const ACCESS_TOKEN_DURATION: u64 = 3600;

/// Request body for `POST /auth/registration`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Form body for `POST /auth/token` (OAuth2 password-style login).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// A freshly issued bearer token. Transient -- never persisted server-side,
/// expires by the `exp` claim embedded in `access_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Always the literal "Bearer".
    pub token_type: String,
    /// Always [`ACCESS_TOKEN_DURATION`].
    pub expires_in: u64,
}

impl AccessToken {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: ACCESS_TOKEN_DURATION,
        }
    }
}

/// JWT claims payload: subject (stringified user id) and absolute expiry
/// in epoch seconds. Issued by the token signer, consumed by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_shape() {
        let token = AccessToken::new("abc.def.ghi".to_string());
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("\"token_type\":\"Bearer\""));
        assert!(json.contains("\"expires_in\":3600"));
    }

    #[test]
    fn test_claims_serde_roundtrip() {
        let claims = Claims {
            sub: "0190a0b0-0000-7000-8000-000000000000".to_string(),
            exp: 1_700_000_000,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, back);
    }

    #[test]
    fn test_registration_deserialize() {
        let reg: UserRegistration = serde_json::from_str(
            r#"{"username":"sarah","email":"sarah@ex.com","password":"pw1"}"#,
        )
        .unwrap();
        assert_eq!(reg.username, "sarah");
        assert_eq!(reg.email, "sarah@ex.com");
    }
}
