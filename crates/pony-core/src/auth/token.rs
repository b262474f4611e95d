//! Bearer-token issuance and verification (HS256 JWT).
//!
//! The signer holds the encoding and decoding keys built once from the
//! configured secret; it is immutable after construction and safe to share
//! across concurrent requests.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use pony_types::auth::{AccessToken, Claims, ACCESS_TOKEN_DURATION};
use pony_types::error::AuthError;
use pony_types::user::UserId;

/// Issues and decodes signed, time-bound bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Build a signer from the symmetric secret. Expiry is checked strictly
    /// (no leeway): a token whose `exp` is in the past is expired.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint a token for the given user, expiring in
    /// [`ACCESS_TOKEN_DURATION`] seconds. Stateless: nothing is persisted.
    pub fn issue(&self, user_id: &UserId) -> Result<AccessToken, AuthError> {
        let exp = Utc::now().timestamp() + ACCESS_TOKEN_DURATION as i64;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Storage(format!("token signing failed: {e}")))?;
        Ok(AccessToken::new(token))
    }

    /// Verify the signature and expiry of a token and return its claims.
    ///
    /// An expired-but-otherwise-valid token maps to [`AuthError::ExpiredToken`];
    /// every other failure (bad signature, malformed payload) collapses to
    /// [`AuthError::InvalidToken`].
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(AuthError::ExpiredToken)
            }
            Err(_) => Err(AuthError::InvalidToken),
        }
    }

    /// Encode arbitrary claims with this signer's key.
    ///
    /// Exists for tests that need tokens with controlled `exp` values.
    #[doc(hidden)]
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::Storage(format!("token signing failed: {e}")))
    }
}
