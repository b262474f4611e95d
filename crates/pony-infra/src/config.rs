//! Environment-driven server configuration.
//!
//! Read once at process start; immutable afterwards. The JWT signing key
//! falls back to a fixed development value when `JWT_KEY` is unset -- that
//! default is unsafe for any production deployment and is logged loudly.

/// Fallback signing key used when `JWT_KEY` is not set.
///
/// Development only. Anyone who knows this string can forge tokens.
pub const INSECURE_DEV_JWT_KEY: &str = "insecure-jwt-key-for-dev";

/// Fallback database location when `PONY_DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://pony.db?mode=rwc";

/// Process-wide configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Symmetric key for HS256 token signing and verification.
    pub jwt_key: String,
    /// sqlx connection URL for the SQLite database.
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `JWT_KEY`: token signing key; defaults to [`INSECURE_DEV_JWT_KEY`]
    ///   with a warning.
    /// - `PONY_DATABASE_URL`: database URL; defaults to
    ///   [`DEFAULT_DATABASE_URL`].
    pub fn from_env() -> Self {
        let jwt_key = match std::env::var("JWT_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!(
                    "JWT_KEY is not set; using the insecure development key. \
                     Do not run this configuration in production."
                );
                INSECURE_DEV_JWT_KEY.to_string()
            }
        };

        let database_url = std::env::var("PONY_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self {
            jwt_key,
            database_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_stable() {
        // The dev key is part of the external contract: tokens minted by a
        // dev server must verify against another dev server.
        assert_eq!(INSECURE_DEV_JWT_KEY, "insecure-jwt-key-for-dev");
        assert!(DEFAULT_DATABASE_URL.starts_with("sqlite://"));
    }
}
