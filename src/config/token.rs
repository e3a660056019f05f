//! Access token signing configuration.

use std::{env, ffi::OsString, fmt};

/// Seconds an issued token stays valid
pub const TOKEN_VALIDITY_SECONDS: u64 = 60;

/// Longest accepted user identifier, counted in UTF-16 code units
pub const MAX_USER_LENGTH: usize = 100;

/// Identifier used when the caller supplies none
pub const DEFAULT_USER: &str = "anonymous";

/// Shared HMAC key. Never printed, never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a key. Empty keys count as "not configured" and yield `None`.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Configuration for token issuance and verification
#[derive(Clone, Debug, Default)]
pub struct TokenConfig {
    /// `None` when `TOKEN_SECRET` is unset or empty; issuance then fails closed.
    pub secret: Option<Secret>,
}

impl TokenConfig {
    /// Build a config around an explicit key
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let secret = match read_secret(env::var_os("TOKEN_SECRET")) {
            Ok(Some(secret)) => Some(secret),
            Ok(None) => {
                tracing::warn!(
                    "TOKEN_SECRET environment variable is not set; token issuance disabled"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring TOKEN_SECRET; token issuance disabled");
                None
            }
        };

        Self { secret }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }
}

/// Problems with a `TOKEN_SECRET` value that is present but unusable
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("TOKEN_SECRET is not valid UTF-8")]
    NotUnicode,
}

/// Interpret a raw `TOKEN_SECRET` value; unset and empty both mean `Ok(None)`
pub fn read_secret(value: Option<OsString>) -> Result<Option<Secret>, SecretError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .into_string()
            .map(Secret::new)
            .map_err(|_| SecretError::NotUnicode),
    }
}
