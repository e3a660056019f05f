//! Stream access token issuance and verification.
//!
//! A token is the lowercase-hex HMAC-SHA256 of `user=<user>&exp=<expiry>`
//! keyed by the shared secret. Nothing is stored: a relying party checks a
//! token by recomputing the digest and comparing expiry against its clock.

use crate::{
    config::{DEFAULT_USER, MAX_USER_LENGTH, Secret, TOKEN_VALIDITY_SECONDS, TokenConfig},
    utils::{hmac, time::unix_now},
};
use tracing::debug;

/// Failures of the token service
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token secret is not configured")]
    Configuration,

    #[error("invalid user: {0}")]
    Validation(String),

    #[error("token computation failed: {0}")]
    Internal(String),
}

/// A freshly issued token together with the values it signs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expiry: u64,
    pub user: String,
}

/// Stateless signer/verifier around the shared secret
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: Option<Secret>,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            secret: config.secret,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Issue a token valid for [`TOKEN_VALIDITY_SECONDS`] from now
    pub fn issue(&self, user: Option<&str>) -> Result<IssuedToken, TokenError> {
        let now = unix_now().map_err(|e| TokenError::Internal(format!("system clock: {e}")))?;
        self.issue_at(user, now)
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user: Option<&str>, now: u64) -> Result<IssuedToken, TokenError> {
        let secret = self.secret()?;
        let user = user.unwrap_or(DEFAULT_USER);
        validate_user(user)?;

        let expiry = now
            .checked_add(TOKEN_VALIDITY_SECONDS)
            .ok_or_else(|| TokenError::Internal("expiry overflows".to_string()))?;

        let token = hmac::sign(secret.as_bytes(), user, expiry)
            .map_err(|e| TokenError::Internal(e.to_string()))?;

        // Request-level audit records are written by the HTTP layer
        debug!(
            target: "token_service",
            user = %user,
            expiry = expiry,
            "Signed token"
        );

        Ok(IssuedToken {
            token,
            expiry,
            user: user.to_string(),
        })
    }

    /// Check `candidate` against `user` and `expiry` at time `now`
    ///
    /// A bad signature and an expired token both yield `Ok(false)`; callers
    /// cannot tell them apart.
    pub fn verify(
        &self,
        candidate: &str,
        user: &str,
        expiry: u64,
        now: u64,
    ) -> Result<bool, TokenError> {
        let secret = self.secret()?;

        let signature_ok = hmac::signature_matches(secret.as_bytes(), user, expiry, candidate)
            .map_err(|e| TokenError::Internal(e.to_string()))?;

        Ok(signature_ok && now <= expiry)
    }

    fn secret(&self) -> Result<&Secret, TokenError> {
        self.secret.as_ref().ok_or(TokenError::Configuration)
    }
}

/// Reject empty identifiers and identifiers over [`MAX_USER_LENGTH`] UTF-16 code units
///
/// Characters outside the Basic Multilingual Plane count twice, matching how
/// browser clients measure string length.
pub fn validate_user(user: &str) -> Result<(), TokenError> {
    if user.is_empty() {
        return Err(TokenError::Validation("user must not be empty".to_string()));
    }

    let length = user.encode_utf16().count();
    if length > MAX_USER_LENGTH {
        return Err(TokenError::Validation(format!(
            "user is {length} UTF-16 code units, limit is {MAX_USER_LENGTH}"
        )));
    }

    Ok(())
}
