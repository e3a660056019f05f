//! Token issuance and verification request/response models.

use crate::services::token::IssuedToken;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/generate-token`
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct TokenQuery {
    /// Listener identifier; `anonymous` when omitted
    pub user: Option<String>,
}

/// Issued token as returned to the listener
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct TokenResponse {
    /// Lowercase hex HMAC-SHA256 signature
    pub token: String,
    /// UNIX timestamp (seconds) after which the token is rejected
    pub expiry: u64,
    pub user: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expiry: issued.expiry,
            user: issued.user,
        }
    }
}

/// Query parameters for `GET /api/verify-token`
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VerifyQuery {
    pub token: String,
    pub user: String,
    pub expiry: u64,
}

/// Verification outcome; bad signatures and expired tokens look the same
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VerifyResponse {
    pub valid: bool,
}
