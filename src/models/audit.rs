//! Audit logging for token endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEventType {
    TokenIssued,
    TokenIssueRejected,
    TokenVerified,
    TokenVerificationFailed,
    RateLimitExceeded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEventOutcome {
    Success,
    Failure,
}

/// Structured audit record for one token request
///
/// Carries the user identifier and expiry but never the signature or secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAuditEvent {
    pub event_type: TokenEventType,
    pub outcome: TokenEventOutcome,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub user: Option<String>,
    pub expiry: Option<u64>,
    pub endpoint: String,
    pub request_id: Option<String>,
    pub reason: Option<String>,
}

impl TokenAuditEvent {
    pub fn new(
        event_type: TokenEventType,
        outcome: TokenEventOutcome,
        ip_address: String,
        endpoint: String,
    ) -> Self {
        Self {
            event_type,
            outcome,
            timestamp: Utc::now(),
            ip_address,
            user_agent: None,
            user: None,
            expiry: None,
            endpoint,
            request_id: None,
            reason: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    pub fn with_expiry(mut self, expiry: Option<u64>) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// Emit the event on the `token_audit` tracing target
    pub fn log(&self) {
        info!(
            target: "token_audit",
            event_type = ?self.event_type,
            outcome = ?self.outcome,
            timestamp = %self.timestamp,
            ip_address = %self.ip_address,
            user_agent = ?self.user_agent,
            user = ?self.user,
            expiry = ?self.expiry,
            endpoint = %self.endpoint,
            request_id = ?self.request_id,
            reason = ?self.reason,
            "Token audit event"
        );
    }
}
