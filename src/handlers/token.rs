//! Stream access token endpoints.

use crate::{
    handlers::error::ApiError,
    models::{
        ErrorResponse, TokenAuditEvent, TokenEventOutcome, TokenEventType, TokenQuery,
        TokenResponse, VerifyQuery, VerifyResponse,
    },
    services::{
        AppMetrics, SimpleRateLimiter,
        token::{TokenError, TokenService},
    },
    utils::{
        http::{extract_client_ip, extract_request_id, extract_user_agent, peer_address},
        time::unix_now,
    },
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, http::header, web};
use paperclip::actix::api_v2_operation;

const NO_STORE: &str = "no-cache, no-store, must-revalidate";

fn token_service(req: &HttpRequest) -> Result<&web::Data<TokenService>, ApiError> {
    req.app_data::<web::Data<TokenService>>()
        .ok_or(ApiError::Token(TokenError::Configuration))
}

fn audit_event(
    req: &HttpRequest,
    event_type: TokenEventType,
    outcome: TokenEventOutcome,
) -> TokenAuditEvent {
    TokenAuditEvent::new(
        event_type,
        outcome,
        extract_client_ip(req),
        req.path().to_string(),
    )
    .with_user_agent(extract_user_agent(req))
    .with_request_id(extract_request_id(req))
}

fn failure_reason(err: &ApiError) -> &'static str {
    match err {
        ApiError::Token(TokenError::Configuration) => "configuration",
        ApiError::Token(TokenError::Validation(_)) => "validation",
        ApiError::RateLimited => "rate_limited",
        _ => "internal",
    }
}

/// Token issuance endpoint
///
/// Signs `user=<user>&exp=<now + 60>` with the shared secret. The listener
/// passes `token`, `user` and `expiry` on to the streaming server.
#[api_v2_operation(
    summary = "Generate Stream Token",
    description = "Issues a 60 second HMAC-SHA256 access token for the given user (default `anonymous`).",
    tags("Token"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid user parameter", body = ErrorResponse),
        (status = 429, description = "Too Many Requests", body = ErrorResponse),
        (status = 500, description = "Signing secret missing or internal failure", body = ErrorResponse)
    )
)]
pub async fn generate_token(
    req: HttpRequest,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, Error> {
    let user = query.into_inner().user;
    let metrics = req.app_data::<web::Data<AppMetrics>>();

    let outcome = issue(&req, user.as_deref());

    match outcome {
        Ok(response) => {
            if let Some(metrics) = metrics {
                metrics.record_token_issued();
            }

            audit_event(&req, TokenEventType::TokenIssued, TokenEventOutcome::Success)
                .with_user(Some(response.user.clone()))
                .with_expiry(Some(response.expiry))
                .log();

            Ok(HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, NO_STORE))
                .json(response))
        }
        Err(err) => {
            let reason = failure_reason(&err);
            if let Some(metrics) = metrics {
                metrics.record_issue_failure(reason);
            }

            let event_type = if matches!(err, ApiError::RateLimited) {
                TokenEventType::RateLimitExceeded
            } else {
                TokenEventType::TokenIssueRejected
            };
            audit_event(&req, event_type, TokenEventOutcome::Failure)
                .with_user(user)
                .with_reason(Some(reason.to_string()))
                .log();

            Err(err.into())
        }
    }
}

fn issue(req: &HttpRequest, user: Option<&str>) -> Result<TokenResponse, ApiError> {
    if let Some(limiter) = req.app_data::<web::Data<SimpleRateLimiter>>()
        && !limiter.check_rate_limit(&peer_address(req))
    {
        return Err(ApiError::RateLimited);
    }

    let issued = token_service(req)?.issue(user)?;
    Ok(issued.into())
}

/// Token verification endpoint
///
/// Applies the relying-party check against the server clock. A forged and an
/// expired token both report `valid: false`.
#[api_v2_operation(
    summary = "Verify Stream Token",
    description = "Recomputes the HMAC over user and expiry and checks the expiry against the current time.",
    tags("Token"),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Missing or malformed parameters", body = ErrorResponse),
        (status = 500, description = "Signing secret missing", body = ErrorResponse)
    )
)]
pub async fn verify_token(
    req: HttpRequest,
    query: web::Query<VerifyQuery>,
) -> Result<HttpResponse, Error> {
    let VerifyQuery {
        token,
        user,
        expiry,
    } = query.into_inner();

    let now = unix_now().map_err(|e| ApiError::Token(TokenError::Internal(e.to_string())))?;
    let valid = token_service(&req)?
        .verify(&token, &user, expiry, now)
        .map_err(ApiError::from)?;

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_verification(valid);
    }

    let (event_type, outcome) = if valid {
        (TokenEventType::TokenVerified, TokenEventOutcome::Success)
    } else {
        (TokenEventType::TokenVerificationFailed, TokenEventOutcome::Failure)
    };
    audit_event(&req, event_type, outcome)
        .with_user(Some(user))
        .with_expiry(Some(expiry))
        .log();

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(VerifyResponse { valid }))
}

/// CORS preflight for the token endpoints
#[api_v2_operation(
    summary = "CORS Preflight",
    description = "Answers browser preflight requests; CORS headers are added by middleware.",
    tags("Token"),
    responses(
        (status = 200, description = "Preflight accepted")
    )
)]
pub async fn token_preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
