//! Helpers for pulling caller details out of a request.

use actix_web::{HttpMessage, HttpRequest};

/// Proxy headers consulted for the caller address, most trusted first
const CLIENT_IP_HEADERS: [&str; 3] = ["X-Forwarded-For", "X-Real-IP", "CF-Connecting-IP"];

/// Best-effort caller address for audit records
///
/// `X-Forwarded-For` may hold a chain; the first hop is the client.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| !ip.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer_address(req))
}

/// Socket peer address, ignoring forwarding headers
///
/// Used as the rate limiting key since clients can forge proxy headers.
pub fn peer_address(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

/// Request ID stored by the request ID middleware, if it ran
pub fn extract_request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestId>().map(|id| id.0.clone())
}

/// Request extension carrying the `X-Request-ID` value
#[derive(Clone, Debug)]
pub struct RequestId(pub String);
