//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// Label for metrics: the matched route pattern, or `/unmatched`
///
/// Using the pattern rather than the raw path keeps label cardinality bounded.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unmatched".to_string())
}
