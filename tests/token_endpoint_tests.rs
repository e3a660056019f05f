use actix_web::{
    http::{Method, StatusCode},
    test,
};
use stream_token_api::{
    AppConfig, AppState, ErrorResponse, RateLimitConfig, TOKEN_VALIDITY_SECONDS, TokenConfig,
    TokenResponse, TokenService, VerifyResponse, create_app,
};
use std::{
    io::Write,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tracing_subscriber::fmt::MakeWriter;

const SECRET: &str = "integration-secret";

fn state_with_secret(secret: Option<&str>) -> AppState {
    let token = secret.map(TokenConfig::with_secret).unwrap_or_default();
    AppState::new(AppConfig::default().with_token(token)).expect("metrics registry")
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn header<'a>(resp: &'a actix_web::dev::ServiceResponse, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[actix_web::test]
async fn test_generate_token_success() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let before = now();
    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=alice")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let after = now();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, "cache-control"),
        Some("no-cache, no-store, must-revalidate")
    );
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        header(&resp, "access-control-allow-methods"),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(
        header(&resp, "access-control-allow-headers"),
        Some("Content-Type")
    );

    let body: TokenResponse = test::read_body_json(resp).await;
    assert_eq!(body.user, "alice");
    assert!(body.expiry >= before + TOKEN_VALIDITY_SECONDS);
    assert!(body.expiry <= after + TOKEN_VALIDITY_SECONDS);

    // The relying party recomputes the signature with the same secret
    let verifier = TokenService::new(TokenConfig::with_secret(SECRET));
    assert!(verifier.verify(&body.token, "alice", body.expiry, after).unwrap());
}

#[actix_web::test]
async fn test_generate_token_json_shape() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=bob")
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let object = json.as_object().expect("JSON object");
    assert_eq!(object.len(), 3, "unexpected fields: {json}");
    assert!(json["token"].as_str().is_some_and(|t| t.len() == 64));
    assert!(json["expiry"].is_u64());
    assert_eq!(json["user"], "bob");
}

#[actix_web::test]
async fn test_generate_token_defaults_to_anonymous() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token")
        .to_request();
    let body: TokenResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.user, "anonymous");
}

#[actix_web::test]
async fn test_generate_token_decodes_user() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=night%20owl")
        .to_request();
    let body: TokenResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.user, "night owl");
}

#[actix_web::test]
async fn test_generate_token_rejects_empty_user() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(
        body.error.starts_with("Invalid user parameter"),
        "unexpected error: {}",
        body.error
    );
}

#[actix_web::test]
async fn test_generate_token_user_length_boundary() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let ok = test::TestRequest::get()
        .uri(&format!("/api/generate-token?user={}", "a".repeat(100)))
        .to_request();
    assert_eq!(test::call_service(&app, ok).await.status(), StatusCode::OK);

    let too_long = test::TestRequest::get()
        .uri(&format!("/api/generate-token?user={}", "a".repeat(101)))
        .to_request();
    let resp = test::call_service(&app, too_long).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert!(json["error"].is_string());
    assert!(json.get("token").is_none());
}

#[actix_web::test]
async fn test_generate_token_without_secret() {
    let app = test::init_service(create_app(state_with_secret(None))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=alice")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({ "error": "Server configuration error: TOKEN_SECRET not set" })
    );
}

#[actix_web::test]
async fn test_generate_token_preflight() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/generate-token")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
    assert_eq!(
        header(&resp, "access-control-allow-methods"),
        Some("GET, POST, OPTIONS")
    );

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_generate_token_rate_limited() {
    let config = AppConfig::default()
        .with_token(TokenConfig::with_secret(SECRET))
        .with_rate_limit(RateLimitConfig {
            max_requests: 2,
            period_seconds: 60,
        });
    let app = test::init_service(create_app(AppState::new(config).unwrap())).await;

    for attempt in 1..=2 {
        let req = test::TestRequest::get()
            .uri("/api/generate-token")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "attempt {attempt} should pass");
    }

    let req = test::TestRequest::get()
        .uri("/api/generate-token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.contains("Rate limit exceeded"));

    // Verification is not subject to the issuance budget
    let req = test::TestRequest::get()
        .uri("/api/verify-token?token=00&user=alice&expiry=1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_verify_token_round_trip() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=carol")
        .to_request();
    let issued: TokenResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/verify-token?token={}&user=carol&expiry={}",
            issued.token, issued.expiry
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, "cache-control"),
        Some("no-cache, no-store, must-revalidate")
    );
    let body: VerifyResponse = test::read_body_json(resp).await;
    assert!(body.valid);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/verify-token?token={}&user=mallory&expiry={}",
            issued.token, issued.expiry
        ))
        .to_request();
    let body: VerifyResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.valid);
}

#[actix_web::test]
async fn test_verify_token_rejects_expired() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    // Correctly signed, but issued well in the past
    let stale = TokenService::new(TokenConfig::with_secret(SECRET))
        .issue_at(Some("dave"), now() - 3600)
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/verify-token?token={}&user=dave&expiry={}",
            stale.token, stale.expiry
        ))
        .to_request();
    let body: VerifyResponse = test::call_and_read_body_json(&app, req).await;

    assert!(!body.valid);
}

#[actix_web::test]
async fn test_verify_token_malformed_query() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;

    let req = test::TestRequest::get()
        .uri("/api/verify-token?token=abc&user=alice&expiry=soon")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid query"));
}

#[actix_web::test]
async fn test_verify_token_without_secret() {
    let app = test::init_service(create_app(state_with_secret(None))).await;

    let req = test::TestRequest::get()
        .uri("/api/verify-token?token=abc&user=alice&expiry=1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({ "error": "Server configuration error: TOKEN_SECRET not set" })
    );
}

#[actix_web::test]
async fn test_generate_token_counts_emoji_as_two_units() {
    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;
    let grin = "%F0%9F%98%80";

    let req = test::TestRequest::get()
        .uri(&format!("/api/generate-token?user={}", grin.repeat(50)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/generate-token?user={}", grin.repeat(51)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid user parameter"));
}

#[actix_web::test]
async fn test_generate_token_writes_one_audit_record() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = test::init_service(create_app(state_with_secret(Some(SECRET)))).await;
    let req = test::TestRequest::get()
        .uri("/api/generate-token?user=erin")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let output = logs.contents();
    let audit_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("token_audit:"))
        .collect();
    assert_eq!(audit_lines.len(), 1, "audit lines: {audit_lines:#?}");
    assert!(audit_lines[0].contains("erin"));
    assert!(!output.contains(SECRET));
}

/// In-memory log sink for inspecting subscriber output
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
