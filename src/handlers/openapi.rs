//! OpenAPI specification and app factory.

use crate::{
    handlers::{
        error::ApiError, generate_token, get_metrics, health, token_preflight, verify_token,
        version,
    },
    middleware::{Cors, MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::{App, http::Method};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Stream Token API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Issues short-lived signed access tokens for external audio streaming servers.\n\n\
                ## Token format\n\
                - Payload: `user=<user>&exp=<expiry>` where `expiry` is a UNIX timestamp 60 seconds after issuance\n\
                - Signature: HMAC-SHA256 of the payload keyed by `TOKEN_SECRET`, lowercase hex\n\
                \n\
                ## Verification\n\
                The streaming server receives `token`, `user` and `expiry` as query parameters. \
                It recomputes the signature, compares it in constant time, and rejects the request \
                once the current time is past `expiry`.\n\
                \n\
                ## Configuration\n\
                - `TOKEN_SECRET`: shared signing key; issuance fails with 500 when unset\n\
                - `RATE_LIMIT_RPM` / `RATE_LIMIT_PERIOD`: per-client issuance budget\n\
                - `CORS_ALLOW_ORIGIN`: value of `Access-Control-Allow-Origin` (default `*`)"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the application around a shared [`AppState`]
///
/// Call once per worker; the state clones share the same limiter windows and
/// metric registry.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppState {
        config,
        token_service,
        limiter,
        metrics,
    } = state;

    let query_config = actix_web::web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid query: {err}")).into());

    App::new()
        .wrap(Cors::new(&config.cors))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(query_config)
        .app_data(web::Data::new(token_service))
        .app_data(web::Data::new(limiter))
        .app_data(web::Data::new(config.metrics.clone()))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(
            web::resource("/api/generate-token")
                .route(web::get().to(generate_token))
                .route(web::method(Method::OPTIONS).to(token_preflight)),
        )
        .service(
            web::resource("/api/verify-token")
                .route(web::get().to(verify_token))
                .route(web::method(Method::OPTIONS).to(token_preflight)),
        )
        .with_json_spec_at("/api/spec/v2")
        .build()
}
