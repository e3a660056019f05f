use actix_web::HttpServer;
use stream_token_api::{AppConfig, AppState, ServerConfig, create_app, telemetry};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let server = ServerConfig::from_env();
    telemetry::init_tracing(server.json_logs);

    let state = AppState::new(AppConfig::from_env()).map_err(std::io::Error::other)?;

    info!(
        bind_address = %server.bind_address,
        token_issuance = state.token_service.is_configured(),
        "Stream token API starting"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&server.bind_address)?
        .run()
        .await
}
