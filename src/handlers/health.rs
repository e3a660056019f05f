//! Health check endpoint handler.

use crate::{models::HealthResponse, services::token::TokenService};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Liveness of this service
///
/// Always 200 while the process serves requests; `token_issuance` tells
/// operators whether a signing secret was loaded.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns liveness and whether token issuance is configured.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health(req: HttpRequest) -> Result<web::Json<HealthResponse>, Error> {
    let configured = req
        .app_data::<web::Data<TokenService>>()
        .is_some_and(|service| service.is_configured());

    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
        token_issuance: if configured { "ready" } else { "unconfigured" }.to_string(),
    }))
}
