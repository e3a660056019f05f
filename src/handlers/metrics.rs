//! Metrics endpoint handler.

use crate::{config::MetricsConfig, handlers::error::ApiError, services::AppMetrics};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Prometheus scrape endpoint
#[api_v2_operation(
    summary = "Prometheus Metrics Endpoint",
    description = "Returns Prometheus-formatted request and token metrics.",
    tags("Metrics"),
    responses(
        (status = 200, description = "Prometheus metrics in text format", content_type = "text/plain"),
        (status = 503, description = "Metrics collection disabled")
    )
)]
pub async fn get_metrics(req: HttpRequest) -> Result<HttpResponse, Error> {
    if req
        .app_data::<web::Data<MetricsConfig>>()
        .is_some_and(|config| !config.enabled)
    {
        return Err(ApiError::Unavailable("Metrics collection is disabled".to_string()).into());
    }

    let metrics = req
        .app_data::<web::Data<AppMetrics>>()
        .ok_or_else(|| ApiError::Unavailable("Metrics not available".to_string()))?;

    let output = metrics.render().map_err(|e| {
        tracing::error!(error = %e, "Failed to render metrics");
        ApiError::Unavailable("Failed to render metrics".to_string())
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(output))
}
