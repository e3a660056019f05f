//! Mapping of service failures onto JSON error responses.

use crate::{models::ErrorResponse, services::token::TokenError};
use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
};
use tracing::error;

/// Every failure an endpoint can report
///
/// The response body is always `{"error": "<message>"}`. Internal details are
/// logged, not returned.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    fn public_message(&self) -> String {
        match self {
            ApiError::Token(TokenError::Configuration) => {
                "Server configuration error: TOKEN_SECRET not set".to_string()
            }
            ApiError::Token(TokenError::Validation(reason)) => {
                format!("Invalid user parameter: {reason}")
            }
            ApiError::Token(TokenError::Internal(_)) => {
                "Internal server error while processing token".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Token(TokenError::Validation(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Token(TokenError::Configuration) => {
                error!("TOKEN_SECRET environment variable is not set");
            }
            ApiError::Token(TokenError::Internal(detail)) => {
                error!(detail = %detail, "Token computation failed");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code())
            .insert_header((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
            .json(ErrorResponse {
                error: self.public_message(),
            })
    }
}
