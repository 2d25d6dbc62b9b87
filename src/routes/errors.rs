use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::core::SelectError;
use crate::models::ErrorResponse;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid location. Provide latitude and longitude.")]
    InvalidLocation(String),

    #[error("Invalid time. Provide a valid timestamp.")]
    InvalidTimestamp(String),

    #[error("No suitable stop found.")]
    NotFound(#[from] SelectError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidLocation(_) => "invalid_location",
            ApiError::InvalidTimestamp(_) => "invalid_time",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidJson(_) => "invalid_json",
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::InvalidLocation(detail)
            | ApiError::InvalidTimestamp(detail)
            | ApiError::InvalidJson(detail) => detail.clone(),
            ApiError::NotFound(reason) => reason.to_string(),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            message: format!("{}: {}", self.kind(), self.detail()),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}
