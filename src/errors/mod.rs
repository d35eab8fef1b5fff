/// Unified error handling module
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("upstream transport error: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    #[error("upstream returned status {status} for {path}")]
    UpstreamStatus { status: u16, path: String },

    #[error("unexpected upstream payload: {0}")]
    UpstreamShape(String),

    #[error("malformed date: {0:?}")]
    MalformedDate(String),

    #[error("no dates available for collection {0}")]
    NoDatesAvailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::InvalidParameter(_) => "INVALID_PARAMETER",
            ApiError::UpstreamTransport(_) => "UPSTREAM_TRANSPORT",
            ApiError::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            ApiError::UpstreamShape(_) => "UPSTREAM_SHAPE",
            ApiError::MalformedDate(_) => "MALFORMED_DATE",
            ApiError::NoDatesAvailable(_) => "NO_DATES_AVAILABLE",
        }
    }

    /// Message shown to the caller. Upstream details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Configuration(_) => "NASA API key is not configured".to_string(),
            ApiError::InvalidParameter(msg) => msg.clone(),
            ApiError::UpstreamTransport(_)
            | ApiError::UpstreamStatus { .. }
            | ApiError::UpstreamShape(_) => "Failed to fetch data from NASA API".to_string(),
            ApiError::MalformedDate(_) => "Upstream returned an unexpected date".to_string(),
            ApiError::NoDatesAvailable(_) => "No EPIC dates available".to_string(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::InvalidParameter(err.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::InvalidParameter(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            warn!("rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
