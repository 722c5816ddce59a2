use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::types::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    Validation(String),

    /// An upstream or storage failure inside a pipeline. The message is
    /// passed through verbatim; this service runs behind trusted callers and
    /// the upstream detail is what makes the failure diagnosable.
    Pipeline(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Pipeline(msg) => write!(f, "Pipeline error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Pipeline(msg) => {
                tracing::error!("Pipeline error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorBody {
            success: false,
            error: error_message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Pipeline(format!("{err:#}"))
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn post_not_found() -> Self {
        ApiError::NotFound("Post not found".to_string())
    }
}
