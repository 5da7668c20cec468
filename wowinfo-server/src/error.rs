//! API error type and its mapping onto HTTP status codes.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use wowinfo_rag::RagError;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or missing required input.
    #[error("{0}")]
    BadRequest(String),

    /// Admin authentication failed.
    #[error("{0}")]
    Unauthorized(String),

    /// A referenced document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An upstream service (vector store or model API) failed.
    #[error("{0}")]
    Upstream(String),

    /// An upstream service did not answer within its bounded timeout.
    #[error("{0}")]
    UpstreamTimeout(String),

    /// An unexpected server-side failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Basic"));
        }
        response
    }
}

impl From<RagError> for ApiError {
    fn from(e: RagError) -> Self {
        match e {
            RagError::InvalidInput(message) => ApiError::BadRequest(message),
            RagError::Timeout { .. } => ApiError::UpstreamTimeout(e.to_string()),
            RagError::EmbeddingError { .. }
            | RagError::StoreError { .. }
            | RagError::GenerationError(_) => ApiError::Upstream(e.to_string()),
            RagError::ConfigError(_) | RagError::DataLoadError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}
