//! Web Host Error Types
//!
//! Errors raised while hosting the UI or forwarding `/api` calls, and their
//! conversion to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Web host error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// The analysis backend could not be reached
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend did not answer in time
    #[error("Backend timeout")]
    BackendTimeout,

    /// The incoming request could not be forwarded
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::BackendUnavailable(_) => (StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE"),
            ServerError::BackendTimeout => (StatusCode::GATEWAY_TIMEOUT, "BACKEND_TIMEOUT"),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ServerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Proxy error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ServerError::BackendUnavailable("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ServerError::BackendTimeout.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let response = ServerError::BadRequest("method".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
