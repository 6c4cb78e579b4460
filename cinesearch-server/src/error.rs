//! Error handling for the Cinesearch server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cinesearch::CinesearchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error type, e.g. `invalid_limit`
    pub error: String,
    /// Human readable description
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Cinesearch library error
    #[error(transparent)]
    Cinesearch(#[from] CinesearchError),

    /// Malformed request parameters
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Cinesearch(err) => match err {
                CinesearchError::EmptyQuery | CinesearchError::InvalidLimit { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CinesearchError::IndexUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                CinesearchError::IndexQueryError(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Cinesearch(err) => match err {
                CinesearchError::EmptyQuery => "empty_query",
                CinesearchError::InvalidLimit { .. } => "invalid_limit",
                CinesearchError::IndexUnavailable(_) => "index_unavailable",
                CinesearchError::IndexQueryError(_) => "index_query_error",
                CinesearchError::Configuration(_) => "configuration_error",
                CinesearchError::Logging(_) | CinesearchError::Other(_) => "internal_error",
            },
            ServerError::BadRequest(_) => "bad_request",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::Cinesearch(CinesearchError::InvalidLimit { limit, min, max }) => {
                Some(serde_json::json!({ "limit": limit, "min": min, "max": max }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(error = %self, "Request failed");
            } else {
                warn!(error = %self, status = status.as_u16(), "Search index failure");
            }
        }

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
