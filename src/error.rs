//! Error types for the server
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these variants cover the request surface and the upstream
//! collaborators (PDF parsing, keyword model, SERP provider).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Provider credentials are unset or still placeholders
    #[error("{0}")]
    MissingCredentials(String),

    /// The uploaded PDF contained no usable text
    #[error("No text found in PDF.")]
    EmptyDocument,

    /// The uploaded file could not be parsed as a PDF
    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    /// Upstream HTTP failure or transport error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream replied with JSON of an unexpected shape
    #[error("{0}")]
    InvalidUpstreamResponse(String),

    /// The keyword model's reply was not a JSON array
    #[error("Failed to parse keyword JSON: {0}")]
    MalformedKeywords(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_)
            | AppError::MissingCredentials(_)
            | AppError::EmptyDocument
            | AppError::Pdf(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::InvalidUpstreamResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::MalformedKeywords(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the server.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidRequest("Keyword is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::EmptyDocument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Upstream("503".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::MalformedKeywords("not an array".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_user_facing() {
        let err = AppError::InvalidRequest("Keyword is required".into());
        assert_eq!(err.to_string(), "Keyword is required");
        assert_eq!(AppError::EmptyDocument.to_string(), "No text found in PDF.");
    }
}
