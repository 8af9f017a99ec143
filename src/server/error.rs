//! HTTP error responses.
//!
//! Every failure leaves the server as a JSON body `{"detail": "<message>"}`
//! with the status code of its kind.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors a request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API key configured and the request did not present it
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// No printer destination configured
    #[error("PRINTER environment variable is not set")]
    PrinterNotConfigured,

    /// Conversion or delivery failed
    #[error("Printer error: {0}")]
    Printer(String),

    /// The label image could not be produced
    #[error("Failed to render label: {0}")]
    Render(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PrinterNotConfigured => StatusCode::BAD_REQUEST,
            ApiError::Printer(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
