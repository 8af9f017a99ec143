//! Shared-secret API key check.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use super::error::ApiError;
use super::state::AppState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request unless it carries the configured API key.
///
/// With no key configured every request passes. Runs before the body is
/// read, so a rejected request never reaches rendering or the printer.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.config.api_key() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            warn!(path = %request.uri().path(), "Rejected request with missing or invalid API key");
            return Err(ApiError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}
