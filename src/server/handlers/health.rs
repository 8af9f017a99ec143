//! Liveness check.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub printer_configured: bool,
}

/// Handle GET /health. Never authenticated, never fails.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        printer_configured: state.config.printer_configured(),
    })
}
