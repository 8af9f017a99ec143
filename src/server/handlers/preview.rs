//! Label preview handler.

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::print::PrintRequest;

/// Handle POST /preview - return the label PNG without printing.
///
/// Takes the same body as `/print` and works without a printer configured.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PrintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let job = request.resolve(&state.config);
    let font_path = state.config.font_path.clone();

    let png_bytes = tokio::task::spawn_blocking(move || job.render_png(font_path.as_deref()))
        .await
        .map_err(|e| ApiError::Render(format!("Task error: {}", e)))?
        .map_err(|e| ApiError::Render(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
