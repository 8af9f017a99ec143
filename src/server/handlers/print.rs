//! Label printing handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::error::QlError;
use crate::raster::ConvertOptions;
use crate::render::{self, DEFAULT_FONT_SIZE};

use super::super::debug_copy::save_debug_copy;
use super::super::error::ApiError;
use super::super::state::{AppState, ServerConfig};

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

/// JSON body of a print or preview request.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintRequest {
    /// Text to draw; may contain newlines
    pub text: String,
    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Image width in pixels; the configured default when absent or 0
    pub width: Option<u32>,
    /// Image height in pixels; the configured default when absent or 0
    pub height: Option<u32>,
    /// Label stock identifier; the configured default when absent or empty
    pub label: Option<String>,
}

/// A request with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelJob {
    pub text: String,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
    pub label: String,
}

impl PrintRequest {
    /// Fill omitted fields from the server configuration.
    pub fn resolve(self, config: &ServerConfig) -> LabelJob {
        LabelJob {
            text: self.text,
            font_size: self.font_size,
            width: self.width.filter(|w| *w > 0).unwrap_or(config.default_width),
            height: self.height.filter(|h| *h > 0).unwrap_or(config.default_height),
            label: self
                .label
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| config.default_label.clone()),
        }
    }
}

impl LabelJob {
    /// Render the label and encode it as PNG.
    pub fn render_png(&self, font_path: Option<&Path>) -> Result<Vec<u8>, QlError> {
        render::render_label(&self.text, self.font_size, self.width, self.height, font_path)?
            .to_png()
    }
}

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub status: &'static str,
    pub printer: String,
}

/// Handle POST /print - render the label and send it to the printer.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PrintRequest>,
) -> Result<Json<PrintResponse>, ApiError> {
    let Some(printer) = state.config.printer().map(str::to_string) else {
        return Err(ApiError::PrinterNotConfigured);
    };

    let job = request.resolve(&state.config);
    let span = info_span!(
        "print_job",
        job_id = %Uuid::new_v4(),
        printer = %printer,
        label = %job.label,
    );

    // Rendering, conversion and delivery all block
    let destination = printer.clone();
    let print_result = tokio::task::spawn_blocking(move || {
        span.in_scope(|| run_job(&state, &job, &destination))
    })
    .await;

    match print_result {
        Ok(Ok(())) => Ok(Json(PrintResponse {
            status: "sent",
            printer,
        })),
        Ok(Err(e)) => Err(e),
        Err(e) => {
            error!(error = %e, "Print task failed");
            Err(ApiError::Printer(format!("Task error: {}", e)))
        }
    }
}

/// Render, keep a debug copy, convert and send one label.
fn run_job(state: &AppState, job: &LabelJob, printer: &str) -> Result<(), ApiError> {
    let config = &state.config;
    let png = job
        .render_png(config.font_path.as_deref())
        .map_err(|e| ApiError::Render(e.to_string()))?;

    if let Some(path) = &config.debug_copy_path {
        let _ = save_debug_copy(path, &png);
    }

    deliver(state, &png, &job.label, printer).map_err(|e| {
        error!(error = %e, "Failed to print label");
        ApiError::Printer(e.to_string())
    })?;

    info!(bytes = png.len(), "Label sent");
    Ok(())
}

/// Convert the PNG into printer instructions and transmit them.
fn deliver(state: &AppState, png: &[u8], label: &str, printer: &str) -> Result<(), QlError> {
    let config = &state.config;
    let instructions = state
        .converter
        .convert(&config.model, &[png], label, &ConvertOptions::default())?;
    state.transport.send(&instructions, printer, config.backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(json: &str) -> PrintRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_fill_omitted_fields() {
        let job = request(r#"{"text": "HELLO"}"#).resolve(&ServerConfig::default());
        assert_eq!(
            job,
            LabelJob {
                text: "HELLO".to_string(),
                font_size: 60,
                width: 1164,
                height: 1660,
                label: "102x152".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_fields_win() {
        let job = request(r#"{"text": "A", "font_size": 30, "width": 696, "height": 271, "label": "62x29"}"#)
            .resolve(&ServerConfig::default());
        assert_eq!((job.font_size, job.width, job.height), (30, 696, 271));
        assert_eq!(job.label, "62x29");
    }

    #[test]
    fn test_zero_and_empty_mean_default() {
        let job = request(r#"{"text": "A", "width": 0, "height": 0, "label": ""}"#)
            .resolve(&ServerConfig::default());
        assert_eq!((job.width, job.height), (1164, 1660));
        assert_eq!(job.label, "102x152");
    }

    #[test]
    fn test_null_fields_mean_default() {
        let job = request(r#"{"text": "A", "width": null, "label": null}"#)
            .resolve(&ServerConfig::default());
        assert_eq!(job.width, 1164);
        assert_eq!(job.label, "102x152");
    }

    #[test]
    fn test_text_is_required() {
        assert!(serde_json::from_str::<PrintRequest>(r#"{"font_size": 10}"#).is_err());
    }

    #[test]
    fn test_render_png_uses_job_size() {
        let job = request(r#"{"text": "A", "width": 120, "height": 80}"#)
            .resolve(&ServerConfig::default());
        let png = job.render_png(None).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 80));
    }
}
