//! # HTTP Label Print Service
//!
//! Accepts print requests over HTTP, renders a text label and sends it to a
//! Brother QL printer.
//!
//! ## Routes
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | GET | `/health` | no | Liveness and whether a printer is configured |
//! | POST | `/print` | `x-api-key` | Render and print a label |
//! | POST | `/preview` | `x-api-key` | Render a label and return the PNG |
//!
//! ## Usage
//!
//! ```bash
//! PRINTER=tcp://192.0.2.10 API_KEY=secret qlabel serve --listen 0.0.0.0:8000
//! ```

pub mod auth;
pub mod debug_copy;
pub mod error;
mod handlers;
pub mod state;

pub use error::ApiError;
pub use handlers::print::{LabelJob, PrintRequest};
pub use state::{AppState, ServerConfig};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::QlError;

/// Build the application router.
///
/// `/print` and `/preview` sit behind the API key check; `/health` does not.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/print", post(handlers::print::print))
        .route("/preview", post(handlers::preview::preview))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use qlabel::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), qlabel::error::QlError> {
/// let config = ServerConfig {
///     printer: Some("tcp://192.0.2.10".to_string()),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), QlError> {
    let listen_addr = config.listen_addr.clone();

    info!(
        listen = %listen_addr,
        model = %config.model,
        label = %config.default_label,
        backend = %config.backend,
        auth = config.api_key().is_some(),
        "Label print service starting"
    );
    match config.printer() {
        Some(printer) => info!(%printer, "Printer configured"),
        None => warn!("PRINTER is not set; /print will be rejected"),
    }

    let app = router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| QlError::Transport(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| QlError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
