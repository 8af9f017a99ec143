//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::raster::{BrotherQlConverter, Converter};
use crate::transport::{Backend, PrinterTransport, Transport};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "QL-1060N";

/// Label stock used when neither the request nor the configuration names one.
pub const DEFAULT_LABEL: &str = "102x152";

/// Image size for a 102x152 label at 300 dpi.
pub const DEFAULT_SIZE: (u32, u32) = (1164, 1660);

/// Where the last rendered label is written when debug copies are on.
pub const DEBUG_COPY_PATH: &str = "/tmp/last_label.png";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Server configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8000")
    pub listen_addr: String,
    /// Printer destination (e.g., "tcp://192.0.2.10:9100")
    pub printer: Option<String>,
    /// Required value of the `x-api-key` header, if any
    pub api_key: Option<String>,
    /// Printer model identifier
    pub model: String,
    /// Label stock used when a request names none
    pub default_label: String,
    pub default_width: u32,
    pub default_height: u32,
    /// Debug copy destination; `None` disables the copy
    pub debug_copy_path: Option<PathBuf>,
    /// Font file tried before the system candidates
    pub font_path: Option<PathBuf>,
    pub backend: Backend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            printer: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            default_label: DEFAULT_LABEL.to_string(),
            default_width: DEFAULT_SIZE.0,
            default_height: DEFAULT_SIZE.1,
            debug_copy_path: Some(PathBuf::from(DEBUG_COPY_PATH)),
            font_path: None,
            backend: Backend::Network,
        }
    }
}

impl ServerConfig {
    /// Configured printer destination, if non-empty.
    pub fn printer(&self) -> Option<&str> {
        self.printer.as_deref().filter(|p| !p.is_empty())
    }

    pub fn printer_configured(&self) -> bool {
        self.printer().is_some()
    }

    /// Configured API key, if non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Write debug copies to `path`, or turn them off.
    pub fn with_debug_copy(self, enabled: bool, path: PathBuf) -> Self {
        Self {
            debug_copy_path: enabled.then_some(path),
            ..self
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub converter: Arc<dyn Converter>,
    pub transport: Arc<dyn Transport>,
}

impl AppState {
    /// State with the Brother QL converter and the default printer transport.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_backends(config, Arc::new(BrotherQlConverter), Arc::new(PrinterTransport))
    }

    /// State with caller-supplied collaborators.
    pub fn with_backends(
        config: ServerConfig,
        converter: Arc<dyn Converter>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            converter,
            transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.model, "QL-1060N");
        assert_eq!(config.default_label, "102x152");
        assert_eq!((config.default_width, config.default_height), (1164, 1660));
        assert_eq!(config.debug_copy_path, Some(PathBuf::from("/tmp/last_label.png")));
        assert!(!config.printer_configured());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = ServerConfig {
            printer: Some(String::new()),
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.printer_configured());
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_debug_copy_switch() {
        let path = PathBuf::from("/var/tmp/label.png");
        let off = ServerConfig::default().with_debug_copy(false, path.clone());
        assert_eq!(off.debug_copy_path, None);

        let on = ServerConfig::default().with_debug_copy(true, path.clone());
        assert_eq!(on.debug_copy_path, Some(path));
    }

    #[test]
    fn test_printer_configured() {
        let config = ServerConfig {
            printer: Some("tcp://192.0.2.10".to_string()),
            ..Default::default()
        };
        assert!(config.printer_configured());
        assert_eq!(config.printer(), Some("tcp://192.0.2.10"));
    }
}
