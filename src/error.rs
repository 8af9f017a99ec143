//! # Error Types
//!
//! This module defines error types used throughout the qlabel library.

use thiserror::Error;

/// Main error type for qlabel operations
#[derive(Debug, Error)]
pub enum QlError {
    /// Transport-level errors (connection, I/O against the printer)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Printer model identifier not in the model table
    #[error("Unknown printer model: {0}")]
    UnknownModel(String),

    /// Label identifier not in the label table
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Label exists but the selected model cannot print it
    #[error("Label {label} is not supported by {model}")]
    UnsupportedLabel { label: String, model: String },

    /// Image does not fit the label or the job has no images
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for QlError {
    fn from(e: image::ImageError) -> Self {
        QlError::Image(e.to_string())
    }
}
