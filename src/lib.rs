//! # qlabel - Brother QL Label Printing
//!
//! qlabel renders short text labels and prints them on Brother QL label
//! printers. It provides:
//!
//! - **Rendering**: white label canvas with text at a fixed anchor
//! - **Raster conversion**: Brother QL raster jobs from PNG images
//! - **Transport**: raw TCP (port 9100) or a kernel printer device
//! - **HTTP service**: `/health`, `/print` and `/preview` behind an API key
//!
//! ## Quick Start
//!
//! ```no_run
//! use qlabel::{
//!     raster::{BrotherQlConverter, ConvertOptions, Converter},
//!     render,
//!     transport::NetworkTransport,
//! };
//!
//! // Render a label and encode it
//! let png = render::render_label("Shelf 4", 60, 1164, 1660, None)?.to_png()?;
//!
//! // Build the raster job for a 102x152 die-cut label
//! let job = BrotherQlConverter.convert(
//!     "QL-1060N",
//!     &[png.as_slice()],
//!     "102x152",
//!     &ConvertOptions::default(),
//! )?;
//!
//! // Send to printer
//! NetworkTransport::open("tcp://192.0.2.10")?.write_all(&job)?;
//!
//! # Ok::<(), qlabel::error::QlError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Label canvas, fonts and PNG encoding |
//! | [`raster`] | Image preparation and raster job assembly |
//! | [`protocol`] | Brother QL command builders and PackBits |
//! | [`printer`] | Model and label tables |
//! | [`transport`] | Communication backends |
//! | [`server`] | HTTP print service |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod render;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use error::QlError;
pub use printer::{Label, Model};
pub use transport::NetworkTransport;
