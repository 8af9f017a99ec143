//! # Rendering Module
//!
//! Composes the label image: a white bitmap of the requested size with the
//! request text drawn at a fixed anchor.
//!
//! ## Modules
//!
//! - [`canvas`]: White RGB canvas, text anchor, PNG encoding
//! - [`font`]: Outline font lookup with a built-in bitmap fallback
//!
//! ## Usage Example
//!
//! ```
//! use qlabel::render;
//!
//! let canvas = render::render_label("HELLO", 60, 1164, 1660, None).unwrap();
//! assert_eq!(canvas.image().dimensions(), (1164, 1660));
//!
//! let png = canvas.to_png().unwrap();
//! assert!(!png.is_empty());
//! ```

pub mod canvas;
pub mod font;

pub use canvas::{text_anchor, within_budget, LabelCanvas, DEFAULT_FONT_SIZE, MAX_CANVAS_BYTES};
pub use font::{LabelFont, FONT_CANDIDATES};

use std::path::Path;

use crate::error::QlError;

/// Build a label image: blank canvas, font lookup, text at the anchor.
///
/// Text that does not fit is clipped. Fails only when the canvas would
/// exceed [`MAX_CANVAS_BYTES`].
pub fn render_label(
    text: &str,
    font_size: u32,
    width: u32,
    height: u32,
    font_path: Option<&Path>,
) -> Result<LabelCanvas, QlError> {
    let mut canvas = LabelCanvas::new(width, height)?;
    let font = LabelFont::load(font_size, font_path);
    canvas.draw_text(text, &font, font_size);
    Ok(canvas)
}
