//! Label canvas: a white RGB bitmap with text placed at a fixed anchor.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use super::font::LabelFont;
use crate::error::QlError;

/// Default text size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 60;

/// Largest pixel buffer a label may allocate (256 MiB).
pub const MAX_CANVAS_BYTES: u64 = 256 * 1024 * 1024;

/// Top-left position of the label text.
///
/// `x = width / 10`, `y = height / 2 - font_size / 2`, each term divided
/// separately with integer division. Large fonts on short labels give a
/// negative `y`; the text is then partly off-canvas.
///
/// ```
/// use qlabel::render::text_anchor;
///
/// assert_eq!(text_anchor(1164, 1660, 60), (116, 800));
/// assert_eq!(text_anchor(100, 50, 200), (10, -75));
/// ```
#[inline]
pub fn text_anchor(width: u32, height: u32, font_size: u32) -> (i64, i64) {
    (
        width as i64 / 10,
        height as i64 / 2 - font_size as i64 / 2,
    )
}

/// Whether a `width` x `height` buffer of `bytes_per_pixel` fits in
/// [`MAX_CANVAS_BYTES`].
pub fn within_budget(width: u32, height: u32, bytes_per_pixel: u64) -> bool {
    (width as u64)
        .checked_mul(height as u64)
        .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
        .is_some_and(|bytes| bytes <= MAX_CANVAS_BYTES)
}

/// A label image being composed.
pub struct LabelCanvas {
    image: RgbImage,
}

impl LabelCanvas {
    /// Blank white canvas.
    ///
    /// Sizes whose RGB buffer would exceed [`MAX_CANVAS_BYTES`] are rejected
    /// before anything is allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, QlError> {
        if !within_budget(width, height, 3) {
            return Err(QlError::Image(format!(
                "Label size {}x{} exceeds the {} MiB image limit",
                width,
                height,
                MAX_CANVAS_BYTES / (1024 * 1024)
            )));
        }

        Ok(Self {
            image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
        })
    }

    /// Draw `text` with `font` at the label anchor for `font_size`.
    pub fn draw_text(&mut self, text: &str, font: &LabelFont, font_size: u32) {
        let (x, y) = text_anchor(self.image.width(), self.image.height(), font_size);
        font.draw(&mut self.image, text, x, y);
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, QlError> {
        let mut png_bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| QlError::Image(format!("PNG encoding failed: {}", e)))?;
        Ok(png_bytes)
    }
}
