//! Font lookup and text drawing for label images.
//!
//! Outline fonts are loaded from disk with `ab_glyph` and drawn
//! anti-aliased. When none of the candidate files can be loaded, text is
//! drawn with the built-in Spleen 12x24 bitmap font, scaled to the requested
//! size, so a label always gets some usable font.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::RgbImage;
use spleen_font::{PSF2Font, FONT_12X24};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::canvas::within_budget;

/// Outline fonts tried in order before falling back to the bitmap font.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "arial.ttf",
];

/// Extra pixels between lines of multi-line text.
const LINE_SPACING: f32 = 4.0;

const SPLEEN_W: u32 = 12;
const SPLEEN_H: u32 = 24;

/// A font loaded at a fixed pixel size.
pub enum LabelFont {
    /// TrueType/OpenType font from disk
    Outline {
        font: FontVec,
        scale: PxScale,
        path: PathBuf,
    },
    /// Built-in Spleen bitmap font, glyph cells `size / 2` × `size` pixels
    Bitmap { size: u32 },
}

impl LabelFont {
    /// Load a font at `size` px, trying `extra` first and then
    /// [`FONT_CANDIDATES`].
    pub fn load(size: u32, extra: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = extra
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
            .collect();
        Self::load_from(size, &candidates)
    }

    /// Load the first readable font in `candidates`, or the bitmap font.
    pub fn load_from(size: u32, candidates: &[PathBuf]) -> Self {
        for path in candidates {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            let Ok(font) = FontVec::try_from_vec(bytes) else {
                continue;
            };

            // Size is the em height, as in point-size font APIs
            let scale = font
                .pt_to_px_scale(size as f32)
                .unwrap_or_else(|| PxScale::from(size as f32));
            debug!(path = %path.display(), size, "Loaded outline font");
            return LabelFont::Outline {
                font,
                scale,
                path: path.clone(),
            };
        }

        debug!(size, "No outline font found, using built-in bitmap font");
        LabelFont::Bitmap { size }
    }

    /// Whether this is the built-in fallback.
    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Bitmap { .. })
    }

    /// Draw `text` in black with its top-left corner at (`x`, `y`).
    ///
    /// `\n` starts a new line. Pixels outside the image are clipped.
    pub fn draw(&self, img: &mut RgbImage, text: &str, x: i64, y: i64) {
        match self {
            LabelFont::Outline { font, scale, .. } => draw_outline(img, font, *scale, text, x, y),
            LabelFont::Bitmap { size } => draw_bitmap(img, *size, text, x, y),
        }
    }
}

fn draw_outline(img: &mut RgbImage, font: &FontVec, scale: PxScale, text: &str, x: i64, y: i64) {
    let scaled = font.as_scaled(scale);
    let line_advance = scaled.height() + scaled.line_gap() + LINE_SPACING;

    for (line_no, line) in text.split('\n').enumerate() {
        let baseline = y as f32 + scaled.ascent() + line_no as f32 * line_advance;
        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                if bounds.max.x < 0.0
                    || bounds.max.y < 0.0
                    || bounds.min.x >= img.width() as f32
                    || bounds.min.y >= img.height() as f32
                {
                    continue;
                }
                // Coverage is rasterized for the whole glyph, one f32 per pixel
                if !within_budget(bounds.width().ceil() as u32, bounds.height().ceil() as u32, 4) {
                    debug!(%ch, width = bounds.width(), height = bounds.height(), "Skipping oversized glyph");
                    continue;
                }
                outlined.draw(|px, py, coverage| {
                    darken(
                        img,
                        bounds.min.x as i64 + px as i64,
                        bounds.min.y as i64 + py as i64,
                        coverage,
                    );
                });
            }
        }
    }
}

fn draw_bitmap(img: &mut RgbImage, size: u32, text: &str, x: i64, y: i64) {
    let cell_w = (size.saturating_mul(SPLEEN_W) / SPLEEN_H).max(1);
    let cell_h = size.max(1);
    let line_advance = cell_h as i64 + LINE_SPACING as i64;
    let (img_w, img_h) = (img.width() as i64, img.height() as i64);
    let mut spleen = PSF2Font::new(FONT_12X24).ok();

    for (line_no, line) in text.split('\n').enumerate() {
        let top = y + line_no as i64 * line_advance;
        if top >= img_h {
            break;
        }
        let rows = visible(top, cell_h, img_h);
        let mut left = x;

        for ch in line.chars() {
            if left >= img_w {
                break;
            }
            let cell_left = left;
            let cols = visible(cell_left, cell_w, img_w);
            left += cell_w as i64;
            if rows.is_empty() || cols.is_empty() {
                continue;
            }

            let bitmap = spleen.as_mut().and_then(|font| spleen_glyph(font, ch));
            for dy in rows.clone() {
                for dx in cols.clone() {
                    let on = match &bitmap {
                        Some(bits) => {
                            let sx = (dx as u64 * SPLEEN_W as u64 / cell_w as u64) as usize;
                            let sy = (dy as u64 * SPLEEN_H as u64 / cell_h as u64) as usize;
                            bits[sy][sx]
                        }
                        // Box for glyphs the font lacks
                        None => dx == 0 || dy == 0 || dx == cell_w - 1 || dy == cell_h - 1,
                    };
                    if on {
                        darken(img, cell_left + dx as i64, top + dy as i64, 1.0);
                    }
                }
            }
        }
    }
}

/// Offsets within a cell of `len` pixels starting at `start` that land
/// inside `0..limit`.
fn visible(start: i64, len: u32, limit: i64) -> std::ops::Range<u32> {
    let from = (-start).clamp(0, len as i64) as u32;
    let to = (limit - start).clamp(0, len as i64) as u32;
    from..to.max(from)
}

/// Collect the 12x24 Spleen bitmap for `ch`.
fn spleen_glyph(font: &mut PSF2Font, ch: char) -> Option<[[bool; 12]; 24]> {
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;

    let mut bits = [[false; 12]; 24];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < 24 && col_x < 12 {
                bits[row_y][col_x] = on;
            }
        }
    }
    Some(bits)
}

/// Blend black over the pixel at (`x`, `y`) with the given coverage.
fn darken(img: &mut RgbImage, x: i64, y: i64, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let keep = 1.0 - coverage.clamp(0.0, 1.0);
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for channel in pixel.0.iter_mut() {
        *channel = (*channel as f32 * keep).round() as u8;
    }
}
