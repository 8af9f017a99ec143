//! # Image Preparation
//!
//! Turns a decoded label image into print-head lines:
//!
//! 1. **Fit**: rotate and/or resize so the image matches the label's
//!    printable area
//! 2. **Pad**: place it on a white strip as wide as the print head, offset
//!    from the right edge by the label's right margin
//! 3. **Threshold**: 1-bit conversion against a luma cut-off
//! 4. **Pack**: mirror each line (the head prints right-to-left as seen from
//!    the label) and pack 8 dots per byte, MSB first
//!
//! ## Rotation Semantics
//!
//! Angles are counter-clockwise. `Auto` leaves endless labels alone and turns
//! die-cut images by 90° when they are the printable area transposed.

use image::{imageops, Rgb, RgbImage};
use tracing::warn;

use crate::error::QlError;
use crate::printer::{FormFactor, Label, Model};

/// Rotation applied before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotate {
    /// Pick the rotation from the label geometry
    #[default]
    Auto,
    /// Fixed counter-clockwise rotation (0, 90, 180 or 270)
    Degrees(u16),
}

impl Rotate {
    fn apply(self, img: RgbImage) -> Result<RgbImage, QlError> {
        match self {
            Rotate::Auto | Rotate::Degrees(0) => Ok(img),
            Rotate::Degrees(90) => Ok(imageops::rotate270(&img)),
            Rotate::Degrees(180) => Ok(imageops::rotate180(&img)),
            Rotate::Degrees(270) => Ok(imageops::rotate90(&img)),
            Rotate::Degrees(other) => Err(QlError::InvalidImage(format!(
                "Unsupported rotation: {} degrees",
                other
            ))),
        }
    }
}

/// Convert a threshold percentage into a luma cut-off.
///
/// The cut-off applies to inverted luma: a pixel prints black when
/// `255 - luma >= cutoff`. 70% maps to 76, so luma 179 and darker is black.
#[inline]
pub fn threshold_cutoff(percent: u8) -> u8 {
    ((100 - percent.min(100)) as f32 / 100.0 * 255.0) as u8
}

/// Fit an image onto the print head for `label` on `model`.
///
/// The returned image is exactly `model.pixel_width()` wide.
pub fn fit_to_label(
    img: RgbImage,
    label: &Label,
    model: &Model,
    rotate: Rotate,
) -> Result<RgbImage, QlError> {
    let (printable_w, printable_h) = label.dots_printable;

    let img = match label.form_factor {
        FormFactor::Endless => {
            let img = rotate.apply(img)?;
            if img.width() != printable_w {
                let new_h = (printable_w as f64 / img.width() as f64 * img.height() as f64) as u32;
                warn!(
                    from = ?img.dimensions(),
                    to = ?(printable_w, new_h),
                    "Resizing image to the printable width of label {}",
                    label.identifier
                );
                imageops::resize(&img, printable_w, new_h.max(1), imageops::FilterType::Lanczos3)
            } else {
                img
            }
        }
        FormFactor::DieCut | FormFactor::RoundDieCut => {
            let img = match rotate {
                Rotate::Auto
                    if img.width() != printable_w
                        && img.dimensions() == (printable_h, printable_w) =>
                {
                    imageops::rotate270(&img)
                }
                other => other.apply(img)?,
            };
            if img.dimensions() != (printable_w, printable_h) {
                return Err(QlError::InvalidImage(format!(
                    "Bad image dimensions: {:?}. Expecting: {:?}.",
                    img.dimensions(),
                    (printable_w, printable_h)
                )));
            }
            img
        }
    };

    pad_to_head(&img, label.right_margin, model.pixel_width())
}

/// Place `img` on a white strip `head_width` dots wide, `right_margin` dots
/// from the right edge.
fn pad_to_head(img: &RgbImage, right_margin: u32, head_width: u32) -> Result<RgbImage, QlError> {
    let x = head_width
        .checked_sub(img.width() + right_margin)
        .ok_or_else(|| {
            QlError::InvalidImage(format!(
                "Image width {} plus margin {} exceeds print head width {}",
                img.width(),
                right_margin,
                head_width
            ))
        })?;

    let mut strip = RgbImage::from_pixel(head_width, img.height(), Rgb([255, 255, 255]));
    imageops::overlay(&mut strip, img, x as i64, 0);
    Ok(strip)
}

/// Threshold and pack every line of a padded image.
///
/// Each returned line holds `img.width() / 8` bytes (rounded up).
pub fn raster_rows(img: &RgbImage, cutoff: u8) -> Vec<Vec<u8>> {
    let width = img.width();
    let mut line = vec![false; width as usize];

    (0..img.height())
        .map(|y| {
            for x in 0..width {
                // Mirror: head dot 0 is the image's rightmost column
                let Rgb([r, g, b]) = *img.get_pixel(width - 1 - x, y);
                line[x as usize] = 255 - luma(r, g, b) >= cutoff;
            }
            pack_row(&line)
        })
        .collect()
}

/// ITU-R 601-2 luma, as used for L-mode conversion.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Pack a row of boolean pixels into bytes.
///
/// - Bit 7 (MSB) = first dot
/// - 1 = black (print dot), 0 = white
///
/// A row whose length is not a multiple of 8 is padded with white.
///
/// ```
/// use qlabel::raster::prepare::pack_row;
///
/// let row = vec![true, true, false, false, true, false, true, false];
/// assert_eq!(pack_row(&row), vec![0b11001010]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn white(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    fn ql1060() -> &'static Model {
        Model::by_name("QL-1060N").unwrap()
    }

    #[test]
    fn test_threshold_cutoff() {
        assert_eq!(threshold_cutoff(70), 76);
        assert_eq!(threshold_cutoff(0), 255);
        assert_eq!(threshold_cutoff(100), 0);
    }

    #[test]
    fn test_die_cut_exact_size_is_padded_to_head() {
        let label = Label::by_identifier("102x152").unwrap();
        let fitted = fit_to_label(white(1164, 1660), label, ql1060(), Rotate::Auto).unwrap();
        assert_eq!(fitted.dimensions(), (1296, 1660));
    }

    #[test]
    fn test_die_cut_transposed_is_rotated() {
        let label = Label::by_identifier("102x152").unwrap();
        let fitted = fit_to_label(white(1660, 1164), label, ql1060(), Rotate::Auto).unwrap();
        assert_eq!(fitted.dimensions(), (1296, 1660));
    }

    #[test]
    fn test_die_cut_wrong_size_is_rejected() {
        let label = Label::by_identifier("102x152").unwrap();
        let err = fit_to_label(white(1000, 1000), label, ql1060(), Rotate::Auto).unwrap_err();
        assert!(err.to_string().contains("Bad image dimensions"));
    }

    #[test]
    fn test_die_cut_explicit_zero_skips_auto_rotation() {
        let label = Label::by_identifier("102x152").unwrap();
        assert!(fit_to_label(white(1660, 1164), label, ql1060(), Rotate::Degrees(0)).is_err());
    }

    #[test]
    fn test_endless_is_resized_to_printable_width() {
        let label = Label::by_identifier("62").unwrap();
        let model = Model::by_name("QL-700").unwrap();
        let fitted = fit_to_label(white(348, 100), label, model, Rotate::Auto).unwrap();
        assert_eq!(fitted.dimensions(), (720, 200));
    }

    #[test]
    fn test_unsupported_rotation() {
        let label = Label::by_identifier("62").unwrap();
        let model = Model::by_name("QL-700").unwrap();
        assert!(fit_to_label(white(696, 10), label, model, Rotate::Degrees(45)).is_err());
    }

    #[test]
    fn test_image_lands_right_margin_from_right_edge() {
        let label = Label::by_identifier("62").unwrap();
        let model = Model::by_name("QL-700").unwrap();
        let mut img = white(696, 1);
        // Rightmost column black
        img.put_pixel(695, 0, Rgb([0, 0, 0]));

        let fitted = fit_to_label(img, label, model, Rotate::Auto).unwrap();
        assert_eq!(fitted.get_pixel(720 - 12 - 1, 0), &Rgb([0, 0, 0]));

        // Mirrored: the image's right edge is head dot 12
        let rows = raster_rows(&fitted, threshold_cutoff(70));
        assert_eq!(rows[0].len(), 90);
        assert_eq!(rows[0][1], 0b0000_1000);
        assert_eq!(rows[0].iter().map(|b| b.count_ones()).sum::<u32>(), 1);
    }

    #[test]
    fn test_threshold_splits_grays() {
        let mut img = white(8, 1);
        img.put_pixel(0, 0, Rgb([179, 179, 179]));
        img.put_pixel(1, 0, Rgb([180, 180, 180]));
        let rows = raster_rows(&img, threshold_cutoff(70));
        // Mirrored: pixel 0 is the last dot
        assert_eq!(rows, vec![vec![0b0000_0001]]);
    }

    #[test]
    fn test_light_anti_aliased_gray_prints_black() {
        let mut img = white(8, 1);
        // Luma 150: well above 76, still dark enough at 70%
        img.put_pixel(7, 0, Rgb([150, 150, 150]));
        assert_eq!(raster_rows(&img, threshold_cutoff(70)), vec![vec![0b1000_0000]]);
    }

    #[test]
    fn test_threshold_extremes() {
        let mut img = white(8, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([254, 254, 254]));
        // 0%: only pure black prints
        assert_eq!(raster_rows(&img, threshold_cutoff(0)), vec![vec![0b0000_0001]]);
        // 100%: everything prints
        assert_eq!(raster_rows(&img, threshold_cutoff(100)), vec![vec![0xFF]]);
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
        assert!(pack_row(&[]).is_empty());
    }
}
