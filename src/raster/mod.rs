//! # Raster Conversion
//!
//! Converts encoded label images (PNG, or anything the `image` crate can
//! decode) into a complete Brother QL raster job.
//!
//! The [`Converter`] trait is the seam the HTTP handler depends on;
//! [`BrotherQlConverter`] is the implementation used in production.
//!
//! ## Example
//!
//! ```
//! use image::{ImageFormat, Rgb, RgbImage};
//! use qlabel::raster::{BrotherQlConverter, ConvertOptions, Converter};
//! use std::io::Cursor;
//!
//! let img = RgbImage::from_pixel(696, 50, Rgb([255, 255, 255]));
//! let mut png = Vec::new();
//! img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
//!
//! let job = BrotherQlConverter
//!     .convert("QL-720NW", &[png.as_slice()], "62", &ConvertOptions::default())
//!     .unwrap();
//! assert_eq!(job.last(), Some(&0x1A));
//! ```

pub mod prepare;

use tracing::debug;

use crate::error::QlError;
use crate::printer::{Label, Model};
use crate::protocol::commands::{self, MediaInfo};
use crate::protocol::packbits;

pub use prepare::Rotate;

/// Processing flags for a conversion.
///
/// The default is what the print service always sends: automatic rotation,
/// compression, high quality and a cut after the job, with a 70% threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub rotate: Rotate,
    pub compress: bool,
    pub hq: bool,
    pub cut: bool,
    /// Threshold percentage for 1-bit conversion
    pub threshold: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rotate: Rotate::Auto,
            compress: true,
            hq: true,
            cut: true,
            threshold: 70,
        }
    }
}

/// Produces device raster instructions from encoded images.
pub trait Converter: Send + Sync {
    /// Convert `images` (one label each) into a single raster job.
    fn convert(
        &self,
        model: &str,
        images: &[&[u8]],
        label: &str,
        options: &ConvertOptions,
    ) -> Result<Vec<u8>, QlError>;
}

/// Brother QL raster converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrotherQlConverter;

impl Converter for BrotherQlConverter {
    fn convert(
        &self,
        model: &str,
        images: &[&[u8]],
        label: &str,
        options: &ConvertOptions,
    ) -> Result<Vec<u8>, QlError> {
        let model = Model::by_name(model).ok_or_else(|| QlError::UnknownModel(model.to_string()))?;
        let label = Label::by_identifier(label).ok_or_else(|| QlError::UnknownLabel(label.to_string()))?;
        if !label.supports_model(model.name) {
            return Err(QlError::UnsupportedLabel {
                label: label.identifier.to_string(),
                model: model.name.to_string(),
            });
        }
        if images.is_empty() {
            return Err(QlError::InvalidImage("No images to print".to_string()));
        }

        let mut data = Vec::new();
        data.extend(commands::invalidate(model.invalidate_bytes));
        data.extend(commands::init());
        if model.mode_setting {
            data.extend(commands::switch_to_raster());
        }

        let media = MediaInfo {
            media_type: label.form_factor.media_type(),
            width_mm: label.tape_size.0,
            length_mm: label.tape_size.1,
            high_quality: options.hq,
        };
        let compress = options.compress && model.compression;
        let cutoff = prepare::threshold_cutoff(options.threshold);

        for (page, encoded) in images.iter().enumerate() {
            let img = image::load_from_memory(encoded)?.to_rgb8();
            let img = prepare::fit_to_label(img, label, model, options.rotate)?;
            let rows = prepare::raster_rows(&img, cutoff);

            data.extend(commands::print_information(&media, rows.len() as u32, page == 0));
            if options.cut && model.cutting {
                data.extend(commands::autocut(true));
                data.extend(commands::cut_every(1));
            }
            if model.expanded_mode {
                data.extend(commands::expanded_mode(options.cut));
            }
            data.extend(commands::margins(label.feed_margin));
            if compress {
                data.extend(commands::compression(true));
            }

            for row in &rows {
                if compress {
                    data.extend(commands::raster_line(&packbits::encode(row)));
                } else {
                    data.extend(commands::raster_line(row));
                }
            }

            data.extend(commands::print_page(page + 1 == images.len()));
        }

        debug!(
            model = model.name,
            label = label.identifier,
            pages = images.len(),
            bytes = data.len(),
            "Converted raster job"
        );

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn uncompressed() -> ConvertOptions {
        ConvertOptions {
            compress: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_job_layout() {
        let image = png(1164, 1660);
        let job = BrotherQlConverter
            .convert("QL-1060N", &[image.as_slice()], "102x152", &uncompressed())
            .unwrap();

        assert!(job[..200].iter().all(|&b| b == 0));
        assert_eq!(&job[200..202], &[0x1B, 0x40]);
        assert_eq!(&job[202..206], &[0x1B, 0x69, 0x61, 0x01]);
        // ESC i z with 1660 lines
        assert_eq!(&job[206..209], &[0x1B, 0x69, 0x7A]);
        assert_eq!(&job[213..217], &1660u32.to_le_bytes());

        let header = 200 + 2 + 4 + 13 + 4 + 4 + 4 + 5;
        let line = 3 + 162;
        assert_eq!(job.len(), header + 1660 * line + 1);
        assert_eq!(&job[header..header + 3], &[0x67, 0x00, 162]);
        assert_eq!(job.last(), Some(&0x1A));
    }

    #[test]
    fn test_compressed_job_is_smaller() {
        let image = png(1164, 1660);
        let job = BrotherQlConverter
            .convert("QL-1060N", &[image.as_slice()], "102x152", &ConvertOptions::default())
            .unwrap();
        assert!(job.len() < 200 + 1660 * 20);
        assert!(job.windows(2).any(|w| w == [0x4D, 0x02]));
    }

    #[test]
    fn test_model_without_mode_setting_or_compression() {
        let image = png(696, 10);
        let job = BrotherQlConverter
            .convert("QL-700", &[image.as_slice()], "62", &ConvertOptions::default())
            .unwrap();
        // No ESC i a, straight to ESC i z
        assert_eq!(&job[202..205], &[0x1B, 0x69, 0x7A]);
        // Compression requested but unsupported: raw 90-byte lines
        assert!(job.windows(3).any(|w| w == [0x67, 0x00, 90]));
    }

    #[test]
    fn test_multiple_pages() {
        let image = png(696, 10);
        let job = BrotherQlConverter
            .convert("QL-720NW", &[image.as_slice(), image.as_slice()], "62", &uncompressed())
            .unwrap();
        let page_ends: Vec<u8> = job
            .iter()
            .copied()
            .filter(|&b| b == 0x0C || b == 0x1A)
            .collect();
        // Raster data of these images never contains 0x0C / 0x1A
        assert_eq!(page_ends, vec![0x0C, 0x1A]);
    }

    #[test]
    fn test_unknown_model() {
        let image = png(10, 10);
        let err = BrotherQlConverter
            .convert("QL-9000", &[image.as_slice()], "62", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, QlError::UnknownModel(_)));
    }

    #[test]
    fn test_unknown_label() {
        let image = png(10, 10);
        let err = BrotherQlConverter
            .convert("QL-1060N", &[image.as_slice()], "999x1", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, QlError::UnknownLabel(_)));
    }

    #[test]
    fn test_wide_label_on_narrow_model() {
        let image = png(1164, 1660);
        let err = BrotherQlConverter
            .convert("QL-700", &[image.as_slice()], "102x152", &ConvertOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Label 102x152 is not supported by QL-700");
    }

    #[test]
    fn test_undecodable_image() {
        let err = BrotherQlConverter
            .convert("QL-1060N", &[b"not a png".as_slice()], "102x152", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, QlError::Image(_)));
    }

    #[test]
    fn test_no_images() {
        let err = BrotherQlConverter
            .convert("QL-1060N", &[], "102x152", &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, QlError::InvalidImage(_)));
    }
}
