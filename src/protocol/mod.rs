//! # Brother QL Raster Protocol
//!
//! Low-level command builders for the raster protocol spoken by Brother QL
//! label printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Job control, media information, cutting and raster lines
//! - [`packbits`]: Raster line compression
//!
//! ## Usage Example
//!
//! ```
//! use qlabel::protocol::{commands, packbits};
//!
//! let mut data = Vec::new();
//! data.extend(commands::invalidate(200));
//! data.extend(commands::init());
//! data.extend(commands::switch_to_raster());
//! data.extend(commands::compression(true));
//!
//! // One blank 90-byte line
//! data.extend(commands::raster_line(&packbits::encode(&[0u8; 90])));
//!
//! data.extend(commands::print_page(true));
//! assert_eq!(data.last(), Some(&0x1A));
//! ```

pub mod commands;
pub mod packbits;
