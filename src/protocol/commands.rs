//! # Brother QL Raster Commands
//!
//! This module implements the raster command set understood by Brother QL
//! label printers (QL-500 through QL-1115NWB).
//!
//! ## Job Structure
//!
//! ```text
//! 00 00 ... 00          invalidate (200 or 400 bytes)
//! ESC @                 initialize
//! ESC i a 01            switch to raster mode
//! ┌ per page ───────────────────────────────────────────┐
//! │ ESC i z ...         print information (media, lines) │
//! │ ESC i M / ESC i A   autocut, cut every n labels      │
//! │ ESC i K             expanded mode (cut at end)       │
//! │ ESC i d             margin (feed)                    │
//! │ M 02                enable PackBits compression      │
//! │ g 00 n data         raster line × height             │
//! │ FF / SUB            print (FF between pages, SUB last)│
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Byte Order
//!
//! Multi-byte integers are **little-endian**.
//!
//! ## Reference
//!
//! Based on the "Raster Command Reference" for the QL-800/810W/820NWB and
//! QL-1100/1110NWB/1115NWB series by Brother Industries, Ltd.

// ============================================================================
// CONTROL CHARACTERS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// FF (Form Feed) - Print page, more pages follow
pub const FF: u8 = 0x0C;

/// SUB - Print page with feeding; ends the job
pub const SUB: u8 = 0x1A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Invalidate
///
/// A run of NUL bytes that flushes any half-received command out of the
/// printer's input buffer. Sent once at the start of every job.
///
/// ## Example
///
/// ```
/// use qlabel::protocol::commands;
///
/// assert_eq!(commands::invalidate(200).len(), 200);
/// ```
pub fn invalidate(count: usize) -> Vec<u8> {
    vec![0x00; count]
}

/// # Initialize (ESC @)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Switch Dynamic Command Mode (ESC i a)
///
/// Selects raster mode (`01`). Only models with mode setting need it;
/// the others are permanently in raster mode.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i a 01 |
/// | Hex     | 1B 69 61 01 |
#[inline]
pub fn switch_to_raster() -> Vec<u8> {
    vec![ESC, b'i', b'a', 0x01]
}

// ============================================================================
// PRINT INFORMATION (ESC i z)
// ============================================================================

/// Valid-flag bits for `ESC i z`.
const PI_KIND: u8 = 0x02;
const PI_WIDTH: u8 = 0x04;
const PI_LENGTH: u8 = 0x08;
const PI_QUALITY: u8 = 0x40;
const PI_RECOVER: u8 = 0x80;

/// Media description carried by `ESC i z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaInfo {
    /// `0x0A` endless, `0x0B` die-cut
    pub media_type: u8,
    /// Tape width in mm
    pub width_mm: u8,
    /// Label length in mm (0 for endless)
    pub length_mm: u8,
    /// Prioritise print quality over speed
    pub high_quality: bool,
}

/// # Print Information Command (ESC i z)
///
/// | Byte | Meaning |
/// |------|---------|
/// | 0-2  | `1B 69 7A` |
/// | 3    | Valid flags (recover, kind, width, length, quality) |
/// | 4    | Media type |
/// | 5    | Media width (mm) |
/// | 6    | Media length (mm) |
/// | 7-10 | Raster line count, u32 LE |
/// | 11   | 0 = first page, 1 = other pages |
/// | 12   | Fixed 0 |
///
/// ## Example
///
/// ```
/// use qlabel::protocol::commands::{print_information, MediaInfo};
///
/// let media = MediaInfo { media_type: 0x0A, width_mm: 62, length_mm: 0, high_quality: true };
/// let cmd = print_information(&media, 0x0100, true);
/// assert_eq!(&cmd[..4], &[0x1B, 0x69, 0x7A, 0xCE]);
/// assert_eq!(&cmd[7..11], &[0x00, 0x01, 0x00, 0x00]);
/// ```
pub fn print_information(media: &MediaInfo, raster_lines: u32, first_page: bool) -> Vec<u8> {
    let mut flags = PI_RECOVER | PI_KIND | PI_WIDTH | PI_LENGTH;
    if media.high_quality {
        flags |= PI_QUALITY;
    }

    let mut cmd = Vec::with_capacity(13);
    cmd.extend_from_slice(&[ESC, b'i', b'z', flags]);
    cmd.push(media.media_type);
    cmd.push(media.width_mm);
    cmd.push(media.length_mm);
    cmd.extend_from_slice(&raster_lines.to_le_bytes());
    cmd.push(if first_page { 0 } else { 1 });
    cmd.push(0);
    cmd
}

// ============================================================================
// CUTTING
// ============================================================================

/// # Various Mode Settings (ESC i M)
///
/// Bit 6 enables the automatic cutter.
#[inline]
pub fn autocut(enabled: bool) -> Vec<u8> {
    vec![ESC, b'i', b'M', if enabled { 0x40 } else { 0x00 }]
}

/// # Cut Every N Labels (ESC i A n)
#[inline]
pub fn cut_every(n: u8) -> Vec<u8> {
    vec![ESC, b'i', b'A', n]
}

/// # Expanded Mode (ESC i K)
///
/// Bit 3 cuts after the last label of the job.
#[inline]
pub fn expanded_mode(cut_at_end: bool) -> Vec<u8> {
    let mut flags = 0u8;
    if cut_at_end {
        flags |= 1 << 3;
    }
    vec![ESC, b'i', b'K', flags]
}

/// # Specify Margin Amount (ESC i d n1 n2)
///
/// Feed margin in dots, u16 LE. Endless stock uses 35, die-cut uses 0.
#[inline]
pub fn margins(dots: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(dots);
    vec![ESC, b'i', b'd', lo, hi]
}

// ============================================================================
// RASTER DATA
// ============================================================================

/// # Select Compression Mode (M n)
///
/// `02` selects TIFF (PackBits) compression for the following `g` lines,
/// `00` disables it.
#[inline]
pub fn compression(enabled: bool) -> Vec<u8> {
    vec![b'M', if enabled { 0x02 } else { 0x00 }]
}

/// # Raster Graphics Transfer (g 00 n d1...dn)
///
/// One line of the print head. `data` is either the raw line
/// (`bytes_per_row` bytes, MSB = leftmost dot as the head sees it) or its
/// PackBits encoding when compression is on.
///
/// ## Example
///
/// ```
/// use qlabel::protocol::commands;
///
/// let cmd = commands::raster_line(&[0xFF, 0x00]);
/// assert_eq!(cmd, vec![0x67, 0x00, 0x02, 0xFF, 0x00]);
/// ```
pub fn raster_line(data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() <= u8::MAX as usize,
        "Raster line must fit in one length byte, got {}",
        data.len()
    );

    let mut cmd = Vec::with_capacity(3 + data.len());
    cmd.push(b'g');
    cmd.push(0x00);
    cmd.push(data.len() as u8);
    cmd.extend_from_slice(data);
    cmd
}

/// # Print
///
/// `FF` prints and waits for the next page, `SUB` prints and ends the job.
#[inline]
pub fn print_page(last: bool) -> Vec<u8> {
    vec![if last { SUB } else { FF }]
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Convert a u16 to little-endian bytes.
///
/// ```
/// use qlabel::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(35), [0x23, 0x00]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
