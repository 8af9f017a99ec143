//! # PackBits Run-Length Encoding
//!
//! The TIFF compression scheme Brother QL printers accept for raster lines
//! after `M 02`.
//!
//! ## Format
//!
//! The stream is a sequence of packets, each starting with a header byte `n`
//! read as a signed `i8`:
//!
//! | Header | Meaning |
//! |--------|---------|
//! | 0..=127 | Copy the next `n + 1` bytes literally |
//! | -127..=-1 | Repeat the next byte `1 - n` times |
//! | -128 | No-op (never emitted) |
//!
//! ```text
//! Input:   AA AA AA AA 01 02 03 00 00
//! Encoded: FD AA  02 01 02 03  FF 00
//!          └run 4┘ └literal 3┘ └run 2┘
//! ```
//!
//! Blank label rows (all zero) collapse to two bytes per 128 input bytes.

/// Longest run or literal a single packet can hold.
const MAX_PACKET: usize = 128;

/// Encode `data` with PackBits.
///
/// ## Example
///
/// ```
/// use qlabel::protocol::packbits;
///
/// assert_eq!(packbits::encode(&[0; 90]), vec![0xA7, 0x00]);
/// ```
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / MAX_PACKET + 1);
    let mut i = 0;

    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < MAX_PACKET && data[i + run] == data[i] {
            run += 1;
        }

        if run >= 2 {
            out.push((257 - run) as u8);
            out.push(data[i]);
            i += run;
            continue;
        }

        // Literal: extend until the next repeat starts or the packet is full
        let start = i;
        i += 1;
        while i < data.len() && i - start < MAX_PACKET {
            if i + 1 < data.len() && data[i] == data[i + 1] {
                break;
            }
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&data[start..i]);
    }

    out
}

/// Decode a PackBits stream.
///
/// Truncated packets decode as far as the input allows.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let header = data[i] as i8;
        i += 1;

        match header {
            -128 => {}
            n if n < 0 => {
                let count = (1 - n as i16) as usize;
                if let Some(&byte) = data.get(i) {
                    out.extend(std::iter::repeat(byte).take(count));
                }
                i += 1;
            }
            n => {
                let end = (i + n as usize + 1).min(data.len());
                out.extend_from_slice(&data[i..end]);
                i = end;
            }
        }
    }

    out
}
