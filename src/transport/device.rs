//! # Kernel Device Transport
//!
//! Writes a raster job to a printer character device such as the
//! `/dev/usb/lp0` node the Linux `usblp` driver creates for USB-attached
//! QL printers.
//!
//! ## Identifiers
//!
//! `file:///dev/usb/lp0` or a bare path (`/dev/usb/lp0`).
//!
//! ## Permissions
//!
//! The device is usually owned by the `lp` group:
//!
//! ```bash
//! $ ls -l /dev/usb/lp0
//! crw-rw---- 1 root lp 180, 0 ... /dev/usb/lp0
//! $ sudo usermod -aG lp $USER
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::QlError;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Strip the `file://` scheme, if present.
pub fn device_path(identifier: &str) -> PathBuf {
    PathBuf::from(identifier.strip_prefix("file://").unwrap_or(identifier))
}

/// # Device File Transport
///
/// ## Example
///
/// ```no_run
/// use qlabel::transport::DeviceTransport;
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// transport.write_all(&[0x1B, 0x40])?;
///
/// # Ok::<(), qlabel::error::QlError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    path: PathBuf,
}

impl DeviceTransport {
    /// Open the device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist (printer unplugged)
    /// - Permission denied (may need the `lp` group)
    pub fn open(identifier: &str) -> Result<Self, QlError> {
        let path = device_path(identifier);
        let file = open_for_write(&path)?;
        Ok(Self { file, path })
    }

    /// Write a complete job in chunks and flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), QlError> {
        for chunk in data.chunks(CHUNK_SIZE) {
            self.file.write_all(chunk).map_err(|e| {
                QlError::Transport(format!("Write to {} failed: {}", self.path.display(), e))
            })?;
        }

        self.file.flush().map_err(|e| {
            QlError::Transport(format!("Flush to {} failed: {}", self.path.display(), e))
        })?;

        info!(device = %self.path.display(), bytes = data.len(), "Print job sent");
        Ok(())
    }
}

fn open_for_write(path: &Path) -> Result<File, QlError> {
    OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| QlError::Transport(format!("Failed to open {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_path() {
        assert_eq!(device_path("file:///dev/usb/lp0"), PathBuf::from("/dev/usb/lp0"));
        assert_eq!(device_path("/dev/usb/lp1"), PathBuf::from("/dev/usb/lp1"));
    }

    #[test]
    fn test_writes_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp0");
        std::fs::write(&path, b"").unwrap();

        let job = vec![0xAB; 10_000];
        let mut transport = DeviceTransport::open(&format!("file://{}", path.display())).unwrap();
        transport.write_all(&job).unwrap();
        drop(transport);

        assert_eq!(std::fs::read(&path).unwrap(), job);
    }

    #[test]
    fn test_missing_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp9");
        let err = DeviceTransport::open(path.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, QlError::Transport(_)));
    }
}
