//! # Printer Transport Layer
//!
//! This module provides communication backends for sending raster jobs to
//! printers.
//!
//! ## Available Backends
//!
//! - [`network`]: Raw TCP (port 9100), the default
//! - [`device`]: Kernel character device (`/dev/usb/lp0`), Linux
//!
//! The [`Transport`] trait is the seam the HTTP handler depends on;
//! [`PrinterTransport`] dispatches to the backend named in each call.

pub mod device;
pub mod network;

pub use device::DeviceTransport;
pub use network::NetworkTransport;

use std::fmt;
use std::str::FromStr;

use crate::error::QlError;

/// Transport kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// TCP socket
    #[default]
    Network,
    /// Printer device file
    LinuxKernel,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Network => "network",
            Backend::LinuxKernel => "linux_kernel",
        }
    }

    /// Guess the backend from the form of a printer identifier.
    ///
    /// ```
    /// use qlabel::transport::Backend;
    ///
    /// assert_eq!(Backend::guess("tcp://192.0.2.10"), Some(Backend::Network));
    /// assert_eq!(Backend::guess("/dev/usb/lp0"), Some(Backend::LinuxKernel));
    /// assert_eq!(Backend::guess("usb://0x04f9:0x2028"), None);
    /// ```
    pub fn guess(identifier: &str) -> Option<Backend> {
        if identifier.starts_with("tcp://") {
            Some(Backend::Network)
        } else if identifier.starts_with("file://") || identifier.starts_with("/dev/usb/") {
            Some(Backend::LinuxKernel)
        } else {
            None
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = QlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network" | "tcp" => Ok(Backend::Network),
            "linux_kernel" | "linux-kernel" | "file" => Ok(Backend::LinuxKernel),
            other => Err(QlError::Config(format!(
                "Unknown backend '{}' (expected network or linux_kernel)",
                other
            ))),
        }
    }
}

/// Delivers raster instructions to a printer.
pub trait Transport: Send + Sync {
    /// Send a complete job to `destination` over `backend`.
    fn send(&self, instructions: &[u8], destination: &str, backend: Backend) -> Result<(), QlError>;
}

/// Default transport: opens a fresh connection per job.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrinterTransport;

impl Transport for PrinterTransport {
    fn send(&self, instructions: &[u8], destination: &str, backend: Backend) -> Result<(), QlError> {
        match backend {
            Backend::Network => NetworkTransport::open(destination)?.write_all(instructions),
            Backend::LinuxKernel => DeviceTransport::open(destination)?.write_all(instructions),
        }
    }
}
