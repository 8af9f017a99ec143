//! # Network Transport
//!
//! Raw TCP printing. Brother QL network models listen on port 9100 and
//! accept a complete raster job on a plain socket; nothing is read back.
//!
//! ## Addresses
//!
//! | Identifier | Connects to |
//! |------------|-------------|
//! | `tcp://192.0.2.10:9100` | 192.0.2.10:9100 |
//! | `tcp://printer.lan` | printer.lan:9100 |
//! | `192.0.2.10` | 192.0.2.10:9100 |
//! | `tcp://[2001:db8::1]:9100` | [2001:db8::1]:9100 |
//!
//! ## Timeouts
//!
//! None. Connect and write use the operating system's defaults, so an
//! unresponsive printer holds the caller until the OS gives up.

use std::io::Write;
use std::net::TcpStream;
use tracing::info;

use crate::error::QlError;

/// Port used when the identifier does not name one.
pub const DEFAULT_PORT: u16 = 9100;

/// Bytes per socket write.
const CHUNK_SIZE: usize = 4096;

/// Resolve a printer identifier to a `host:port` string.
///
/// ```
/// use qlabel::transport::network::socket_address;
///
/// assert_eq!(socket_address("tcp://192.0.2.10").unwrap(), "192.0.2.10:9100");
/// assert_eq!(socket_address("tcp://192.0.2.10:9101").unwrap(), "192.0.2.10:9101");
/// ```
pub fn socket_address(identifier: &str) -> Result<String, QlError> {
    let host = identifier
        .strip_prefix("tcp://")
        .unwrap_or(identifier)
        .trim_end_matches('/');

    if host.is_empty() {
        return Err(QlError::Config(format!(
            "Printer address is empty: {:?}",
            identifier
        )));
    }

    // An IPv6 literal is ambiguous with a port unless bracketed
    let bracketed = host.starts_with('[') && host.contains(']');
    if !bracketed && host.matches(':').count() > 1 {
        return Err(QlError::Config(format!(
            "Invalid printer address: {} (bracket IPv6 addresses, e.g. [2001:db8::1]:9100)",
            identifier
        )));
    }

    // Bare host or bracketed IPv6 without a port
    if !host.contains(':') || host.ends_with(']') {
        return Ok(format!("{}:{}", host, DEFAULT_PORT));
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !name.is_empty() && port.parse::<u16>().is_ok() => Ok(host.to_string()),
        _ => Err(QlError::Config(format!(
            "Invalid printer address: {}",
            identifier
        ))),
    }
}

/// # Network Printer Connection
///
/// ## Example
///
/// ```no_run
/// use qlabel::transport::NetworkTransport;
///
/// let mut transport = NetworkTransport::open("tcp://192.0.2.10:9100")?;
/// transport.write_all(&[0x1B, 0x40])?;
///
/// # Ok::<(), qlabel::error::QlError>(())
/// ```
pub struct NetworkTransport {
    stream: TcpStream,
    address: String,
}

impl NetworkTransport {
    /// Connect to the printer named by `identifier`.
    pub fn open(identifier: &str) -> Result<Self, QlError> {
        let address = socket_address(identifier)?;
        info!(%address, "Connecting to printer");

        let stream = TcpStream::connect(&address).map_err(|e| {
            QlError::Transport(format!("Failed to connect to {}: {}", address, e))
        })?;

        Ok(Self { stream, address })
    }

    /// Resolved `host:port` of the connection.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Send a complete job.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), QlError> {
        for chunk in data.chunks(CHUNK_SIZE) {
            self.stream.write_all(chunk).map_err(|e| {
                QlError::Transport(format!("Write to {} failed: {}", self.address, e))
            })?;
        }

        self.stream
            .flush()
            .map_err(|e| QlError::Transport(format!("Flush to {} failed: {}", self.address, e)))?;

        info!(address = %self.address, bytes = data.len(), "Print job sent");
        Ok(())
    }
}
