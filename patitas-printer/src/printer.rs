//! Printer adapters for sending ESC/POS data
//!
//! Supports network printers (raw TCP, port 9100).

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let addr_str = format!("{}:{}", host, port);
        let addr = addr_str
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr_str)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected, sending {} bytes", data.len());

        let mut stream = stream;
        stream
            .write_all(data)
            .await
            .map_err(|e| PrintError::Io(std::io::Error::new(e.kind(), format!("Write failed: {}", e))))?;
        stream
            .flush()
            .await
            .map_err(PrintError::Io)?;

        Ok(())
    }

    async fn is_online(&self) -> bool {
        tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_is_rejected() {
        assert!(NetworkPrinter::new("not an address", 9100).is_err());
        assert!(NetworkPrinter::from_addr("192.168.1.50:9100").is_ok());
    }
}
