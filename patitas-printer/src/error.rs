//! Printing error types

use thiserror::Error;

/// Errors from building or sending print data
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Invalid printer configuration: {0}")]
    InvalidConfig(String),

    #[error("Printer connection failed: {0}")]
    Connection(String),

    #[error("Printer timeout: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PrintResult<T> = Result<T, PrintError>;
