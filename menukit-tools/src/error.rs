//! Server start-up errors

use menukit_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Failure to bring a server up
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The bound socket has no readable local address
    #[error("Failed to get local address: {0}")]
    LocalAddress(#[source] std::io::Error),
}

impl Severity for ServerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;
