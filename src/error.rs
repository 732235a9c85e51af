use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during metric emission and transmission.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A custom error with a free-form message.
    #[error("Custom error: {0}")]
    Custom(String),

    /// An I/O error from the underlying sink or socket.
    #[error("Std Io error: {0}")]
    StdIo(#[from] std::io::Error),

    /// The client was closed and its sink released.
    #[error("Client is closed")]
    Closed,

    /// Address resolution or socket setup did not finish in time.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The address resolved to nothing usable.
    #[error("Resolve error: {0}")]
    Resolve(String),
}

impl From<String> for MetricsError {
    fn from(value: String) -> Self {
        Self::Custom(value)
    }
}

impl From<&str> for MetricsError {
    fn from(value: &str) -> Self {
        Self::Custom(value.to_string())
    }
}
