//! Sender error types

use thiserror::Error;

/// Sender-specific error types
#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Failed to connect to receiver at {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to send heartbeat {seq}: {source}")]
    Send { seq: u64, source: std::io::Error },

    #[error("Connection error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Core(#[from] pulsemon_core::CoreError),
}

/// Sender-specific result type
pub type Result<T> = std::result::Result<T, SenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_names_the_address() {
        let error = SenderError::Connect {
            addr: "127.0.0.1:4444".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        };
        let text = error.to_string();
        assert!(text.contains("Failed to connect to receiver"));
        assert!(text.contains("127.0.0.1:4444"));
    }
}
