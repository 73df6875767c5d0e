//! Receiver error types

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Receiver-specific error types
#[derive(Error, Debug)]
pub enum ReceiverError {
    #[error("Can't open heartbeat log {}: {}", path.display(), source)]
    LogOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Can't write to heartbeat log {}: {}", path.display(), source)]
    LogWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("No sender connected within {0:?}")]
    AcceptTimeout(Duration),

    #[error("Heartbeat record of {len} bytes exceeds the {max} byte maximum")]
    OversizedRecord { len: usize, max: usize },

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("{0}")]
    Core(#[from] pulsemon_core::CoreError),
}

/// Receiver-specific result type
pub type Result<T> = std::result::Result<T, ReceiverError>;
