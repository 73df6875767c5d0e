//! Core functionality for the pulsemon project
//!
//! This crate contains the shared plumbing used by both the receiver and
//! the sender: the error taxonomy, TOML configuration loading, tracing
//! initialization, and a free-port probe for tests.

pub mod config;
pub mod error;
pub mod port;

// Re-export schema types for convenience
pub use schema::*;

pub use config::{load_monitor_from_toml_path, load_monitor_from_toml_str, MonitorFile};
pub use error::{CoreError, Result};
pub use port::reserve_free_port;

/// Core utilities and helper functions
pub mod utils {
    use tracing::debug;

    /// Initialize tracing for the application
    ///
    /// Diagnostics go to stderr so the error stream carries failure
    /// reports; `RUST_LOG` overrides the default level.
    pub fn init_tracing(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| crate::CoreError::InitializationError(e.to_string()))?;

        debug!("Tracing initialized with level: {}", level);
        Ok(())
    }
}
