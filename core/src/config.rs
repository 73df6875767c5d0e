//! Configuration loading and validation for pulsemon
//!
//! This module parses a TOML monitor configuration into `schema` config
//! types, applies defaults (via serde defaults on the schema types), and
//! performs strict validation with field-path error messages. Both the
//! receiver and the sender read the same file; each picks up its own
//! section. Command-line flags override anything loaded here.

use crate::{CoreError, Result};
use schema::{ReceiverConfig, SenderConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level TOML structure for a monitor configuration
///
/// Both sections are optional; an empty file yields the documented
/// defaults (`0.0.0.0:4444` listen, `127.0.0.1:4444` connect, 5 second
/// interval, 1000 heartbeats).
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonitorFile {
    /// Receiver section
    #[serde(default)]
    pub receiver: ReceiverConfig,
    /// Sender section
    #[serde(default)]
    pub sender: SenderConfig,
}

impl MonitorFile {
    /// Validate the configuration and return `Result<()>` with field-path errors
    pub fn validate(&self) -> Result<()> {
        if self.receiver.host.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "receiver.host: cannot be empty".to_string(),
            ));
        }
        if self.receiver.port == 0 {
            return Err(CoreError::ValidationError(
                "receiver.port: must be 1..=65535".to_string(),
            ));
        }
        if self.receiver.accept_timeout_secs == Some(0) {
            return Err(CoreError::ValidationError(
                "receiver.acceptTimeoutSecs: must be greater than 0 when set".to_string(),
            ));
        }
        if self.sender.host.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "sender.host: cannot be empty".to_string(),
            ));
        }
        if self.sender.port == 0 {
            return Err(CoreError::ValidationError(
                "sender.port: must be 1..=65535".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a monitor configuration from a TOML file path
pub fn load_monitor_from_toml_path(path: impl AsRef<Path>) -> Result<MonitorFile> {
    let data = fs::read_to_string(&path).map_err(|e| {
        CoreError::ConfigurationError(format!("Failed to read config {:?}: {}", path.as_ref(), e))
    })?;
    load_monitor_from_toml_str(&data)
}

/// Load a monitor configuration from a TOML string
pub fn load_monitor_from_toml_str(input: &str) -> Result<MonitorFile> {
    let cfg: MonitorFile = toml::from_str(input)
        .map_err(|e| CoreError::ConfigurationError(format!("TOML parse error: {}", e)))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg = load_monitor_from_toml_str("").expect("empty config is valid");
        assert_eq!(cfg.receiver, ReceiverConfig::default());
        assert_eq!(cfg.sender, SenderConfig::default());
    }

    #[test]
    fn test_sections_parse_with_camel_case_keys() {
        let cfg = load_monitor_from_toml_str(
            r#"
[receiver]
host = "127.0.0.1"
port = 4445
acceptTimeoutSecs = 10

[sender]
port = 4445
intervalSecs = 1
count = 3
"#,
        )
        .expect("valid config");
        assert_eq!(cfg.receiver.host, "127.0.0.1");
        assert_eq!(cfg.receiver.port, 4445);
        assert_eq!(cfg.receiver.accept_timeout_secs, Some(10));
        // Unset sender fields fall back to defaults
        assert_eq!(cfg.sender.host, "127.0.0.1");
        assert_eq!(cfg.sender.port, 4445);
        assert_eq!(cfg.sender.interval_secs, 1);
        assert_eq!(cfg.sender.count, 3);
    }

    #[test]
    fn test_validation_reports_field_paths() {
        let err = load_monitor_from_toml_str("[receiver]\nport = 0\n").unwrap_err();
        assert!(err.to_string().contains("receiver.port"));

        let err = load_monitor_from_toml_str("[sender]\nhost = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("sender.host"));

        let err = load_monitor_from_toml_str("[receiver]\nacceptTimeoutSecs = 0\n").unwrap_err();
        assert!(err.to_string().contains("acceptTimeoutSecs"));
    }

    #[test]
    fn test_malformed_toml_is_a_configuration_error() {
        let err = load_monitor_from_toml_str("[receiver\nport = 1").unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationError(_)));
    }

    #[test]
    fn test_missing_file_is_a_configuration_error() {
        let err = load_monitor_from_toml_path("/nonexistent/pulsemon.toml").unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationError(_)));
    }
}
