//! Schema definitions for pulsemon
//!
//! This crate contains the shared data structures used across the
//! heartbeat monitor: the wire record exchanged over TCP, the receiver's
//! log line, and the per-process configuration types. All types here
//! implement JSON Schema generation for external consumption.

pub mod message;

pub use message::{
    current_timestamp, parse_timestamp, HeartbeatMessage, LogRecord, MessageParseError,
    RECORD_DELIMITER, TIMESTAMP_FORMAT,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the receiver process
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverConfig {
    /// Address to listen on for the sender connection
    #[serde(default = "default_bind_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional bound on how long to wait for a sender to connect.
    /// `None` means the accept blocks indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_timeout_secs: Option<u64>,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_port(),
            accept_timeout_secs: None,
        }
    }
}

impl ReceiverConfig {
    /// The listen address as a `host:port` string
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Accept timeout as a `Duration`, if one is configured
    #[must_use]
    pub fn accept_timeout(&self) -> Option<Duration> {
        self.accept_timeout_secs.map(Duration::from_secs)
    }
}

/// Configuration for the sender process
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SenderConfig {
    /// Receiver host to connect to
    #[serde(default = "default_connect_host")]
    pub host: String,
    /// Receiver port to connect to
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds to sleep between heartbeats
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Number of heartbeats to send
    #[serde(default = "default_count")]
    pub count: u64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            host: default_connect_host(),
            port: default_port(),
            interval_secs: default_interval_secs(),
            count: default_count(),
        }
    }
}

impl SenderConfig {
    /// The receiver address as a `host:port` string
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sleep interval between heartbeats as a `Duration`
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_connect_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4444
}

fn default_interval_secs() -> u64 {
    5
}

fn default_count() -> u64 {
    1000
}
