//! Wire and log record types for the heartbeat exchange
//!
//! A heartbeat travels over TCP as a single line of ASCII text,
//! `HEARTBEAT <seq> at <timestamp>`, terminated by [`RECORD_DELIMITER`].
//! The receiver stamps each line it reads with a local receipt time and
//! renders it as a [`LogRecord`], one line per record in the heartbeat log.
//!
//! Records are newline-framed deliberately: TCP does not preserve write
//! boundaries, so a delimiter is required for the receiver to recover
//! discrete records from coalesced or fragmented reads.

use chrono::{Local, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

/// Byte that terminates every record on the wire and in the log file
pub const RECORD_DELIMITER: u8 = b'\n';

/// Timestamp format used for both origination and receipt times.
///
/// Local naive time with microsecond precision, matching the sortable
/// ISO-8601 form `2026-08-06T09:15:42.123456`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Create a timestamp string for the current local time
#[must_use]
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp produced by [`current_timestamp`]
///
/// # Errors
///
/// Returns a `chrono` parse error if the input is not in [`TIMESTAMP_FORMAT`]
/// (the fractional part may be of any precision, including absent).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
}

/// A single heartbeat record
///
/// The sequence number starts at 0 and increases by one per heartbeat sent
/// over a connection. The timestamp is captured when the record is built,
/// immediately before transmission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatMessage {
    /// Monotonically increasing sequence number
    pub seq: u64,
    /// Origination timestamp in [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

impl HeartbeatMessage {
    /// Build a heartbeat with the given sequence number, stamped now
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self {
            seq,
            timestamp: current_timestamp(),
        }
    }

    /// The payload as sent over the wire, including the record delimiter
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{}{}", self, RECORD_DELIMITER as char)
    }
}

impl fmt::Display for HeartbeatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HEARTBEAT {} at {}", self.seq, self.timestamp)
    }
}

/// Errors from parsing a heartbeat record off the wire
#[derive(Error, Debug)]
pub enum MessageParseError {
    /// The record does not start with the `HEARTBEAT ` tag
    #[error("record does not start with HEARTBEAT tag")]
    MissingTag,

    /// The sequence number is not a valid integer
    #[error("invalid sequence number: {0}")]
    InvalidSequence(#[from] std::num::ParseIntError),

    /// The ` at <timestamp>` part is missing or empty
    #[error("record is missing its timestamp")]
    MissingTimestamp,
}

impl FromStr for HeartbeatMessage {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("HEARTBEAT ")
            .ok_or(MessageParseError::MissingTag)?;
        let (seq, timestamp) = rest
            .split_once(" at ")
            .ok_or(MessageParseError::MissingTimestamp)?;
        if timestamp.is_empty() {
            return Err(MessageParseError::MissingTimestamp);
        }
        Ok(Self {
            seq: seq.parse()?,
            timestamp: timestamp.to_string(),
        })
    }
}

/// One line of the receiver's heartbeat log
///
/// Field order is stable: receipt timestamp, peer address, raw record text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Local receipt timestamp in [`TIMESTAMP_FORMAT`]
    pub received_at: String,
    /// Address of the connected sender
    pub peer: SocketAddr,
    /// Raw record text as read off the wire, without the delimiter
    pub message: String,
}

impl LogRecord {
    /// Build a log record for a message received from `peer`, stamped now
    #[must_use]
    pub fn new(peer: SocketAddr, message: impl Into<String>) -> Self {
        Self {
            received_at: current_timestamp(),
            peer,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.received_at, self.peer, self.message)
    }
}
