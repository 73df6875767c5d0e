//! Receiver library for the pulsemon heartbeat monitor
//!
//! The receiver opens its log file, listens for exactly one sender
//! connection and appends every newline-framed record it reads to the log,
//! stamped with the local receipt time and the peer address. The peer
//! closing the stream is the normal termination path.

#![allow(unused_crate_dependencies)]

pub mod error;
pub mod log;

pub use error::{ReceiverError, Result};
pub use log::HeartbeatLog;

use schema::{LogRecord, ReceiverConfig, RECORD_DELIMITER};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::info;

/// Maximum allowed size for one heartbeat record (64KB)
const MAX_RECORD_SIZE: usize = 64 * 1024;

/// The heartbeat receiver
///
/// `run` performs one full receive cycle: open the log, bind, accept one
/// connection, read records until the sender closes the stream. With no
/// accept timeout configured it blocks indefinitely waiting for a sender;
/// that is a documented property of the design, not an oversight.
pub struct Receiver {
    config: ReceiverConfig,
    log_path: PathBuf,
}

impl Receiver {
    /// Create a receiver that will append to the log file at `log_path`
    #[must_use]
    pub fn new(config: ReceiverConfig, log_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            log_path: log_path.into(),
        }
    }

    /// Run one full receive cycle
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be opened, the listen address
    /// cannot be bound, the configured accept timeout elapses, or the
    /// connection fails mid-stream. Log-open failures happen before any
    /// socket is created.
    pub async fn run(&self) -> Result<()> {
        // The log must be writable before any network activity starts
        let mut log = HeartbeatLog::open(&self.log_path).await?;

        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ReceiverError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!("Listening on {}", addr);

        let (stream, peer) = self.accept_one(&listener).await?;
        info!("Sender connected from {}", peer);

        self.handle_connection(stream, peer, &mut log).await
    }

    /// Accept the single sender connection, honoring the optional timeout
    async fn accept_one(&self, listener: &TcpListener) -> Result<(TcpStream, SocketAddr)> {
        match self.config.accept_timeout() {
            Some(limit) => match timeout(limit, listener.accept()).await {
                Ok(accepted) => accepted.map_err(ReceiverError::Accept),
                Err(_elapsed) => Err(ReceiverError::AcceptTimeout(limit)),
            },
            None => listener.accept().await.map_err(ReceiverError::Accept),
        }
    }

    /// Read newline-framed records until the peer closes the stream
    async fn handle_connection(
        &self,
        stream: TcpStream,
        peer: SocketAddr,
        log: &mut HeartbeatLog,
    ) -> Result<()> {
        let mut reader = BufReader::new(stream);
        let mut frame = Vec::with_capacity(1024);

        loop {
            frame.clear();
            let n = reader.read_until(RECORD_DELIMITER, &mut frame).await?;
            if n == 0 {
                info!("Connection closed by the sender");
                return Ok(());
            }

            if frame.len() > MAX_RECORD_SIZE {
                return Err(ReceiverError::OversizedRecord {
                    len: frame.len(),
                    max: MAX_RECORD_SIZE,
                });
            }

            if frame.last() == Some(&RECORD_DELIMITER) {
                frame.pop();
                if frame.last() == Some(&b'\r') {
                    frame.pop();
                }
            }
            if frame.is_empty() {
                continue;
            }

            let record = LogRecord::new(peer, String::from_utf8_lossy(&frame));
            log.append(&record).await?;
            info!("{}", record);
        }
    }
}
