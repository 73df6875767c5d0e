//! Sender library for the pulsemon heartbeat monitor
//!
//! The sender opens one TCP connection to the receiver and transmits the
//! configured number of newline-terminated heartbeat records, sleeping the
//! configured interval after every send. An interrupt requests a graceful
//! stop: the loop ends at its next wakeup and the stream is shut down
//! cleanly instead of leaking the socket.

#![allow(unused_crate_dependencies)]

pub mod error;

pub use error::{Result, SenderError};

use schema::{HeartbeatMessage, SenderConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::{info, warn};

/// The heartbeat sender
pub struct Sender {
    config: SenderConfig,
    running: Arc<AtomicBool>,
    stop: Arc<Notify>,
}

impl Sender {
    /// Create a sender for the given configuration
    #[must_use]
    pub fn new(config: SenderConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(true)),
            stop: Arc::new(Notify::new()),
        }
    }

    /// Request a graceful stop
    ///
    /// The send loop ends at its next wakeup and the connection is closed
    /// cleanly; `run` then returns the number of heartbeats sent so far.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        // notify_one stores a permit, so a stop that lands before the loop
        // reaches its sleep still interrupts it
        self.stop.notify_one();
    }

    /// Connect and run the send loop to completion or interruption
    ///
    /// Returns the number of heartbeats actually sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a send
    /// fails part-way. There is no retry: connection refusal is fatal.
    pub async fn run(&self) -> Result<u64> {
        let addr = self.config.addr();
        let mut stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| SenderError::Connect {
                addr: addr.clone(),
                source,
            })?;
        info!("Connected to receiver at {}", addr);

        let mut sent = 0;
        for seq in 0..self.config.count {
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            let beat = HeartbeatMessage::new(seq);
            // write_all guarantees the full record is on the wire; short
            // writes are never accepted as success
            stream
                .write_all(beat.to_wire().as_bytes())
                .await
                .map_err(|source| SenderError::Send { seq, source })?;
            sent += 1;
            info!("Sent: {}", beat);

            tokio::select! {
                () = sleep(self.config.interval()) => {}
                () = self.stop.notified() => break,
            }
        }

        if sent < self.config.count {
            warn!("Stopped after {} of {} heartbeats", sent, self.config.count);
        }

        stream.shutdown().await?;
        Ok(sent)
    }
}

impl Clone for Sender {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            running: Arc::clone(&self.running),
            stop: Arc::clone(&self.stop),
        }
    }
}
