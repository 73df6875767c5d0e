//! Append-only heartbeat log

use crate::error::{ReceiverError, Result};
use schema::LogRecord;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// The heartbeat log file, opened in append mode
///
/// One newline-terminated line per received record. Every append is
/// flushed before the caller issues the next read, so a crash loses at
/// most the record in flight. The file is owned exclusively by the
/// receiver process for the duration of one run.
pub struct HeartbeatLog {
    file: File,
    path: PathBuf,
}

impl HeartbeatLog {
    /// Open (creating if necessary) the log file at `path` for appending
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::LogOpen`] naming the path if the file
    /// cannot be opened, e.g. permission denied or an invalid path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .map_err(|source| ReceiverError::LogOpen {
                path: path.clone(),
                source,
            })?;
        Ok(Self { file, path })
    }

    /// Path the log was opened at
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line and flush it
    pub async fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = format!("{record}\n");
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        self.file.flush().await.map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> ReceiverError {
        ReceiverError::LogWrite {
            path: self.path.clone(),
            source,
        }
    }
}
