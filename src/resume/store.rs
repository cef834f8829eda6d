//! Progress cursor persistence
//!
//! One JSON document at `<data_dir>/state.json`, replaced atomically on every
//! save. Last writer wins: there is no locking, so exactly one exporter
//! process may use a data directory at a time. Running two against the same
//! directory is outside the supported contract and is not detected.

use super::cursor::{ProgressCursor, SCHEMA_VERSION};
use crate::output::write_file_atomic;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Cursor file name inside the data directory
pub const STATE_FILE: &str = "state.json";

/// Maximum accepted cursor file size (1 MiB); anything larger is not ours
pub const MAX_STATE_FILE_SIZE: u64 = 1024 * 1024;

/// Reads and writes the progress cursor
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store for `<data_dir>/state.json`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STATE_FILE),
        }
    }

    /// Cursor file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cursor; `Ok(None)` when no run has completed yet.
    ///
    /// A present but unreadable, oversized or malformed file is an error, so a
    /// damaged cursor never silently triggers a full re-discovery.
    pub fn load(&self) -> Result<Option<ProgressCursor>, ResumeError> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No progress cursor yet");
                return Ok(None);
            }
            Err(e) => return Err(ResumeError::IoError(e.to_string())),
        };

        if metadata.len() > MAX_STATE_FILE_SIZE {
            return Err(ResumeError::StateTooLarge {
                size: metadata.len(),
                max: MAX_STATE_FILE_SIZE,
            });
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| ResumeError::IoError(e.to_string()))?;

        let cursor: ProgressCursor = serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to deserialize progress cursor");
            ResumeError::DeserializationError(e.to_string())
        })?;

        if cursor.schema_version() != SCHEMA_VERSION {
            return Err(ResumeError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION.to_string(),
                found: cursor.schema_version().to_string(),
            });
        }

        debug!(
            last_export_date = %cursor.last_export_date(),
            total_trades = cursor.total_trades(),
            "Progress cursor loaded"
        );
        Ok(Some(cursor))
    }

    /// Replace the cursor file
    pub fn save(&self, cursor: &ProgressCursor) -> Result<(), ResumeError> {
        let json = serde_json::to_string_pretty(cursor)
            .map_err(|e| ResumeError::SerializationError(e.to_string()))?;

        write_file_atomic(&self.path, json.as_bytes())
            .map_err(|e| ResumeError::IoError(format!("Failed to write {}: {e}", self.path.display())))?;

        info!(
            path = %self.path.display(),
            last_export_date = %cursor.last_export_date(),
            total_trades = cursor.total_trades(),
            total_days = cursor.total_days(),
            "Progress cursor saved"
        );
        Ok(())
    }
}

/// Cursor persistence errors
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Deserialization error
    #[error("corrupt state file: {0}")]
    DeserializationError(String),

    /// Schema version mismatch
    #[error("schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected version
        expected: String,
        /// Found version
        found: String,
    },

    /// State file exceeds maximum allowed size
    #[error("state file too large: {size} bytes (max {max} bytes)")]
    StateTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },
}
