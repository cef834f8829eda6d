//! Per-day JSON archives
//!
//! One file per calendar day, rewritten wholesale whenever that day is
//! exported again. Serialization order is fixed by the struct layout so
//! re-exports of unchanged data are byte-identical apart from `exported_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::path::{parse_archive_file_name, ArchiveLayout};
use super::{write_file_atomic, OutputError, OutputResult};
use crate::exporter::aggregate::DayBucket;
use crate::{Execution, Trade, TradeId};

/// Persisted form of one day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayArchive {
    /// Calendar day (`yyyy-mm-dd`)
    pub date: NaiveDate,
    /// Trades of the day in fetched order
    pub trades: Vec<Trade>,
    /// Executions by trade id, only for trades that have any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executions: Option<BTreeMap<TradeId, Vec<Execution>>>,
    /// When the archive was written
    pub exported_at: DateTime<Utc>,
}

impl DayArchive {
    /// Build the archive for a bucket; an empty execution map is omitted
    pub fn from_bucket(bucket: DayBucket, exported_at: DateTime<Utc>) -> Self {
        Self {
            date: bucket.date,
            trades: bucket.trades,
            executions: bucket.executions.filter(|map| !map.is_empty()),
            exported_at,
        }
    }
}

/// Reads and writes day archives below a data directory
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    layout: ArchiveLayout,
}

impl ArchiveStore {
    /// Store rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: ArchiveLayout::new(data_dir),
        }
    }

    /// Directory layout
    pub fn layout(&self) -> &ArchiveLayout {
        &self.layout
    }

    /// Write (or overwrite) the archive for its date; returns the file path
    pub fn write(&self, archive: &DayArchive) -> OutputResult<PathBuf> {
        let path = self.layout.archive_path(archive.date);
        let mut json = serde_json::to_string_pretty(archive)
            .map_err(|e| OutputError::SerializationError(e.to_string()))?;
        json.push('\n');

        write_file_atomic(&path, json.as_bytes()).map_err(|e| {
            OutputError::IoError(format!("Failed to write {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), trades = archive.trades.len(), "Archive written");
        Ok(path)
    }

    /// Read the archive for one day
    pub fn read(&self, date: NaiveDate) -> OutputResult<DayArchive> {
        read_archive(&self.layout.archive_path(date))
    }

    /// Dates that have an archive file, ascending
    pub fn list_dates(&self) -> OutputResult<Vec<NaiveDate>> {
        let entries = match std::fs::read_dir(self.layout.trades_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(OutputError::IoError(e.to_string())),
        };

        let mut dates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OutputError::IoError(e.to_string()))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(date) = entry.file_name().to_str().and_then(parse_archive_file_name) {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }
}

/// Read one archive file
pub fn read_archive(path: &Path) -> OutputResult<DayArchive> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| OutputError::IoError(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&contents)
        .map_err(|e| OutputError::SerializationError(format!("{}: {e}", path.display())))
}
