//! Data directory layout
//!
//! ```text
//! <data_dir>/
//!   state.json              progress cursor
//!   trades/
//!     2025-01-15.json       one archive per calendar day
//!     2025-01-16.json
//! ```
//!
//! File names sort lexicographically in date order, which the summary layer
//! relies on.

use crate::FILE_DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Subdirectory holding the day archives
pub const TRADES_DIR: &str = "trades";

/// Archive file extension
pub const ARCHIVE_EXTENSION: &str = "json";

/// Resolves archive paths below a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    data_dir: PathBuf,
}

impl ArchiveLayout {
    /// Layout rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding the day archives
    pub fn trades_dir(&self) -> PathBuf {
        self.data_dir.join(TRADES_DIR)
    }

    /// Archive path for one calendar day
    pub fn archive_path(&self, date: NaiveDate) -> PathBuf {
        self.trades_dir().join(archive_file_name(date))
    }
}

/// `yyyy-mm-dd.json`
pub fn archive_file_name(date: NaiveDate) -> String {
    format!("{}.{ARCHIVE_EXTENSION}", date.format(FILE_DATE_FORMAT))
}

/// Date encoded in an archive file name, if it is one
pub fn parse_archive_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(&format!(".{ARCHIVE_EXTENSION}"))?;
    NaiveDate::parse_from_str(stem, FILE_DATE_FORMAT).ok()
}
