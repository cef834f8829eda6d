//! Archive files and summary writers
//!
//! - [`path`] - Data directory layout (`trades/yyyy-mm-dd.json`, `state.json`)
//! - [`archive`] - One JSON archive per calendar day
//! - [`csv`] - CSV rendering of daily summaries
//! - [`table`] - Aligned text table rendering of daily summaries

use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub mod archive;
pub mod csv;
pub mod path;
pub mod table;

pub use archive::{ArchiveStore, DayArchive};
pub use path::ArchiveLayout;

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Fixed-point rendering rounded to `dp` decimal places
pub fn format_decimal(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

/// Signed dollar amount, e.g. `+$12.50` or `-$3.00`
pub fn format_pl(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", format_decimal(-value, 2))
    } else {
        format!("+${}", format_decimal(value, 2))
    }
}

/// Replace `path` with `contents` in one rename.
///
/// The data goes to a temp file in the same directory, is synced, then renamed
/// over the target, so readers see either the old file or the new one.
pub(crate) fn write_file_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    if let Ok(dir) = std::fs::File::open(parent) {
        if let Err(e) = dir.sync_all() {
            debug!(dir = %parent.display(), "Directory sync failed: {}", e);
        }
    }
    Ok(())
}
