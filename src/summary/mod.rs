//! Daily P&L summaries built from exported archives only.
//!
//! Nothing here touches the network or the progress cursor. Archives that
//! cannot be read are logged and left out of the report.

pub mod daily;

pub use crate::SideMix;
pub use daily::{DailySummary, SummaryTotals, SymbolSummary};

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::output::archive::read_archive;
use crate::output::{ArchiveLayout, ArchiveStore, OutputError};

/// Summary errors
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Output error
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),
}

/// Builds [`DailySummary`] rows from the archive directory
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    store: ArchiveStore,
}

impl SummaryGenerator {
    /// Generator over `<data_dir>/trades`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: ArchiveStore::new(data_dir),
        }
    }

    /// Archive directory layout
    pub fn layout(&self) -> &ArchiveLayout {
        self.store.layout()
    }

    /// Summaries for archived days in `[from, to]` (both inclusive, both
    /// optional), ascending by date. A missing archive directory yields an
    /// empty list.
    pub fn generate(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailySummary>, SummaryError> {
        let dates = self.store.list_dates()?;
        let mut summaries = Vec::new();

        for date in dates {
            if from.is_some_and(|from| date < from) || to.is_some_and(|to| date > to) {
                continue;
            }

            let path = self.store.layout().archive_path(date);
            match read_archive(&path) {
                Ok(archive) => summaries.push(DailySummary::from_trades(date, &archive.trades)),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable archive"),
            }
        }

        debug!(days = summaries.len(), "Summaries generated");
        Ok(summaries)
    }
}
