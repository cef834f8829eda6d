//! Export state machine
//!
//! ```text
//! ResolveWindow ──> Fetch ──> Aggregate ──> PersistEach ──> UpdateCursor ──> Done
//!       │             │
//!       v             v
//!   UpToDate      NoTrades
//! ```
//!
//! The cursor is saved only after every archive of the run has been written.
//! A run that stops anywhere earlier leaves the cursor where it was, so the
//! next run covers the same window again and overwrites whatever archives
//! the interrupted run managed to write.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use super::aggregate::{enrich_with_executions, group_by_day};
use super::ExportError;
use crate::fetcher::discovery::RangeDiscoverer;
use crate::fetcher::pagination::PaginatedFetcher;
use crate::fetcher::JournalSource;
use crate::output::{ArchiveStore, DayArchive};
use crate::resume::{ProgressCursor, StateStore};
use crate::reference_date;

/// Source of the current instant
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Per-run export options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// First day to export; overrides the cursor
    pub from: Option<NaiveDate>,
    /// Last day to export; defaults to today in New York
    pub to: Option<NaiveDate>,
    /// Attach executions to each archived day
    pub with_executions: bool,
    /// Ignore the cursor and re-export from the first trade (or `from`)
    pub overwrite: bool,
}

/// What a completed export did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window
    pub end: NaiveDate,
    /// Archives written
    pub days: usize,
    /// Trades archived
    pub trades: usize,
    /// Days archived without executions because enrichment failed
    pub degraded_days: usize,
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The cursor is already at or past the end of the window
    UpToDate,
    /// The window contained no trades; nothing was written
    NoTrades {
        /// First day of the window
        start: NaiveDate,
        /// Last day of the window
        end: NaiveDate,
    },
    /// Archives and cursor were written
    Exported(ExportReport),
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::UpToDate => write!(f, "Already up to date. No new trades to export."),
            ExportOutcome::NoTrades { start, end } => {
                write!(f, "No trades found between {start} and {end}.")
            }
            ExportOutcome::Exported(report) => {
                write!(
                    f,
                    "Export complete: {} days, {} trades ({} to {})",
                    report.days, report.trades, report.start, report.end
                )?;
                if report.degraded_days > 0 {
                    write!(f, "; {} days saved without executions", report.degraded_days)?;
                }
                Ok(())
            }
        }
    }
}

/// Drives one export run against a journal source and a data directory
pub struct ExportOrchestrator<S: JournalSource> {
    source: S,
    archives: ArchiveStore,
    state: StateStore,
    pages: PaginatedFetcher,
    discoverer: RangeDiscoverer,
    clock: Clock,
}

impl<S: JournalSource> ExportOrchestrator<S> {
    /// Orchestrator writing below `data_dir`
    pub fn new(source: S, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let pages = PaginatedFetcher::default();
        Self {
            source,
            archives: ArchiveStore::new(data_dir.clone()),
            state: StateStore::new(&data_dir),
            pages,
            discoverer: RangeDiscoverer::new(pages),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the clock used for "today", `exported_at` and `last_run_at`
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the page walker used for both fetching and discovery
    pub fn with_fetcher(mut self, pages: PaginatedFetcher) -> Self {
        self.pages = pages;
        self.discoverer = RangeDiscoverer::new(pages);
        self
    }

    /// Cursor persistence used by this orchestrator
    pub fn state_store(&self) -> &StateStore {
        &self.state
    }

    /// Archive persistence used by this orchestrator
    pub fn archive_store(&self) -> &ArchiveStore {
        &self.archives
    }

    /// Give back the journal source
    pub fn into_source(self) -> S {
        self.source
    }

    /// Run one export.
    ///
    /// # Errors
    /// Any fetch, discovery, archive or cursor failure. The cursor is
    /// unchanged whenever an error is returned.
    pub fn run(&mut self, options: &ExportOptions) -> Result<ExportOutcome, ExportError> {
        let now = (self.clock)();
        let cursor = self.state.load()?;

        let start = self.resolve_start(options, cursor.as_ref())?;
        let end = options.to.unwrap_or_else(|| reference_date(now));

        if start > end {
            info!(%start, %end, "Already up to date");
            return Ok(ExportOutcome::UpToDate);
        }

        info!("Exporting trades from {} to {}...", start, end);
        let trades = self
            .pages
            .fetch_all(&mut self.source, Some(start), Some(end))?;
        if trades.is_empty() {
            info!(%start, %end, "No trades found in the date range");
            return Ok(ExportOutcome::NoTrades { start, end });
        }

        let buckets = group_by_day(trades);
        let (first_day, last_day) = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => {
                info!(%start, %end, "No trades with a usable date in the range");
                return Ok(ExportOutcome::NoTrades { start, end });
            }
        };

        let mut report = ExportReport {
            start,
            end,
            days: 0,
            trades: 0,
            degraded_days: 0,
        };

        for mut bucket in buckets {
            if options.with_executions {
                report.degraded_days +=
                    enrich_with_executions(&mut self.source, std::slice::from_mut(&mut bucket));
            }

            let date = bucket.date;
            let count = bucket.trades.len();
            let digest = bucket.digest();

            self.archives.write(&DayArchive::from_bucket(bucket, now))?;
            info!("  {}: {} trades [{}]", date, count, digest);

            report.days += 1;
            report.trades += count;
        }

        let cursor = match cursor {
            Some(mut cursor) => {
                cursor.record_run(
                    first_day,
                    last_day,
                    report.trades as u64,
                    report.days as u64,
                    now,
                );
                cursor
            }
            None => ProgressCursor::new(
                first_day,
                last_day,
                report.trades as u64,
                report.days as u64,
                now,
            ),
        };
        self.state.save(&cursor)?;

        info!(
            days = report.days,
            trades = report.trades,
            degraded_days = report.degraded_days,
            "Export complete"
        );
        Ok(ExportOutcome::Exported(report))
    }

    fn resolve_start(
        &mut self,
        options: &ExportOptions,
        cursor: Option<&ProgressCursor>,
    ) -> Result<NaiveDate, ExportError> {
        if let Some(from) = options.from {
            debug!(%from, "Using explicit start date");
            return Ok(from);
        }

        if let Some(cursor) = cursor.filter(|_| !options.overwrite) {
            let last = cursor.last_export_date();
            // The last representable day has no successor; nothing is after it.
            return Ok(last.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX));
        }

        info!("First run: discovering first trade date...");
        let first = self.discoverer.first_trade_date(&mut self.source)?;
        info!("First trade found on: {}", first);
        Ok(first)
    }
}
