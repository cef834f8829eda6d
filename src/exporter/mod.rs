//! Export orchestration and rate limiting
//!
//! The exporter turns the remote journal into one archive per trading day:
//!
//! 1. **Window**: `--from`, else the day after the cursor, else the first
//!    trade found by [`crate::fetcher::discovery`]
//! 2. **Fetch**: all trades in the window via [`crate::fetcher::pagination`]
//! 3. **Aggregate**: bucket by New York calendar day ([`aggregate`]),
//!    optionally attaching executions
//! 4. **Persist**: overwrite each day's archive in ascending order
//! 5. **Cursor**: advance the progress cursor once every archive is written
//!
//! # Components
//!
//! - [`orchestrator`] - The export state machine
//! - [`aggregate`] - Day bucketing and execution enrichment
//! - [`rate_limit`] - Minimum spacing between requests
//! - [`config`] - Transport tunables and backoff calculation
//!
//! # Error Handling
//!
//! Every stage returns `Result<T, ExportError>`. Failures before the cursor
//! update leave the cursor untouched, so the next run retries the same
//! window. Per-trade timestamp problems and execution lookups are not
//! errors; they are logged and the run continues.


pub mod aggregate;
pub mod config;
pub mod orchestrator;
pub mod rate_limit;

pub use config::TransportConfig;
pub use orchestrator::{ExportOptions, ExportOrchestrator, ExportOutcome, ExportReport};
pub use rate_limit::RateLimiter;

use crate::fetcher::FetcherError;
use crate::output::OutputError;
use crate::resume::ResumeError;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Fetch or discovery failed
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Progress cursor could not be read or written
    #[error("resume error: {0}")]
    ResumeError(#[from] ResumeError),

    /// Archive could not be written
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),
}
