//! Progress cursor for incremental exports

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current cursor schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

fn current_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Where the archive stands after the last successful run.
///
/// `last_export_date` never moves backwards and `first_trade_date` never moves
/// forwards; counts accumulate across runs, including re-exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCursor {
    #[serde(default = "current_schema_version")]
    schema_version: String,
    last_export_date: NaiveDate,
    first_trade_date: NaiveDate,
    total_trades: u64,
    total_days: u64,
    last_run_at: DateTime<Utc>,
}

impl ProgressCursor {
    /// Cursor for a first successful run
    pub fn new(
        first_trade_date: NaiveDate,
        last_export_date: NaiveDate,
        total_trades: u64,
        total_days: u64,
        last_run_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            last_export_date,
            first_trade_date,
            total_trades,
            total_days,
            last_run_at,
        }
    }

    /// Fold one successful run covering `[first_date, last_date]` into the cursor
    pub fn record_run(
        &mut self,
        first_date: NaiveDate,
        last_date: NaiveDate,
        trades: u64,
        days: u64,
        now: DateTime<Utc>,
    ) {
        self.first_trade_date = self.first_trade_date.min(first_date);
        self.last_export_date = self.last_export_date.max(last_date);
        self.total_trades += trades;
        self.total_days += days;
        self.last_run_at = now;
    }

    /// Schema version the cursor was written with
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Latest calendar day exported
    pub fn last_export_date(&self) -> NaiveDate {
        self.last_export_date
    }

    /// Earliest calendar day known to hold trades
    pub fn first_trade_date(&self) -> NaiveDate {
        self.first_trade_date
    }

    /// Trades written across all runs
    pub fn total_trades(&self) -> u64 {
        self.total_trades
    }

    /// Day archives written across all runs
    pub fn total_days(&self) -> u64 {
        self.total_days
    }

    /// Completion time of the last successful run
    pub fn last_run_at(&self) -> DateTime<Utc> {
        self.last_run_at
    }
}
