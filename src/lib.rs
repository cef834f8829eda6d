//! # Trade Journal Exporter Library
//!
//! Incrementally mirrors a Tradervue trading journal into a local, append-only
//! archive of one JSON file per trading day, and derives daily P&L statistics
//! from that archive without touching the network again.
//!
//! ## Features
//!
//! - **Incremental Export**: A progress cursor remembers the last exported day so
//!   later runs only fetch what is new
//! - **First-Run Discovery**: Walks the newest-first trade listing to find the
//!   oldest trade when there is no cursor yet
//! - **Rate Limiting**: Requests are spaced by a fixed minimum interval and
//!   transient failures are retried with exponential backoff
//! - **Session-Day Bucketing**: Trades are grouped by the calendar day of their
//!   start time in New York time, regardless of where the tool runs
//! - **Idempotent Archives**: Re-exporting a day rewrites its file wholesale
//! - **Offline Summaries**: Daily P&L tables and CSV from the archive alone
//!
//! ## Quick Start
//!
//! ```no_run
//! use trade_journal_exporter::exporter::{ExportOptions, ExportOrchestrator, TransportConfig};
//! use trade_journal_exporter::fetcher::journal_api::JournalApi;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TransportConfig::new("alice", "secret", "my-exporter/0.1");
//! let api = JournalApi::new(config)?;
//!
//! let mut orchestrator = ExportOrchestrator::new(api, "./data");
//! let outcome = orchestrator.run(&ExportOptions::default())?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`fetcher`] - HTTP transport, endpoint wrappers, pagination and discovery
//! - [`exporter`] - Rate limiting, day aggregation and the export state machine
//! - [`resume`] - Progress cursor persistence
//! - [`output`] - Day archive files and summary renderers (CSV, table)
//! - [`summary`] - Read-only daily P&L statistics over the archive
//! - [`cli`] / [`config`] - Command-line surface and credential loading

#![warn(missing_docs)]
#![warn(clippy::all)]

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// CLI command implementations
pub mod cli;

/// Credential and data directory configuration
pub mod config;

/// Export orchestration, rate limiting and day aggregation
pub mod exporter;

/// Remote journal access
pub mod fetcher;

/// Archive files and summary writers
pub mod output;

/// Progress cursor persistence
pub mod resume;

/// Daily P&L summaries over exported archives
pub mod summary;

/// Timezone used to decide which calendar day a trade belongs to.
///
/// US equity sessions are defined in New York time; bucketing in the caller's
/// local zone would split a session across two files for users elsewhere.
pub const REFERENCE_TZ: Tz = chrono_tz::America::New_York;

/// Date format used in archive file names and the cursor (`yyyy-mm-dd`)
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format expected by the journal API query parameters (`mm/dd/yyyy`)
pub const API_DATE_FORMAT: &str = "%m/%d/%Y";

/// Opaque trade identifier, unique per account
pub type TradeId = u64;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Long position
    #[default]
    #[serde(rename = "L", alias = "long", alias = "Long")]
    Long,
    /// Short position
    #[serde(rename = "S", alias = "short", alias = "Short")]
    Short,
}

impl Side {
    /// Single-letter code used in logs and summaries
    pub fn code(&self) -> &'static str {
        match self {
            Side::Long => "L",
            Side::Short => "S",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Directions traded in one symbol during a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideMix {
    /// Only long trades
    Long,
    /// Only short trades
    Short,
    /// Both long and short trades
    Both,
}

impl SideMix {
    /// Fold another trade's side into the mix
    pub fn merge(self, side: Side) -> Self {
        match (self, side) {
            (SideMix::Long, Side::Long) => SideMix::Long,
            (SideMix::Short, Side::Short) => SideMix::Short,
            _ => SideMix::Both,
        }
    }

    /// `L`, `S` or `L/S`
    pub fn code(&self) -> &'static str {
        match self {
            SideMix::Long => "L",
            SideMix::Short => "S",
            SideMix::Both => "L/S",
        }
    }
}

impl From<Side> for SideMix {
    fn from(side: Side) -> Self {
        match side {
            Side::Long => SideMix::Long,
            Side::Short => SideMix::Short,
        }
    }
}

impl std::fmt::Display for SideMix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A single journal trade as returned by the listing endpoint.
///
/// Field order is the serialization order of archive files; keep it stable so
/// re-exports diff cleanly. `start_datetime` is kept verbatim and only parsed
/// when bucketing (see [`session_date`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier
    pub id: TradeId,
    /// Ticker symbol
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Share/contract volume
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: i64,
    /// Whether the position is still open
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: bool,
    /// Long or short
    pub side: Side,
    /// Average entry price
    #[serde(default, deserialize_with = "null_as_default")]
    pub entry_price: Decimal,
    /// Average exit price, absent while open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    /// Gross profit and loss
    #[serde(default, deserialize_with = "null_as_default")]
    pub gross_pl: Decimal,
    /// P&L in the instrument's native currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_pl: Option<Decimal>,
    /// Native currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<String>,
    /// Commission paid
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission: Decimal,
    /// Other fees paid
    #[serde(default, deserialize_with = "null_as_default")]
    pub fees: Decimal,
    /// Start timestamp, ISO-8601 as sent by the API
    #[serde(deserialize_with = "null_as_default")]
    pub start_datetime: String,
    /// End timestamp, absent while open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<String>,
    /// `I` for intraday, `M` for multi-day
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    /// Full trade notes
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Notes excerpt
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_excerpt: String,
    /// Journal tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Whether the trade is shared publicly
    #[serde(default, deserialize_with = "null_as_default")]
    pub shared: bool,
    /// Initial risk in account currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_risk: Option<Decimal>,
    /// Number of executions making up the trade
    #[serde(default, deserialize_with = "null_as_default")]
    pub exec_count: u32,
    /// Number of comments on the trade
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u32,

    /// Position maximum favorable excursion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mfe: Option<Decimal>,
    /// Time of the position MFE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mfe_datetime: Option<String>,
    /// Position maximum adverse excursion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mae: Option<Decimal>,
    /// Time of the position MAE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mae_datetime: Option<String>,
    /// Price maximum favorable excursion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_mfe: Option<Decimal>,
    /// Time of the price MFE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_mfe_datetime: Option<String>,
    /// Price maximum adverse excursion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_mae: Option<Decimal>,
    /// Time of the price MAE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_mae_datetime: Option<String>,
    /// Best achievable exit P&L
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_exit_pl: Option<Decimal>,
    /// Time of the best exit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_exit_pl_datetime: Option<String>,
}

impl Trade {
    /// Calendar day of this trade in [`REFERENCE_TZ`]
    pub fn session_date(&self) -> Result<NaiveDate, TimestampError> {
        session_date(&self.start_datetime)
    }

    /// Net P&L after commission and fees
    pub fn net_pl(&self) -> Decimal {
        self.gross_pl - self.commission - self.fees
    }
}

/// A single fill belonging to a trade
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Execution {
    /// Execution identifier
    pub id: u64,
    /// Fill timestamp as sent by the API
    #[serde(default, deserialize_with = "null_as_default")]
    pub datetime: String,
    /// Ticker symbol
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Signed quantity: positive buys, negative sells
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    /// Fill price
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    /// Commission for this fill
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission: Decimal,
    /// Transaction fee
    #[serde(default, deserialize_with = "null_as_default")]
    pub trans_fee: Decimal,
    /// ECN fee
    #[serde(default, deserialize_with = "null_as_default")]
    pub ecn_fee: Decimal,
}

/// Read an explicit JSON `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A trade timestamp that could not be mapped to a calendar day
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse trade timestamp {raw:?}")]
pub struct TimestampError {
    /// The raw value as received
    pub raw: String,
}

/// Map a journal timestamp to its calendar day in [`REFERENCE_TZ`].
///
/// Accepts RFC 3339 with an offset (converted to New York time), a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` (already New York local time) and a bare
/// `YYYY-MM-DD`.
pub fn session_date(raw: &str) -> Result<NaiveDate, TimestampError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&REFERENCE_TZ).date_naive());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }

    NaiveDate::parse_from_str(value, FILE_DATE_FORMAT).map_err(|_| TimestampError {
        raw: raw.to_string(),
    })
}

/// Today's date in [`REFERENCE_TZ`] for the given instant
pub fn reference_date(now: DateTime<Utc>) -> NaiveDate {
    REFERENCE_TZ.from_utc_datetime(&now.naive_utc()).date_naive()
}

/// Parse a `yyyy-mm-dd` date as used on the command line and in file names
pub fn parse_file_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), FILE_DATE_FORMAT)
}
