//! Journal fetchers
//!
//! Everything that talks to the remote journal lives here: the rate-limited
//! HTTP transport, typed endpoint wrappers, the page walker and first-trade
//! discovery. The engine only depends on the [`JournalSource`] trait so it can
//! run against in-memory sources in tests.

use crate::{Execution, Trade, TradeId, API_DATE_FORMAT};
use chrono::NaiveDate;

pub mod discovery;
pub mod failure;
pub mod http;
pub mod journal_api;
pub mod pagination;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Credentials rejected (401/403); never retried
    #[error("authentication failed (HTTP {status}): check your username and password")]
    Auth {
        /// HTTP status code
        status: u16,
    },

    /// Malformed request (400); never retried
    #[error("bad request (HTTP 400): {0}")]
    Validation(String),

    /// Server-side fault (5xx); retried
    #[error("server error (HTTP {status}): {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Connection, timeout or body-read failure; retried
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success status; never retried
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Transient failures persisted through every attempt
    #[error("request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Last observed cause
        last: Box<FetcherError>,
    },

    /// Response body or timestamp could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// The account has no trades at all
    #[error("no trades found in the journal account")]
    NoRecords,

    /// A listing kept returning full pages past the page ceiling
    #[error("pagination exceeded {0} pages without a short page")]
    PaginationLimit(u32),
}

impl FetcherError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, FetcherError::Server { .. } | FetcherError::Network(_))
    }
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// One page request against the trade listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeQuery {
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub count: usize,
    /// Inclusive lower date bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end: Option<NaiveDate>,
}

impl TradeQuery {
    /// Query parameters in the API's wire form
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("count", self.count.to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(start) = self.start {
            params.push(("startdate", start.format(API_DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            params.push(("enddate", end.format(API_DATE_FORMAT).to_string()));
        }
        params
    }
}

/// Read access to a trading journal.
///
/// The trade listing is newest-first and carries no total count. Methods take
/// `&mut self` because real sources own pacing state.
pub trait JournalSource {
    /// Fetch one page of trades
    fn list_trades(&mut self, query: &TradeQuery) -> FetcherResult<Vec<Trade>>;

    /// Fetch every execution of one trade (unordered)
    fn list_executions(&mut self, trade_id: TradeId) -> FetcherResult<Vec<Execution>>;
}

impl<S: JournalSource + ?Sized> JournalSource for &mut S {
    fn list_trades(&mut self, query: &TradeQuery) -> FetcherResult<Vec<Trade>> {
        (**self).list_trades(query)
    }

    fn list_executions(&mut self, trade_id: TradeId) -> FetcherResult<Vec<Execution>> {
        (**self).list_executions(trade_id)
    }
}

impl<S: JournalSource + ?Sized> JournalSource for Box<S> {
    fn list_trades(&mut self, query: &TradeQuery) -> FetcherResult<Vec<Trade>> {
        (**self).list_trades(query)
    }

    fn list_executions(&mut self, trade_id: TradeId) -> FetcherResult<Vec<Execution>> {
        (**self).list_executions(trade_id)
    }
}
