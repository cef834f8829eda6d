//! First-trade discovery
//!
//! With no cursor and no explicit start date the exporter must find the oldest
//! trade in the account. The listing is newest-first, so the oldest trade is
//! the last element of the last page of an unbounded scan.

use chrono::NaiveDate;
use tracing::info;

use super::pagination::PaginatedFetcher;
use super::{FetcherError, FetcherResult, JournalSource};
use crate::Trade;

/// Lower bound sent during discovery so the whole history is in range
pub fn discovery_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Locates the oldest trade of a newest-first listing
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeDiscoverer {
    pages: PaginatedFetcher,
}

impl RangeDiscoverer {
    /// Discoverer using the given page walker
    pub fn new(pages: PaginatedFetcher) -> Self {
        Self { pages }
    }

    /// Return the oldest trade in the account.
    ///
    /// Linear in the number of pages; remote latency dominates either way.
    ///
    /// # Errors
    /// [`FetcherError::NoRecords`] if the first page is empty.
    pub fn oldest_trade<S>(&self, source: &mut S) -> FetcherResult<Trade>
    where
        S: JournalSource + ?Sized,
    {
        let mut oldest = None;
        self.pages
            .for_each_page(source, Some(discovery_floor()), None, |page_number, mut page| {
                if page_number > 1 {
                    info!("  Scanning page {}...", page_number);
                }
                if let Some(last) = page.pop() {
                    oldest = Some(last);
                }
            })?;

        oldest.ok_or(FetcherError::NoRecords)
    }

    /// Calendar day (New York time) of the oldest trade in the account
    pub fn first_trade_date<S>(&self, source: &mut S) -> FetcherResult<NaiveDate>
    where
        S: JournalSource + ?Sized,
    {
        let oldest = self.oldest_trade(source)?;
        oldest.session_date().map_err(|e| {
            FetcherError::Parse(format!("oldest trade {}: {e}", oldest.id))
        })
    }
}
