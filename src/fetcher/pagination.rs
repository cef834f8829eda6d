//! Page walker for the trade listing
//!
//! The listing exposes no total count. A scan requests page 1, 2, ... and stops
//! at the first page shorter than the requested size (or empty). That "short
//! page means last page" rule is a contract assumption about the API, so every
//! scan also carries a hard page ceiling in case a source keeps returning full
//! pages forever.

use chrono::NaiveDate;
use tracing::debug;

use super::{FetcherError, FetcherResult, JournalSource, TradeQuery};
use crate::exporter::config::{MAX_PAGES, PAGE_SIZE};
use crate::Trade;

/// Exhausts the paged trade listing for a date window
#[derive(Debug, Clone, Copy)]
pub struct PaginatedFetcher {
    page_size: usize,
    max_pages: u32,
}

impl Default for PaginatedFetcher {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PaginatedFetcher {
    /// Walker requesting `page_size` records per page
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: MAX_PAGES,
        }
    }

    /// Override the page ceiling
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Requested page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch every trade in `[start, end]`, pages concatenated in order
    pub fn fetch_all<S>(
        &self,
        source: &mut S,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> FetcherResult<Vec<Trade>>
    where
        S: JournalSource + ?Sized,
    {
        let mut all_trades = Vec::new();
        let pages = self.for_each_page(source, start, end, |_, page| all_trades.extend(page))?;

        debug!(
            pages,
            trades = all_trades.len(),
            "Pagination completed"
        );
        Ok(all_trades)
    }

    /// Walk the listing, handing each non-empty page to `on_page`.
    ///
    /// Returns the number of non-empty pages seen.
    ///
    /// # Errors
    /// Propagates the first fetch error; fails with
    /// [`FetcherError::PaginationLimit`] if the ceiling is reached while pages
    /// are still full.
    pub fn for_each_page<S, F>(
        &self,
        source: &mut S,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        mut on_page: F,
    ) -> FetcherResult<u32>
    where
        S: JournalSource + ?Sized,
        F: FnMut(u32, Vec<Trade>),
    {
        let mut page_number = 1;

        loop {
            if page_number > self.max_pages {
                return Err(FetcherError::PaginationLimit(self.max_pages));
            }

            let query = TradeQuery {
                page: page_number,
                count: self.page_size,
                start,
                end,
            };
            let page = source.list_trades(&query)?;

            if page.is_empty() {
                debug!(page = page_number, "Empty page received");
                return Ok(page_number - 1);
            }

            let is_last = page.len() < self.page_size;
            debug!(
                page = page_number,
                records = page.len(),
                is_last,
                "Received page"
            );
            on_page(page_number, page);

            if is_last {
                return Ok(page_number);
            }
            page_number += 1;
        }
    }
}
