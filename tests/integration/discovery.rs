//! Integration tests for first-trade discovery

use chrono::NaiveDate;
use trade_journal_exporter::fetcher::discovery::{discovery_floor, RangeDiscoverer};
use trade_journal_exporter::fetcher::pagination::PaginatedFetcher;
use trade_journal_exporter::fetcher::FetcherError;
use trade_journal_exporter::Side;

use crate::support::fake_journal::{trade, FakeJournal};

/// One trade per day starting 2025-03-01
fn journal_with_days(n: u32) -> FakeJournal {
    FakeJournal::new(
        (0..n)
            .map(|i| {
                let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + chrono::Days::new(i.into());
                trade(
                    u64::from(i) + 1,
                    "SNGX",
                    Side::Long,
                    &format!("{}T10:00:00-05:00", day),
                )
            })
            .collect(),
    )
}

#[test]
fn test_discovery_within_first_page() {
    let mut journal = journal_with_days(3);
    let discoverer = RangeDiscoverer::default();

    let first = discoverer.first_trade_date(&mut journal).unwrap();

    assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(journal.trade_calls.len(), 1);
}

#[test]
fn test_discovery_scans_to_last_page() {
    let mut journal = journal_with_days(5);
    let discoverer = RangeDiscoverer::new(PaginatedFetcher::new(2));

    let oldest = discoverer.oldest_trade(&mut journal).unwrap();

    assert_eq!(oldest.id, 1);
    assert_eq!(journal.trade_calls.len(), 3);
}

#[test]
fn test_discovery_exact_multiple_of_page_size() {
    let mut journal = journal_with_days(4);
    let discoverer = RangeDiscoverer::new(PaginatedFetcher::new(2));

    let first = discoverer.first_trade_date(&mut journal).unwrap();

    // Two full pages, then an empty one that ends the scan
    assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(journal.trade_calls.len(), 3);
}

#[test]
fn test_discovery_on_empty_account() {
    let mut journal = FakeJournal::new(Vec::new());

    let result = RangeDiscoverer::default().first_trade_date(&mut journal);

    assert!(matches!(result, Err(FetcherError::NoRecords)));
    assert_eq!(journal.trade_calls.len(), 1);
}

#[test]
fn test_discovery_query_is_open_ended_from_floor() {
    let mut journal = journal_with_days(1);
    RangeDiscoverer::default()
        .first_trade_date(&mut journal)
        .unwrap();

    let query = journal.trade_calls[0];
    assert_eq!(query.start, Some(discovery_floor()));
    assert_eq!(query.start, NaiveDate::from_ymd_opt(2010, 1, 1));
    assert_eq!(query.end, None);
    assert_eq!(query.page, 1);
}
