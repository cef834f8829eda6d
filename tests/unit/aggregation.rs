//! Unit tests for day bucketing and execution enrichment

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;
use trade_journal_exporter::exporter::aggregate::{enrich_with_executions, group_by_day};
use trade_journal_exporter::{session_date, Side};

use crate::support::fake_journal::{execution, trade, FakeJournal};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_midnight_boundary_follows_new_york() {
    let trades = vec![
        trade(1, "A", Side::Long, "2025-01-15T23:59:59-05:00"),
        trade(2, "A", Side::Long, "2025-01-16T00:00:00-05:00"),
        // Same instant as trade 1, written in UTC
        trade(3, "A", Side::Long, "2025-01-16T04:59:59Z"),
        // Evening in Tokyo is early morning of the same date in New York
        trade(4, "A", Side::Long, "2025-01-16T20:00:00+09:00"),
    ];

    let buckets = group_by_day(trades);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].date, date(2025, 1, 15));
    assert_eq!(
        buckets[0].trades.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(buckets[1].date, date(2025, 1, 16));
    assert_eq!(
        buckets[1].trades.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![2, 4]
    );
}

#[test]
fn test_daylight_saving_offset_is_respected() {
    // 03:30 UTC in July is 23:30 EDT the day before
    let buckets = group_by_day(vec![trade(1, "A", Side::Long, "2025-07-04T03:30:00Z")]);
    assert_eq!(buckets[0].date, date(2025, 7, 3));
}

#[test]
fn test_enrichment_failure_is_isolated_to_its_day() {
    let trades = vec![
        trade(1, "SNGX", Side::Long, "2025-05-08T09:30:00-04:00"),
        trade(2, "SNGX", Side::Long, "2025-05-08T10:30:00-04:00"),
        trade(3, "MULN", Side::Short, "2025-05-09T09:45:00-04:00"),
        trade(4, "AAPL", Side::Long, "2025-05-09T11:00:00-04:00"),
    ];
    let mut journal = FakeJournal::new(trades.clone())
        .with_failing_executions(1)
        .with_executions(3, vec![execution(30, "MULN", -200)]);

    let mut buckets = group_by_day(trades);
    let degraded = enrich_with_executions(&mut journal, &mut buckets);

    assert_eq!(degraded, 1);
    assert!(buckets[0].executions.is_none());

    let executions = buckets[1].executions.as_ref().unwrap();
    // Trade 4 has no executions and is left out of the map
    assert_eq!(executions.keys().copied().collect::<Vec<_>>(), vec![3]);

    // Enrichment of the failed day stopped at its first trade
    assert_eq!(journal.execution_calls, vec![1, 3, 4]);
}

fn arb_trade_instant() -> impl Strategy<Value = (DateTime<Utc>, i32)> {
    // 2023-01-01 .. 2026-01-01, any offset from UTC-12 to UTC+14 in whole hours
    (1_672_531_200i64..1_767_225_600i64, -12i32..=14i32).prop_map(|(secs, offset_hours)| {
        (Utc.timestamp_opt(secs, 0).unwrap(), offset_hours)
    })
}

proptest! {
    #[test]
    fn prop_buckets_partition_trades(instants in prop::collection::vec(arb_trade_instant(), 0..60)) {
        let trades: Vec<_> = instants
            .iter()
            .enumerate()
            .map(|(i, (instant, offset_hours))| {
                let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
                let stamp = instant.with_timezone(&offset).to_rfc3339();
                trade(i as u64, "SYM", Side::Long, &stamp)
            })
            .collect();

        let buckets = group_by_day(trades.clone());

        // Every trade lands in exactly one bucket
        let total: usize = buckets.iter().map(|b| b.trades.len()).sum();
        prop_assert_eq!(total, trades.len());
        let ids: HashSet<u64> = buckets.iter().flat_map(|b| b.trades.iter().map(|t| t.id)).collect();
        prop_assert_eq!(ids.len(), trades.len());

        // Buckets are strictly ascending and each trade matches its bucket's day
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
        for bucket in &buckets {
            prop_assert!(!bucket.trades.is_empty());
            for t in &bucket.trades {
                prop_assert_eq!(session_date(&t.start_datetime).unwrap(), bucket.date);
            }
        }
    }

    #[test]
    fn prop_offset_does_not_change_the_day(secs in 1_672_531_200i64..1_767_225_600i64, a in -12i32..=14i32, b in -12i32..=14i32) {
        let instant = Utc.timestamp_opt(secs, 0).unwrap();
        let left = instant.with_timezone(&FixedOffset::east_opt(a * 3600).unwrap()).to_rfc3339();
        let right = instant.with_timezone(&FixedOffset::east_opt(b * 3600).unwrap()).to_rfc3339();
        prop_assert_eq!(session_date(&left).unwrap(), session_date(&right).unwrap());
    }
}
