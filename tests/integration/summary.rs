//! Integration tests for summaries over exported archives

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::path::Path;
use tempfile::TempDir;
use trade_journal_exporter::output::csv::CsvSummaryWriter;
use trade_journal_exporter::output::table::write_table;
use trade_journal_exporter::output::{ArchiveStore, DayArchive};
use trade_journal_exporter::summary::{SideMix, SummaryGenerator, SummaryTotals};
use trade_journal_exporter::{Side, Trade};

use crate::support::fake_journal::trade;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn with_pl(mut trade: Trade, gross: rust_decimal::Decimal, commission: rust_decimal::Decimal) -> Trade {
    trade.gross_pl = gross;
    trade.commission = commission;
    trade
}

fn write_day(dir: &Path, day: NaiveDate, trades: Vec<Trade>) {
    ArchiveStore::new(dir)
        .write(&DayArchive {
            date: day,
            trades,
            executions: None,
            exported_at: Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
        })
        .unwrap();
}

fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_day(
        dir.path(),
        date(2025, 1, 14),
        vec![with_pl(
            trade(1, "AAPL", Side::Long, "2025-01-14T10:00:00-05:00"),
            dec!(-20),
            dec!(1),
        )],
    );
    write_day(
        dir.path(),
        date(2025, 1, 15),
        vec![
            with_pl(
                trade(2, "SNGX", Side::Long, "2025-01-15T09:31:00-05:00"),
                dec!(50),
                dec!(0.5),
            ),
            with_pl(
                trade(3, "SNGX", Side::Short, "2025-01-15T10:00:00-05:00"),
                dec!(10),
                dec!(0.5),
            ),
            with_pl(
                trade(4, "MULN", Side::Short, "2025-01-15T11:00:00-05:00"),
                dec!(-5),
                dec!(0),
            ),
        ],
    );
    write_day(
        dir.path(),
        date(2025, 1, 16),
        vec![with_pl(
            trade(5, "MULN", Side::Short, "2025-01-16T10:00:00-05:00"),
            dec!(30),
            dec!(1),
        )],
    );
    dir
}

#[test]
fn test_all_days_ascending() {
    let dir = seeded();
    let summaries = SummaryGenerator::new(dir.path()).generate(None, None).unwrap();

    let dates: Vec<_> = summaries.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2025, 1, 14), date(2025, 1, 15), date(2025, 1, 16)]);

    let busy = &summaries[1];
    assert_eq!(busy.trade_count, 3);
    assert_eq!(busy.gross_pl, dec!(55));
    assert_eq!(busy.net_pl, dec!(54));
    assert_eq!(busy.winners, 2);
    assert_eq!(busy.losers, 1);
    assert_eq!(busy.symbols[0].symbol, "SNGX");
    assert_eq!(busy.symbols[0].side, SideMix::Both);
    assert_eq!(busy.symbols[1].side, SideMix::Short);
}

#[test]
fn test_date_filter_is_inclusive() {
    let dir = seeded();
    let generator = SummaryGenerator::new(dir.path());

    let from_15 = generator.generate(Some(date(2025, 1, 15)), None).unwrap();
    assert_eq!(from_15.len(), 2);

    let until_15 = generator.generate(None, Some(date(2025, 1, 15))).unwrap();
    assert_eq!(until_15.len(), 2);

    let only_15 = generator
        .generate(Some(date(2025, 1, 15)), Some(date(2025, 1, 15)))
        .unwrap();
    assert_eq!(only_15.len(), 1);
    assert_eq!(only_15[0].date, date(2025, 1, 15));
}

#[test]
fn test_foreign_files_are_ignored() {
    let dir = seeded();
    let trades_dir = dir.path().join("trades");
    std::fs::write(trades_dir.join("notes.txt"), "hello").unwrap();
    std::fs::write(trades_dir.join("2025-13-40.json"), "{}").unwrap();
    std::fs::create_dir(trades_dir.join("2025-01-17.json")).unwrap();

    let summaries = SummaryGenerator::new(dir.path()).generate(None, None).unwrap();
    assert_eq!(summaries.len(), 3);
}

#[test]
fn test_totals_across_days() {
    let dir = seeded();
    let summaries = SummaryGenerator::new(dir.path()).generate(None, None).unwrap();

    let totals = SummaryTotals::from_days(&summaries);
    assert_eq!(totals.days, 3);
    assert_eq!(totals.trade_count, 5);
    assert_eq!(totals.gross_pl, dec!(65));
    assert_eq!(totals.net_pl, dec!(62));
    assert_eq!(totals.winners, 3);
    assert_eq!(totals.losers, 2);
    assert_eq!(totals.win_rate(), dec!(60));
}

#[test]
fn test_csv_rendering_has_header_and_rows() {
    let dir = seeded();
    let summaries = SummaryGenerator::new(dir.path()).generate(None, None).unwrap();

    let mut buffer = Vec::new();
    CsvSummaryWriter::new(&mut buffer).write_all(&summaries).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("date,"));
    assert!(lines[2].starts_with("2025-01-15,3,55.00,54.00,"));
    assert!(lines[2].ends_with("SNGX(L/S) MULN(S)"));
}

#[test]
fn test_table_rendering_has_total_row() {
    let dir = seeded();
    let summaries = SummaryGenerator::new(dir.path()).generate(None, None).unwrap();

    let mut buffer = Vec::new();
    write_table(&mut buffer, &summaries).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.starts_with("DATE"));
    assert!(text.contains("2025-01-16"));
    let total = text.lines().last().unwrap();
    assert!(total.starts_with("TOTAL"));
    assert!(total.contains("3 days"));
}
