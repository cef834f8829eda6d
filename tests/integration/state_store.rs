//! Integration tests for progress cursor persistence

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;
use trade_journal_exporter::resume::store::{MAX_STATE_FILE_SIZE, STATE_FILE};
use trade_journal_exporter::resume::{ProgressCursor, ResumeError, StateStore};

fn sample_cursor() -> ProgressCursor {
    ProgressCursor::new(
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 9).unwrap(),
        812,
        97,
        Utc.with_ymd_and_hms(2025, 5, 9, 21, 14, 3).unwrap(),
    )
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());

    store.save(&sample_cursor()).unwrap();

    assert_eq!(store.path(), dir.path().join(STATE_FILE));
    assert_eq!(store.load().unwrap(), Some(sample_cursor()));
}

#[test]
fn test_missing_file_means_no_cursor() {
    let dir = TempDir::new().unwrap();
    assert_eq!(StateStore::new(dir.path()).load().unwrap(), None);
}

#[test]
fn test_save_replaces_previous_cursor() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());
    store.save(&sample_cursor()).unwrap();

    let mut cursor = sample_cursor();
    cursor.record_run(
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
        3,
        1,
        Utc.with_ymd_and_hms(2025, 5, 10, 21, 0, 0).unwrap(),
    );
    store.save(&cursor).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.total_trades(), 815);
    assert_eq!(
        loaded.last_export_date(),
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
    );

    // No temporary files are left next to the cursor
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_written_document_uses_plain_field_names() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());
    store.save(&sample_cursor()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["last_export_date"], "2025-05-09");
    assert_eq!(raw["first_trade_date"], "2024-11-01");
    assert_eq!(raw["total_trades"], 812);
    assert_eq!(raw["total_days"], 97);
    assert_eq!(raw["last_run_at"], "2025-05-09T21:14:03Z");
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(STATE_FILE), "{\"last_export_date\": ").unwrap();

    let result = StateStore::new(dir.path()).load();
    assert!(matches!(result, Err(ResumeError::DeserializationError(_))));
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(STATE_FILE),
        r#"{
            "schema_version": "9.0.0",
            "last_export_date": "2025-05-09",
            "first_trade_date": "2024-11-01",
            "total_trades": 1,
            "total_days": 1,
            "last_run_at": "2025-05-09T21:14:03Z"
        }"#,
    )
    .unwrap();

    let result = StateStore::new(dir.path()).load();
    assert!(matches!(
        result,
        Err(ResumeError::SchemaVersionMismatch { ref found, .. }) if found == "9.0.0"
    ));
}

#[test]
fn test_oversized_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let padding = " ".repeat(MAX_STATE_FILE_SIZE as usize + 1);
    std::fs::write(dir.path().join(STATE_FILE), padding).unwrap();

    let result = StateStore::new(dir.path()).load();
    assert!(matches!(result, Err(ResumeError::StateTooLarge { .. })));
}
