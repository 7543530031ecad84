use doomsday_core::model::{CalendarDate, HistoryEntry, Weekday};
use doomsday_core::time::fixed_now;
use storage::repository::{HISTORY_KEY, HistoryRepository, KeyValueStore, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn entry(y: i32, m: u8, d: u8, guess: Weekday) -> HistoryEntry {
    HistoryEntry::graded(CalendarDate::new(y, m, d).unwrap(), guess, fixed_now())
}

#[tokio::test]
async fn sqlite_kv_upserts_values() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.put("greeting", "hello").await.unwrap();
    repo.put("greeting", "goodbye").await.unwrap();
    assert_eq!(repo.get("greeting").await.unwrap().as_deref(), Some("goodbye"));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.put("k", "v").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_history_round_trip() {
    let storage = Storage::sqlite("sqlite:file:memdb_history?mode=memory&cache=shared")
        .await
        .expect("storage");

    assert!(storage.history.load_history().await.unwrap().is_empty());

    let entries = vec![
        entry(2000, 2, 29, Weekday::Tuesday),
        entry(1900, 1, 1, Weekday::Monday),
        entry(2400, 12, 31, Weekday::Saturday),
    ];
    storage.history.save_history(&entries).await.unwrap();

    let loaded = storage.history.load_history().await.unwrap();
    assert_eq!(loaded, entries);
    let correct: Vec<bool> = loaded.iter().map(HistoryEntry::is_correct).collect();
    assert_eq!(correct, vec![true, true, false]);
}

#[tokio::test]
async fn sqlite_history_reports_malformed_document() {
    let storage = Storage::sqlite("sqlite:file:memdb_malformed?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .kv
        .put(HISTORY_KEY, r#"[{"date":"6th June 2000"}]"#)
        .await
        .unwrap();

    let err = storage.history.load_history().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}
