use calorie_core::db::migrations::latest_version;
use calorie_core::db::open_db_in_memory;
use calorie_core::{
    CalorieEntry, CalorieRepository, CalorieService, RepoError, SqliteCalorieRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();

    let entry = CalorieEntry::at(500, 1_700_000_000_000);
    let id = repo.insert_entry(&entry).unwrap();

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded, entry);
    assert!(repo.get_entry(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_orders_by_timestamp_then_insertion() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();

    let late = CalorieEntry::at(3, 3_000);
    let early = CalorieEntry::at(1, 1_000);
    let tie_first = CalorieEntry::at(20, 2_000);
    let tie_second = CalorieEntry::at(21, 2_000);
    for entry in [&late, &early, &tie_first, &tie_second] {
        repo.insert_entry(entry).unwrap();
    }

    let amounts: Vec<i32> = repo
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.amount)
        .collect();
    assert_eq!(amounts, vec![1, 20, 21, 3]);
}

#[test]
fn insert_is_append_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();

    let entry = CalorieEntry::at(100, 1);
    repo.insert_entry(&entry).unwrap();

    let overwrite = CalorieEntry::with_id(entry.id, 999, 2);
    let err = repo.insert_entry(&overwrite).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateEntry(id) if id == entry.id));
    assert_eq!(repo.get_entry(entry.id).unwrap().unwrap().amount, 100);
}

#[test]
fn clear_removes_everything_and_reports_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();

    repo.insert_entry(&CalorieEntry::at(1, 1)).unwrap();
    repo.insert_entry(&CalorieEntry::at(2, 2)).unwrap();
    assert_eq!(repo.count_entries().unwrap(), 2);

    assert_eq!(repo.clear_entries().unwrap(), 2);
    assert_eq!(repo.count_entries().unwrap(), 0);
    assert!(repo.list_entries().unwrap().is_empty());
}

#[test]
fn malformed_uuid_row_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO calorie_entries (uuid, amount, timestamp_ms) VALUES ('not-a-uuid', 5, 5);",
        [],
    )
    .unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();

    let err = repo.list_entries().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_coerces_text_to_amounts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    for (input, expected) in [("500", 500), ("abc", 0), ("", 0), ("-40", -40), ("12.5", 0)] {
        let entry = service.create_entry(input).unwrap();
        assert_eq!(entry.amount, expected, "input `{input}`");
    }

    let stored: Vec<i32> = service
        .try_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.amount)
        .collect();
    assert_eq!(stored.len(), 5);
    assert_eq!(stored.iter().filter(|amount| **amount == 0).count(), 3);
    assert!(stored.contains(&500));
    assert!(stored.contains(&-40));
}

#[test]
fn service_entries_are_non_decreasing_in_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCalorieRepository::try_new(&conn).unwrap();
    let mut service = CalorieService::new(repo);

    for (amount, ts) in [(1, 50), (2, 10), (3, 30), (4, 10), (5, 70)] {
        service.record_amount_at(amount, ts).unwrap();
    }
    service.record_amount(6).unwrap();

    let entries = service.entries();
    assert_eq!(entries.len(), 6);
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].timestamp_ms <= pair[1].timestamp_ms));
    assert_eq!(entries.last().unwrap().amount, 6);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCalorieRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCalorieRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("calorie_entries"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE calorie_entries (
            uuid TEXT PRIMARY KEY NOT NULL,
            amount INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCalorieRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "calorie_entries",
            column: "timestamp_ms"
        })
    ));
}
