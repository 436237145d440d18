use lifedeck_core::db::migrations::{current_user_version, latest_version};
use lifedeck_core::db::{open_db, open_db_in_memory};
use lifedeck_core::{
    AppService, EntryDraft, KeyValueStore, SqliteKeyValueStore, StateStore, StorageError,
    STATE_STORAGE_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StorageError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entries_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifedeck.sqlite3");

    let entry_id = {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut service = AppService::open(StateStore::new(kv));
        let entry = service
            .add_entry(EntryDraft::note("Evening walk", "30 minutes"))
            .unwrap();
        assert!(service.last_save_succeeded());
        entry.id
    };

    let conn = open_db(&path).unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert!(kv.get(STATE_STORAGE_KEY).unwrap().is_some());

    let service = AppService::open(StateStore::new(kv));
    let entry = service.entry(&entry_id).unwrap();
    assert_eq!(entry.title, "Evening walk");
    assert_eq!(service.categories().len(), 3);
}
