//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Requires a connection migrated to the latest schema version.
//! - `set` is an upsert; `remove` of a missing key is a no-op.
//! - `SQLITE_FULL` is surfaced as `StorageError::QuotaExceeded`.

use crate::db::migrations::ensure_kv_schema;
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// See [`ensure_kv_schema`].
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_kv_schema(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map_err(|err| map_write_error(err, key, value.len()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error, key: &str, bytes: usize) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::DiskFull => {
            StorageError::QuotaExceeded {
                key: key.to_string(),
                bytes,
            }
        }
        _ => StorageError::from(err),
    }
}
