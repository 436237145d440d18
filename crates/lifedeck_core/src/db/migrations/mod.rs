//! Schema steps for the state database.
//!
//! # Invariants
//! - Steps are ordered by `version`, starting at 1 with no gaps.
//! - `PRAGMA user_version` records the last applied step.
//! - A store may only be opened on a connection at [`latest_version`] whose
//!   `kv_store` table exists.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::{Connection, OptionalExtension};

const KV_TABLE: &str = "kv_store";

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_store",
    sql: include_str!("0001_kv_store.sql"),
}];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the connection up to [`latest_version`] in one transaction.
///
/// Returns the number of steps applied. A database written by a newer binary
/// is refused with `UnsupportedSchemaVersion` and left untouched.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<usize> {
    let found = current_user_version(conn)?;
    refuse_newer(found)?;

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=schema_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    Ok(pending.len())
}

/// Checks that `conn` can back a key-value store without further migration.
///
/// # Errors
/// - `UnsupportedSchemaVersion` for a newer schema.
/// - `Uninitialized` for an older schema or a missing `kv_store` table.
pub fn ensure_kv_schema(conn: &Connection) -> StorageResult<()> {
    let found = current_user_version(conn)?;
    refuse_newer(found)?;
    if found < latest_version() {
        return Err(StorageError::Uninitialized(
            "connection schema is behind; run apply_migrations first",
        ));
    }

    let table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [KV_TABLE],
            |row| row.get(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(StorageError::Uninitialized("kv_store table is missing"));
    }
    Ok(())
}

fn refuse_newer(found: u32) -> StorageResult<()> {
    let supported = latest_version();
    if found > supported {
        return Err(StorageError::UnsupportedSchemaVersion { found, supported });
    }
    Ok(())
}
