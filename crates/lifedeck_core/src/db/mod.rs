//! SQLite bootstrap for the key-value backing table.
//!
//! Connections returned from here are migrated and ready for
//! [`crate::storage::sqlite_kv::SqliteKeyValueStore`]. Failures are reported
//! as [`crate::storage::StorageError`].

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
