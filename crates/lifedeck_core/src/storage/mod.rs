//! Persistence boundary for the application state document.
//!
//! # Responsibility
//! - Define the key-value contract the state store is written against.
//! - Provide SQLite and in-memory backends.
//! - Serialize the whole `AppState` under one key and migrate it on load.
//!
//! # Invariants
//! - Backends store opaque UTF-8 strings; they never inspect values.
//! - Quota failures are reported as `StorageError::QuotaExceeded`.

pub mod icon_migration;
pub mod memory_kv;
pub mod sqlite_kv;
pub mod state_store;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by key-value backends and the state store.
#[derive(Debug)]
pub enum StorageError {
    /// Backend refused the write because it is out of space.
    QuotaExceeded { key: String, bytes: usize },
    /// State document could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// Backend is not ready for use.
    Uninitialized(&'static str),
    /// Database was written by a newer binary.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded { key, bytes } => {
                write!(f, "storage quota exceeded writing {bytes} bytes to `{key}`")
            }
            Self::Serialization(err) => write!(f, "state serialization failed: {err}"),
            Self::Uninitialized(details) => write!(f, "storage not initialized: {details}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "database schema version {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::QuotaExceeded { .. }
            | Self::Uninitialized(_)
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl StorageError {
    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::Serialization(_) => "serialization_failed",
            Self::Uninitialized(_) => "uninitialized",
            Self::UnsupportedSchemaVersion { .. } => "unsupported_schema",
            Self::Sqlite(_) => "sqlite_error",
        }
    }
}

/// Minimal key-value contract the state store persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
