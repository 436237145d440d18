//! JSON state document persisted under a single key.
//!
//! # Responsibility
//! - Load, save and clear the whole `AppState` document.
//! - Initialize defaults on first launch or after corruption.
//! - Apply the icon migration on load and re-persist when it changed data.
//!
//! # Invariants
//! - Failures are logged and reported as `false`/`None`, never propagated.
//! - A corrupt document is treated exactly like a missing one.
//! - Log lines carry sizes and counts only, never document content.

use crate::model::defaults::default_state;
use crate::model::state::AppState;
use crate::storage::icon_migration::migrate_icons;
use crate::storage::{KeyValueStore, StorageResult};
use log::{error, info, warn};

/// Storage key holding the serialized state document.
pub const STATE_STORAGE_KEY: &str = "life-deck-state";

const AVAILABILITY_PROBE_KEY: &str = "__test__";

pub struct StateStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Creates a store writing under [`STATE_STORAGE_KEY`].
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, STATE_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Loads the persisted document.
    ///
    /// Returns `None` when nothing is stored or the document is unreadable.
    pub fn load(&self) -> Option<AppState> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!(
                    "event=state_load module=storage status=error error_code={} error={err}",
                    err.code()
                );
                return None;
            }
        };

        match serde_json::from_str::<AppState>(&raw) {
            Ok(state) => {
                info!(
                    "event=state_load module=storage status=ok bytes={} categories={} entries={}",
                    raw.len(),
                    state.categories.len(),
                    state.entries.len()
                );
                Some(state)
            }
            Err(err) => {
                warn!(
                    "event=state_load module=storage status=error error_code=corrupt_document bytes={} error={err}",
                    raw.len()
                );
                None
            }
        }
    }

    /// Serializes and writes `state`, reporting errors to the caller.
    pub fn try_save(&self, state: &AppState) -> StorageResult<usize> {
        let serialized = serde_json::to_string(state)?;
        self.kv.set(&self.key, &serialized)?;
        Ok(serialized.len())
    }

    /// Writes `state`. Returns `false` on any failure after logging it.
    pub fn save(&self, state: &AppState) -> bool {
        match self.try_save(state) {
            Ok(bytes) => {
                info!("event=state_save module=storage status=ok bytes={bytes}");
                true
            }
            Err(err) => {
                error!(
                    "event=state_save module=storage status=error error_code={} error={err}",
                    err.code()
                );
                false
            }
        }
    }

    /// Removes the persisted document.
    pub fn clear(&self) {
        match self.kv.remove(&self.key) {
            Ok(()) => info!("event=state_clear module=storage status=ok"),
            Err(err) => error!(
                "event=state_clear module=storage status=error error_code={} error={err}",
                err.code()
            ),
        }
    }

    /// Persists and returns a fresh default state.
    pub fn initialize(&self) -> AppState {
        let state = default_state();
        self.save(&state);
        state
    }

    /// Loads the stored state, migrating legacy icons, or initializes defaults.
    pub fn load_or_initialize(&self) -> AppState {
        let Some(mut state) = self.load() else {
            info!("event=state_init module=storage status=ok reason=not_found");
            return self.initialize();
        };

        let rewritten = migrate_icons(&mut state);
        if rewritten > 0 {
            info!("event=icon_migration module=storage status=ok rewritten={rewritten}");
            self.save(&state);
        }
        state
    }

    /// Size in bytes of the stored document, `0` when absent or unreadable.
    pub fn storage_size(&self) -> usize {
        self.kv
            .get(&self.key)
            .ok()
            .flatten()
            .map_or(0, |raw| raw.len())
    }

    /// Checks whether the backend accepts writes.
    pub fn is_available(&self) -> bool {
        self.kv
            .set(AVAILABILITY_PROBE_KEY, AVAILABILITY_PROBE_KEY)
            .and_then(|()| self.kv.remove(AVAILABILITY_PROBE_KEY))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{StateStore, STATE_STORAGE_KEY};
    use crate::storage::memory_kv::MemoryKeyValueStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn corrupt_document_loads_as_none() {
        let kv = MemoryKeyValueStore::new();
        kv.set(STATE_STORAGE_KEY, "{not json").unwrap();
        let store = StateStore::new(&kv);
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_document_is_replaced_by_defaults() {
        let kv = MemoryKeyValueStore::new();
        kv.set(STATE_STORAGE_KEY, "[]").unwrap();
        let store = StateStore::new(&kv);

        let state = store.load_or_initialize();
        assert_eq!(state.categories.len(), 3);
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn storage_size_tracks_document() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        assert_eq!(store.storage_size(), 0);
        let state = store.initialize();
        let expected = serde_json::to_string(&state).unwrap().len();
        assert_eq!(store.storage_size(), expected);
        assert!(store.is_available());

        store.clear();
        assert_eq!(store.storage_size(), 0);
    }

    #[test]
    fn quota_failure_reports_false() {
        let store = StateStore::new(MemoryKeyValueStore::with_quota(16));
        let state = crate::model::defaults::default_state();
        assert!(!store.save(&state));
        assert!(store.load().is_none());
    }
}
