//! Core domain logic for LifeDeck.
//! This crate is the single source of truth for journaling invariants,
//! prompt generation and entry search.

pub mod clipboard;
pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod search;
pub mod service;
pub mod storage;

pub use clipboard::{BufferClipboard, Clipboard};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{
    Category, CategoryId, PromptKind, PromptTemplates, Subcategory, SubcategoryId,
};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryLabel, EntryPatch};
pub use model::settings::{Settings, SettingsPatch, Theme, ViewMode};
pub use model::state::{AppState, CategoryPatch, SubcategoryPatch};
pub use prompt::generator::{
    format_entry_for_context, generate_prompt, recent_entries_for_context, CONTEXT_PLACEHOLDER,
    NO_CONTEXT_MARKER,
};
pub use prompt::templates::{generate_prompts_for_subcategory, UNIVERSAL_SYNTHESIS_PROMPT};
pub use search::engine::{parse_filter_date, search_entries, SearchFilters};
pub use search::preview::{highlight_match, search_preview, DEFAULT_PREVIEW_LENGTH};
pub use service::app_service::{
    AppService, CategoryDraft, ServiceError, ServiceResult, SubcategoryDraft,
};
pub use storage::memory_kv::MemoryKeyValueStore;
pub use storage::sqlite_kv::SqliteKeyValueStore;
pub use storage::state_store::{StateStore, STATE_STORAGE_KEY};
pub use storage::{KeyValueStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
