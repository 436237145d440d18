//! Application facade over the state document.
//!
//! # Responsibility
//! - Provide CRUD entry points for categories, subcategories and entries.
//! - Build subcategory prompts from the current entries.
//! - Persist the whole state after every successful mutation.
//!
//! # Invariants
//! - Every mutation replaces the state with a new value, then saves it.
//! - A failed save is logged and reported; in-memory state stays current.
//! - Mutations targeting missing ids return an error and change nothing.
//! - References are checked when entries are created or re-scoped; a paired
//!   category and subcategory must belong together.
//! - Entry title and content are stored trimmed and never blank.

use crate::clipboard::Clipboard;
use crate::model::category::{
    Category, CategoryId, PromptKind, PromptTemplates, Subcategory, SubcategoryId,
};
use crate::model::defaults::default_state;
use crate::model::entry::{sort_by_recency, Entry, EntryDraft, EntryId, EntryPatch};
use crate::model::new_id;
use crate::model::settings::{Settings, SettingsPatch};
use crate::model::state::{AppState, CategoryPatch, SubcategoryPatch};
use crate::prompt::generator::{generate_prompt, recent_entries_for_context};
use crate::prompt::templates::generate_prompts_for_subcategory;
use crate::search::engine::{search_entries, SearchFilters};
use crate::storage::state_store::StateStore;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Entries picked as context when the caller does not choose any.
pub const DEFAULT_CONTEXT_ENTRIES: usize = 3;

/// Default length of the "recent entries" listing.
pub const DEFAULT_RECENT_ENTRIES: usize = 5;

/// Icon used when a category is created without one.
pub const FALLBACK_CATEGORY_ICON: &str = "📁";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Name is blank after trim.
    InvalidName,
    /// Entry title or content is blank after trim.
    BlankEntryField(&'static str),
    /// Subcategory is not owned by the category it was paired with.
    ScopeMismatch {
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    },
    CategoryNotFound(CategoryId),
    SubcategoryNotFound(SubcategoryId),
    EntryNotFound(EntryId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::BlankEntryField(field) => write!(f, "entry {field} must not be blank"),
            Self::ScopeMismatch {
                category_id,
                subcategory_id,
            } => write!(
                f,
                "subcategory {subcategory_id} does not belong to category {category_id}"
            ),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::SubcategoryNotFound(id) => write!(f, "subcategory not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
        }
    }
}

impl Error for ServiceError {}

/// New subcategory input. Templates default to the generated scaffolds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryDraft {
    pub name: String,
    pub prompt_templates: Option<PromptTemplates>,
}

impl SubcategoryDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_templates: None,
        }
    }
}

/// New category input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
    pub subcategories: Vec<SubcategoryDraft>,
}

/// Facade owning the current state and its persistence.
pub struct AppService<S: KeyValueStore> {
    store: StateStore<S>,
    state: AppState,
    last_save_succeeded: bool,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl<S: KeyValueStore> AppService<S> {
    /// Loads persisted state (or initializes defaults) from `store`.
    pub fn open(store: StateStore<S>) -> Self {
        let state = store.load_or_initialize();
        Self::from_state(store, state)
    }

    /// Wraps an already loaded state without touching storage.
    pub fn from_state(store: StateStore<S>, state: AppState) -> Self {
        Self {
            store,
            state,
            last_save_succeeded: true,
            clock: Box::new(Utc::now),
        }
    }

    /// Replaces the timestamp source used for entry lifecycle fields.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Whether the most recent mutation reached storage.
    pub fn last_save_succeeded(&self) -> bool {
        self.last_save_succeeded
    }

    // Categories

    /// Creates a category with its initial subcategories.
    ///
    /// Subcategory orders follow draft order starting at 0.
    pub fn add_category(&mut self, draft: CategoryDraft) -> ServiceResult<Category> {
        let name = normalize_name(&draft.name)?;
        let category_id = new_id();
        let mut subcategories = Vec::with_capacity(draft.subcategories.len());
        for (sub_draft, order) in draft.subcategories.into_iter().zip(0_i64..) {
            subcategories.push(build_subcategory(&name, &category_id, order, sub_draft)?);
        }

        let icon = draft.icon.trim();
        let category = Category {
            id: category_id,
            name,
            icon: if icon.is_empty() {
                FALLBACK_CATEGORY_ICON.to_string()
            } else {
                icon.to_string()
            },
            order: self.state.next_category_order(),
            subcategories,
        };

        let next = self.state.with_category_added(category.clone());
        self.commit(next, "add_category");
        Ok(category)
    }

    pub fn update_category(
        &mut self,
        id: &str,
        mut patch: CategoryPatch,
    ) -> ServiceResult<Category> {
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(normalize_name(name)?);
        }
        let next = self
            .state
            .with_category_updated(id, &patch)
            .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?;
        self.commit(next, "update_category");
        self.category(id)
            .cloned()
            .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))
    }

    /// Deletes a category and every entry filed under its subcategories.
    ///
    /// Returns the number of entries removed.
    pub fn delete_category(&mut self, id: &str) -> ServiceResult<usize> {
        let next = self
            .state
            .with_category_removed(id)
            .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?;
        let removed = self.state.entries.len() - next.entries.len();
        self.commit(next, "delete_category");
        Ok(removed)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.state.category(id)
    }

    /// Categories in display order.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.state.categories.iter().collect();
        categories.sort_by_key(|category| category.order);
        categories
    }

    // Subcategories

    pub fn add_subcategory(
        &mut self,
        category_id: &str,
        draft: SubcategoryDraft,
    ) -> ServiceResult<Subcategory> {
        let parent = self
            .state
            .category(category_id)
            .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
        let subcategory = build_subcategory(
            &parent.name,
            &parent.id,
            parent.next_subcategory_order(),
            draft,
        )?;

        let next = self
            .state
            .with_subcategory_added(subcategory.clone())
            .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
        self.commit(next, "add_subcategory");
        Ok(subcategory)
    }

    pub fn update_subcategory(
        &mut self,
        id: &str,
        mut patch: SubcategoryPatch,
    ) -> ServiceResult<Subcategory> {
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(normalize_name(name)?);
        }
        let next = self
            .state
            .with_subcategory_updated(id, &patch)
            .ok_or_else(|| ServiceError::SubcategoryNotFound(id.to_string()))?;
        self.commit(next, "update_subcategory");
        self.subcategory(id)
            .cloned()
            .ok_or_else(|| ServiceError::SubcategoryNotFound(id.to_string()))
    }

    /// Deletes a subcategory and its entries. Returns entries removed.
    pub fn delete_subcategory(&mut self, id: &str) -> ServiceResult<usize> {
        let next = self
            .state
            .with_subcategory_removed(id)
            .ok_or_else(|| ServiceError::SubcategoryNotFound(id.to_string()))?;
        let removed = self.state.entries.len() - next.entries.len();
        self.commit(next, "delete_subcategory");
        Ok(removed)
    }

    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.state.subcategory(id)
    }

    // Entries

    /// Creates an entry. Title and content are trimmed and must not be blank.
    pub fn add_entry(&mut self, mut draft: EntryDraft) -> ServiceResult<Entry> {
        draft.title = normalize_entry_field(&draft.title, "title")?;
        draft.content = normalize_entry_field(&draft.content, "content")?;
        self.ensure_scope(draft.category_id.as_deref(), draft.subcategory_id.as_deref())?;
        let entry = Entry::from_draft(draft, (self.clock)());
        let next = self.state.with_entry_added(entry.clone());
        self.commit(next, "add_entry");
        Ok(entry)
    }

    /// Applies `patch` and refreshes `updated_at`.
    ///
    /// The resulting scope is validated as a whole, so moving an entry across
    /// categories must patch both ids together.
    pub fn update_entry(&mut self, id: &str, mut patch: EntryPatch) -> ServiceResult<Entry> {
        let current = self
            .state
            .entry(id)
            .ok_or_else(|| ServiceError::EntryNotFound(id.to_string()))?;
        let category_id = patch
            .category_id
            .clone()
            .unwrap_or_else(|| current.category_id.clone());
        let subcategory_id = patch
            .subcategory_id
            .clone()
            .unwrap_or_else(|| current.subcategory_id.clone());

        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(normalize_entry_field(title, "title")?);
        }
        if let Some(content) = patch.content.as_deref() {
            patch.content = Some(normalize_entry_field(content, "content")?);
        }
        self.ensure_scope(category_id.as_deref(), subcategory_id.as_deref())?;

        let next = self
            .state
            .with_entry_updated(id, &patch, (self.clock)())
            .ok_or_else(|| ServiceError::EntryNotFound(id.to_string()))?;
        self.commit(next, "update_entry");
        self.entry(id)
            .cloned()
            .ok_or_else(|| ServiceError::EntryNotFound(id.to_string()))
    }

    pub fn delete_entry(&mut self, id: &str) -> ServiceResult<()> {
        let next = self
            .state
            .with_entry_removed(id)
            .ok_or_else(|| ServiceError::EntryNotFound(id.to_string()))?;
        self.commit(next, "delete_entry");
        Ok(())
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.state.entry(id)
    }

    /// Entries filed under a subcategory, newest first.
    pub fn entries_by_subcategory(&self, subcategory_id: &str) -> Vec<Entry> {
        self.collect_recent(|entry| entry.subcategory_id.as_deref() == Some(subcategory_id))
    }

    /// Category-level notes of a category, newest first.
    pub fn entries_by_category(&self, category_id: &str) -> Vec<Entry> {
        self.collect_recent(|entry| {
            entry.subcategory_id.is_none() && entry.category_id.as_deref() == Some(category_id)
        })
    }

    /// Entries without a subcategory, newest first.
    ///
    /// This includes category-level notes, not only fully unscoped ones.
    pub fn inbox_entries(&self) -> Vec<Entry> {
        self.collect_recent(|entry| entry.subcategory_id.is_none())
    }

    pub fn recent_entries(&self, limit: usize) -> Vec<Entry> {
        let mut entries = self.collect_recent(|_| true);
        entries.truncate(limit);
        entries
    }

    pub fn search_entries(&self, query: &str, filters: Option<&SearchFilters>) -> Vec<Entry> {
        search_entries(&self.state.entries, query, filters, &self.state.categories)
    }

    // Prompts

    /// Ids of the entries preselected as context for a subcategory.
    pub fn default_context_selection(&self, subcategory_id: &str) -> Vec<EntryId> {
        recent_entries_for_context(&self.state.entries, subcategory_id, DEFAULT_CONTEXT_ENTRIES)
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }

    /// Renders one of a subcategory's templates with its entries as context.
    ///
    /// `selection = None` uses [`Self::default_context_selection`]. Selected
    /// ids outside the subcategory are ignored. Returns `None` for an unknown
    /// subcategory.
    pub fn build_prompt(
        &self,
        subcategory_id: &str,
        kind: PromptKind,
        include_context: bool,
        selection: Option<&[EntryId]>,
    ) -> Option<String> {
        let subcategory = self.subcategory(subcategory_id)?;
        let selected: Vec<EntryId> = match selection {
            Some(ids) => ids.to_vec(),
            None => self.default_context_selection(subcategory_id),
        };

        let available: Vec<Entry> = self
            .entries_by_subcategory(subcategory_id)
            .into_iter()
            .filter(|entry| selected.contains(&entry.id))
            .collect();

        Some(generate_prompt(
            subcategory.prompt_templates.get(kind),
            &available,
            include_context,
            Some(selected.as_slice()),
        ))
    }

    /// Hands `text` to the clipboard capability and reports the outcome.
    pub fn copy_prompt(&self, clipboard: &dyn Clipboard, text: &str) -> bool {
        let copied = clipboard.copy(text);
        if copied {
            info!(
                "event=prompt_copy module=service status=ok chars={}",
                text.chars().count()
            );
        } else {
            warn!("event=prompt_copy module=service status=error error_code=clipboard_rejected");
        }
        copied
    }

    // Settings

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Settings {
        let settings = self.state.settings.patched(&patch);
        let next = self.state.with_settings(settings.clone());
        self.commit(next, "update_settings");
        settings
    }

    pub fn complete_onboarding(&mut self) -> Settings {
        self.update_settings(SettingsPatch {
            has_completed_onboarding: Some(true),
            ..SettingsPatch::default()
        })
    }

    // Utilities

    /// Drops the stored document and starts over from defaults.
    pub fn clear_all_data(&mut self) {
        self.store.clear();
        self.commit(default_state(), "clear_all_data");
    }

    /// Restores the default taxonomy and settings, discarding all entries.
    pub fn reset_to_defaults(&mut self) {
        self.store.clear();
        self.commit(default_state(), "reset_to_defaults");
    }

    fn commit(&mut self, next: AppState, operation: &'static str) -> bool {
        self.state = next;
        let persisted = self.store.save(&self.state);
        self.last_save_succeeded = persisted;
        if persisted {
            info!("event=state_commit module=service status=ok op={operation}");
        } else {
            warn!(
                "event=state_commit module=service status=error op={operation} error_code=persist_failed"
            );
        }
        persisted
    }

    fn ensure_scope(
        &self,
        category_id: Option<&str>,
        subcategory_id: Option<&str>,
    ) -> ServiceResult<()> {
        let category = match category_id {
            Some(id) => Some(
                self.state
                    .category(id)
                    .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?,
            ),
            None => None,
        };
        let Some(subcategory_id) = subcategory_id else {
            return Ok(());
        };
        if self.state.subcategory(subcategory_id).is_none() {
            return Err(ServiceError::SubcategoryNotFound(subcategory_id.to_string()));
        }
        match category {
            Some(category) if !category.owns_subcategory(subcategory_id) => {
                Err(ServiceError::ScopeMismatch {
                    category_id: category.id.clone(),
                    subcategory_id: subcategory_id.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn collect_recent(&self, keep: impl Fn(&Entry) -> bool) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .state
            .entries
            .iter()
            .filter(|entry| keep(*entry))
            .cloned()
            .collect();
        sort_by_recency(&mut entries);
        entries
    }
}

fn build_subcategory(
    category_name: &str,
    category_id: &str,
    order: i64,
    draft: SubcategoryDraft,
) -> ServiceResult<Subcategory> {
    let name = normalize_name(&draft.name)?;
    let prompt_templates = draft
        .prompt_templates
        .unwrap_or_else(|| generate_prompts_for_subcategory(category_name, &name));
    Ok(Subcategory {
        id: new_id(),
        name,
        category_id: category_id.to_string(),
        order,
        prompt_templates,
    })
}

fn normalize_entry_field(value: &str, field: &'static str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BlankEntryField(field));
    }
    Ok(trimmed.to_string())
}

fn normalize_name(value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}
