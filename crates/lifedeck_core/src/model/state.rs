//! Aggregate application state and its pure transitions.
//!
//! # Responsibility
//! - Hold the single document that is persisted as a whole.
//! - Express every mutation as `&AppState -> AppState`.
//!
//! # Invariants
//! - Removing a category removes entries filed under any of its subcategories.
//! - Removing a subcategory removes entries filed under it.
//! - Removing an entry never cascades.
//! - Reads do not check for orphans; cleanup happens on delete only.

use crate::model::category::{Category, PromptTemplates, Subcategory};
use crate::model::entry::{Entry, EntryPatch};
use crate::model::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub entries: Vec<Entry>,
    pub settings: Settings,
    /// Document version marker reserved for format migrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// Partial category update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

/// Partial subcategory update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcategoryPatch {
    pub name: Option<String>,
    pub order: Option<i64>,
    pub prompt_templates: Option<PromptTemplates>,
}

impl AppState {
    pub fn new(categories: Vec<Category>, entries: Vec<Entry>, settings: Settings) -> Self {
        Self {
            categories,
            entries,
            settings,
            version: None,
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.categories
            .iter()
            .find_map(|category| category.subcategory(id))
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Order value for the next category appended to the state.
    pub fn next_category_order(&self) -> i64 {
        self.categories
            .iter()
            .map(|category| category.order)
            .max()
            .unwrap_or(-1)
            + 1
    }

    pub fn with_category_added(&self, category: Category) -> Self {
        let mut next = self.clone();
        next.categories.push(category);
        next
    }

    /// Returns `None` when no category has `id`.
    pub fn with_category_updated(&self, id: &str, patch: &CategoryPatch) -> Option<Self> {
        self.category(id)?;
        let mut next = self.clone();
        for category in next.categories.iter_mut().filter(|c| c.id == id) {
            if let Some(name) = &patch.name {
                category.name = name.clone();
            }
            if let Some(icon) = &patch.icon {
                category.icon = icon.clone();
            }
            if let Some(order) = patch.order {
                category.order = order;
            }
        }
        Some(next)
    }

    /// Removes the category and every entry filed under its subcategories.
    pub fn with_category_removed(&self, id: &str) -> Option<Self> {
        let category = self.category(id)?;
        let owned: HashSet<&str> = category
            .subcategories
            .iter()
            .map(|sub| sub.id.as_str())
            .collect();

        Some(Self {
            categories: self
                .categories
                .iter()
                .filter(|c| c.id != id)
                .cloned()
                .collect(),
            entries: self
                .entries
                .iter()
                .filter(|entry| {
                    entry
                        .subcategory_id
                        .as_deref()
                        .map_or(true, |sub_id| !owned.contains(sub_id))
                })
                .cloned()
                .collect(),
            settings: self.settings.clone(),
            version: self.version,
        })
    }

    /// Appends `subcategory` to the category it names.
    pub fn with_subcategory_added(&self, subcategory: Subcategory) -> Option<Self> {
        self.category(&subcategory.category_id)?;
        let mut next = self.clone();
        if let Some(parent) = next
            .categories
            .iter_mut()
            .find(|c| c.id == subcategory.category_id)
        {
            parent.subcategories.push(subcategory);
        }
        Some(next)
    }

    pub fn with_subcategory_updated(&self, id: &str, patch: &SubcategoryPatch) -> Option<Self> {
        self.subcategory(id)?;
        let mut next = self.clone();
        for sub in next
            .categories
            .iter_mut()
            .flat_map(|c| c.subcategories.iter_mut())
            .filter(|sub| sub.id == id)
        {
            if let Some(name) = &patch.name {
                sub.name = name.clone();
            }
            if let Some(order) = patch.order {
                sub.order = order;
            }
            if let Some(templates) = &patch.prompt_templates {
                sub.prompt_templates = templates.clone();
            }
        }
        Some(next)
    }

    /// Removes the subcategory and every entry filed under it.
    pub fn with_subcategory_removed(&self, id: &str) -> Option<Self> {
        self.subcategory(id)?;
        let mut next = self.clone();
        for category in &mut next.categories {
            category.subcategories.retain(|sub| sub.id != id);
        }
        next.entries
            .retain(|entry| entry.subcategory_id.as_deref() != Some(id));
        Some(next)
    }

    pub fn with_entry_added(&self, entry: Entry) -> Self {
        let mut next = self.clone();
        next.entries.push(entry);
        next
    }

    pub fn with_entry_updated(
        &self,
        id: &str,
        patch: &EntryPatch,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let current = self.entry(id)?;
        let updated = current.patched(patch, now);
        let mut next = self.clone();
        for entry in next.entries.iter_mut().filter(|e| e.id == id) {
            *entry = updated.clone();
        }
        Some(next)
    }

    pub fn with_entry_removed(&self, id: &str) -> Option<Self> {
        self.entry(id)?;
        let mut next = self.clone();
        next.entries.retain(|entry| entry.id != id);
        Some(next)
    }

    pub fn with_settings(&self, settings: Settings) -> Self {
        let mut next = self.clone();
        next.settings = settings;
        next
    }
}
