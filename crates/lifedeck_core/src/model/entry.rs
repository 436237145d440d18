//! Entry domain model.
//!
//! # Responsibility
//! - Define the user-authored note record and its label vocabulary.
//! - Provide creation and patch helpers that own the timestamp lifecycle.
//!
//! # Invariants
//! - `created_at == updated_at` at creation.
//! - Updates refresh `updated_at` only; `created_at` and `id` never change.
//! - `subcategory_id = None` means inbox or category-level note.

use crate::model::category::{CategoryId, SubcategoryId};
use crate::model::new_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable entry identifier.
pub type EntryId = String;

/// Kind of note an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryLabel {
    Note,
    Synthesis,
    Plan,
    Assessment,
}

impl EntryLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Synthesis => "synthesis",
            Self::Plan => "plan",
            Self::Assessment => "assessment",
        }
    }
}

impl Display for EntryLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown entry label string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntryLabelError(pub String);

impl Display for ParseEntryLabelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported entry label `{}`; expected note|synthesis|plan|assessment",
            self.0
        )
    }
}

impl Error for ParseEntryLabelError {}

impl FromStr for EntryLabel {
    type Err = ParseEntryLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "note" => Ok(Self::Note),
            "synthesis" => Ok(Self::Synthesis),
            "plan" => Ok(Self::Plan),
            "assessment" => Ok(Self::Assessment),
            other => Err(ParseEntryLabelError(other.to_string())),
        }
    }
}

/// Persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    /// Set for category-level notes; older documents may omit it.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub label: EntryLabel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-provided fields for a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub label: EntryLabel,
}

impl EntryDraft {
    /// Unscoped note draft.
    pub fn note(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category_id: None,
            subcategory_id: None,
            label: EntryLabel::Note,
        }
    }
}

/// Partial update for an entry. `None` leaves a field unchanged.
///
/// Scope fields are doubly optional: `Some(None)` clears the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Option<CategoryId>>,
    pub subcategory_id: Option<Option<SubcategoryId>>,
    pub label: Option<EntryLabel>,
}

impl Entry {
    /// Creates an entry with a generated id and `created_at = updated_at = now`.
    pub fn from_draft(draft: EntryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            title: draft.title,
            content: draft.content,
            category_id: draft.category_id,
            subcategory_id: draft.subcategory_id,
            label: draft.label,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with `patch` applied and `updated_at` set to `now`.
    pub fn patched(&self, patch: &EntryPatch, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(content) = &patch.content {
            next.content = content.clone();
        }
        if let Some(category_id) = &patch.category_id {
            next.category_id = category_id.clone();
        }
        if let Some(subcategory_id) = &patch.subcategory_id {
            next.subcategory_id = subcategory_id.clone();
        }
        if let Some(label) = patch.label {
            next.label = label;
        }
        next.updated_at = now;
        next
    }

    /// Fully unscoped entry.
    pub fn is_inbox(&self) -> bool {
        self.subcategory_id.is_none() && self.category_id.is_none()
    }

    /// Scoped to a category but to none of its subcategories.
    pub fn is_category_level(&self) -> bool {
        self.subcategory_id.is_none() && self.category_id.is_some()
    }
}

/// Sorts entries most-recently-updated first. Stable for equal timestamps.
pub fn sort_by_recency(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryDraft, EntryLabel, EntryPatch};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn from_draft_sets_matching_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let entry = Entry::from_draft(EntryDraft::note("t", "c"), now);
        assert!(!entry.id.is_empty());
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.updated_at, now);
        assert!(entry.is_inbox());
    }

    #[test]
    fn patched_refreshes_updated_at_only() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let entry = Entry::from_draft(EntryDraft::note("t", "c"), now);
        let later = now + Duration::minutes(5);
        let patch = EntryPatch {
            title: Some("renamed".to_string()),
            category_id: Some(Some("c1".to_string())),
            ..EntryPatch::default()
        };

        let next = entry.patched(&patch, later);
        assert_eq!(next.id, entry.id);
        assert_eq!(next.title, "renamed");
        assert_eq!(next.content, "c");
        assert_eq!(next.created_at, now);
        assert_eq!(next.updated_at, later);
        assert!(next.is_category_level());
    }

    #[test]
    fn label_parses_known_values() {
        assert_eq!("PLAN".parse::<EntryLabel>(), Ok(EntryLabel::Plan));
        assert!("todo".parse::<EntryLabel>().is_err());
    }
}
