//! Filter composition and relevance scoring.
//!
//! # Invariants
//! - Filters are independent intersections over the candidate set.
//! - The category filter matches subcategory-scoped entries only.
//! - Ordering is `score DESC, updated_at DESC`; blank queries skip scoring.

use crate::model::category::{Category, CategoryId, SubcategoryId};
use crate::model::entry::{sort_by_recency, Entry, EntryLabel};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

const TITLE_MATCH_SCORE: u32 = 10;
const TITLE_PREFIX_BONUS: u32 = 5;
const CONTENT_MATCH_SCORE: u32 = 3;

/// Structured search filters. Unset fields are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub label: Option<EntryLabel>,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    /// Inclusive lower bound on `updated_at`.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `updated_at`.
    pub date_to: Option<DateTime<Utc>>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parses a filter bound from an RFC 3339 timestamp or a `YYYY-MM-DD` date.
///
/// Date-only input is midnight UTC. Unparseable input yields `None`.
pub fn parse_filter_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// Filters then ranks `entries` against `query`.
///
/// `categories` resolves `filters.category_id`; an unknown category leaves
/// the candidate set unchanged.
pub fn search_entries(
    entries: &[Entry],
    query: &str,
    filters: Option<&SearchFilters>,
    categories: &[Category],
) -> Vec<Entry> {
    let mut results: Vec<&Entry> = entries.iter().collect();

    if let Some(filters) = filters.filter(|filters| !filters.is_empty()) {
        results = apply_filters(results, filters, categories);
    }

    if query.trim().is_empty() {
        let mut sorted: Vec<Entry> = results.into_iter().cloned().collect();
        sort_by_recency(&mut sorted);
        return sorted;
    }

    let needle = query.to_lowercase();
    let mut scored: Vec<(u32, &Entry)> = results
        .into_iter()
        .map(|entry| (relevance_score(entry, &needle), entry))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });

    scored.into_iter().map(|(_, entry)| entry.clone()).collect()
}

/// Scores one entry against an already lower-cased needle.
pub fn relevance_score(entry: &Entry, lowered_query: &str) -> u32 {
    let title = entry.title.to_lowercase();
    let mut score = 0;

    if title.contains(lowered_query) {
        score += TITLE_MATCH_SCORE;
        if title.starts_with(lowered_query) {
            score += TITLE_PREFIX_BONUS;
        }
    }

    if entry.content.to_lowercase().contains(lowered_query) {
        score += CONTENT_MATCH_SCORE;
    }

    score
}

fn apply_filters<'a>(
    mut results: Vec<&'a Entry>,
    filters: &SearchFilters,
    categories: &[Category],
) -> Vec<&'a Entry> {
    if let Some(label) = filters.label {
        results.retain(|entry| entry.label == label);
    }

    if let Some(subcategory_id) = filters.subcategory_id.as_deref() {
        results.retain(|entry| entry.subcategory_id.as_deref() == Some(subcategory_id));
    }

    if let Some(category_id) = filters.category_id.as_deref() {
        if let Some(category) = categories.iter().find(|c| c.id == category_id) {
            let owned: HashSet<&str> = category
                .subcategories
                .iter()
                .map(|sub| sub.id.as_str())
                .collect();
            results.retain(|entry| {
                entry
                    .subcategory_id
                    .as_deref()
                    .is_some_and(|sub_id| owned.contains(sub_id))
            });
        }
    }

    if let Some(from) = filters.date_from {
        results.retain(|entry| entry.updated_at >= from);
    }

    if let Some(to) = filters.date_to {
        results.retain(|entry| entry.updated_at <= to);
    }

    results
}
