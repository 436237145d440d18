//! Context injection into prompt templates.
//!
//! # Invariants
//! - Only the first `{{CONTEXT}}` occurrence is substituted.
//! - Selected entries are ordered by `updated_at DESC`, never by selection order.
//! - A template without the placeholder is returned unchanged.

use crate::model::entry::{sort_by_recency, Entry, EntryId};

/// Placeholder token that templates carry once.
pub const CONTEXT_PLACEHOLDER: &str = "{{CONTEXT}}";

/// Substituted for the placeholder when context is turned off.
pub const NO_CONTEXT_MARKER: &str = "(No context included)";

const CONTEXT_HEADER: &str = "Here's my current context from previous entries:\n---\n";
const CONTEXT_FOOTER: &str = "---\n\n";

/// Serializes one entry as a context block, trailing separator included.
pub fn format_entry_for_context(entry: &Entry) -> String {
    format!("Title: {}\n{}\n\n---\n\n", entry.title, entry.content)
}

/// Picks the default context selection for a subcategory.
///
/// Returns at most `limit` entries filed under `subcategory_id`, newest first.
pub fn recent_entries_for_context(
    entries: &[Entry],
    subcategory_id: &str,
    limit: usize,
) -> Vec<Entry> {
    let mut matching: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.subcategory_id.as_deref() == Some(subcategory_id))
        .cloned()
        .collect();
    sort_by_recency(&mut matching);
    matching.truncate(limit);
    matching
}

/// Renders `template` with the chosen entries injected as context.
///
/// - `include_context = false`: placeholder becomes [`NO_CONTEXT_MARKER`].
/// - Non-empty `selected_entry_ids`: only those entries, newest first.
/// - No selection: every entry in `available_entries`, in the given order.
pub fn generate_prompt(
    template: &str,
    available_entries: &[Entry],
    include_context: bool,
    selected_entry_ids: Option<&[EntryId]>,
) -> String {
    if !include_context {
        return template.replacen(CONTEXT_PLACEHOLDER, NO_CONTEXT_MARKER, 1);
    }

    let included = match selected_entry_ids {
        Some(ids) if !ids.is_empty() => {
            let mut selected: Vec<Entry> = available_entries
                .iter()
                .filter(|entry| ids.contains(&entry.id))
                .cloned()
                .collect();
            sort_by_recency(&mut selected);
            selected
        }
        _ => available_entries.to_vec(),
    };

    let context = build_context(&included);
    template.replacen(CONTEXT_PLACEHOLDER, context.trim(), 1)
}

fn build_context(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut context = String::from(CONTEXT_HEADER);
    for entry in entries {
        context.push_str(&format_entry_for_context(entry));
    }
    context.push_str(CONTEXT_FOOTER);
    context
}

#[cfg(test)]
mod tests {
    use super::{format_entry_for_context, generate_prompt, NO_CONTEXT_MARKER};
    use crate::model::entry::{Entry, EntryLabel};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, title: &str, content: &str) -> Entry {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Entry {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            category_id: None,
            subcategory_id: Some("s1".to_string()),
            label: EntryLabel::Note,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn entry_block_has_trailing_separator() {
        let block = format_entry_for_context(&entry("e1", "Run", "5k"));
        assert_eq!(block, "Title: Run\n5k\n\n---\n\n");
    }

    #[test]
    fn only_first_placeholder_is_replaced() {
        let prompt = generate_prompt("{{CONTEXT}} | {{CONTEXT}}", &[], false, None);
        assert_eq!(prompt, format!("{NO_CONTEXT_MARKER} | {{{{CONTEXT}}}}"));
    }

    #[test]
    fn missing_placeholder_leaves_template_unchanged() {
        let entries = vec![entry("e1", "Run", "5k")];
        assert_eq!(generate_prompt("plain", &entries, true, None), "plain");
    }

    #[test]
    fn single_entry_context_is_trimmed() {
        let entries = vec![entry("e1", "Run", "5k")];
        let prompt = generate_prompt("A\n{{CONTEXT}}\nB", &entries, true, None);
        assert_eq!(
            prompt,
            "A\nHere's my current context from previous entries:\n---\nTitle: Run\n5k\n\n---\n\n---\nB"
        );
    }
}
