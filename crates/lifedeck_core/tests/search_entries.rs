use chrono::{DateTime, Duration, TimeZone, Utc};
use lifedeck_core::{
    highlight_match, parse_filter_date, search_entries, search_preview, Category, Entry,
    EntryLabel, PromptTemplates, SearchFilters, Subcategory,
};

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn entry(id: &str, title: &str, content: &str, label: EntryLabel, updated: i64) -> Entry {
    Entry {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        category_id: None,
        subcategory_id: None,
        label,
        created_at: at(0),
        updated_at: at(updated),
    }
}

fn filed(mut entry: Entry, subcategory_id: &str) -> Entry {
    entry.subcategory_id = Some(subcategory_id.to_string());
    entry
}

fn finance() -> Category {
    let sub = |id: &str, order| Subcategory {
        id: id.to_string(),
        name: id.to_string(),
        category_id: "finance".to_string(),
        order,
        prompt_templates: PromptTemplates::default(),
    };
    Category {
        id: "finance".to_string(),
        name: "Finance".to_string(),
        icon: "💰".to_string(),
        order: 0,
        subcategories: vec![sub("budget", 0), sub("debt", 1)],
    }
}

fn ids(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.id.as_str()).collect()
}

#[test]
fn title_prefix_outranks_plain_title_match_regardless_of_recency() {
    let older_prefix = entry("e2", "Budget plan", "", EntryLabel::Plan, 1);
    let newer_inner = entry("e1", "Monthly budget review", "", EntryLabel::Note, 50);

    let results = search_entries(&[newer_inner, older_prefix], "budget", None, &[]);
    assert_eq!(ids(&results), vec!["e2", "e1"]);
}

#[test]
fn equal_scores_break_ties_by_recency() {
    let first = entry("old", "Budget review", "", EntryLabel::Note, 1);
    let second = entry("new", "budget plan", "", EntryLabel::Note, 2);

    let results = search_entries(&[first, second], "budget", None, &[]);
    assert_eq!(ids(&results), vec!["new", "old"]);
}

#[test]
fn content_only_match_is_kept_and_non_matches_are_dropped() {
    let entries = vec![
        entry("title", "Groceries", "", EntryLabel::Note, 1),
        entry("content", "Weekly", "groceries were expensive", EntryLabel::Note, 2),
        entry("none", "Running", "5k", EntryLabel::Note, 3),
    ];

    let results = search_entries(&entries, "GROCERIES", None, &[]);
    assert_eq!(ids(&results), vec!["title", "content"]);
}

#[test]
fn blank_query_with_label_filter_returns_label_sorted_by_recency() {
    let entries = vec![
        entry("p1", "A", "", EntryLabel::Plan, 1),
        entry("n1", "B", "", EntryLabel::Note, 5),
        entry("p2", "C", "", EntryLabel::Plan, 3),
    ];
    let filters = SearchFilters {
        label: "plan".parse().ok(),
        ..SearchFilters::default()
    };

    let results = search_entries(&entries, "  ", Some(&filters), &[]);
    assert_eq!(ids(&results), vec!["p2", "p1"]);
}

#[test]
fn category_filter_matches_entries_in_owned_subcategories() {
    let entries = vec![
        filed(entry("budget", "x", "", EntryLabel::Note, 1), "budget"),
        filed(entry("debt", "x", "", EntryLabel::Note, 2), "debt"),
        filed(entry("sleep", "x", "", EntryLabel::Note, 3), "sleep"),
        entry("inbox", "x", "", EntryLabel::Note, 4),
    ];
    let filters = SearchFilters {
        category_id: Some("finance".to_string()),
        ..SearchFilters::default()
    };

    let results = search_entries(&entries, "", Some(&filters), &[finance()]);
    assert_eq!(ids(&results), vec!["debt", "budget"]);
}

#[test]
fn unknown_category_filter_leaves_candidates_unchanged() {
    let entries = vec![
        entry("a", "x", "", EntryLabel::Note, 1),
        entry("b", "x", "", EntryLabel::Note, 2),
    ];
    let filters = SearchFilters {
        category_id: Some("missing".to_string()),
        ..SearchFilters::default()
    };

    let results = search_entries(&entries, "", Some(&filters), &[finance()]);
    assert_eq!(results.len(), 2);
}

#[test]
fn date_bounds_are_inclusive() {
    let entries = vec![
        entry("before", "x", "", EntryLabel::Note, -1),
        entry("start", "x", "", EntryLabel::Note, 0),
        entry("end", "x", "", EntryLabel::Note, 60),
        entry("after", "x", "", EntryLabel::Note, 61),
    ];
    let filters = SearchFilters {
        date_from: Some(at(0)),
        date_to: Some(at(60)),
        ..SearchFilters::default()
    };

    let results = search_entries(&entries, "", Some(&filters), &[]);
    assert_eq!(ids(&results), vec!["end", "start"]);
}

#[test]
fn filter_dates_accept_rfc3339_and_plain_dates() {
    assert_eq!(
        parse_filter_date("2024-03-01"),
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        parse_filter_date("2024-03-01T10:30:00+02:00"),
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap())
    );
    assert_eq!(parse_filter_date("last tuesday"), None);
}

#[test]
fn preview_and_highlight_work_together_on_unicode_content() {
    let content = format!("{}Café budget notes", "é".repeat(200));
    let preview = search_preview(&content, "budget", 40);
    assert!(preview.starts_with("..."));
    assert!(preview.contains("budget"));

    let highlighted = highlight_match(&preview, "BUDGET");
    assert!(highlighted.contains("<mark>budget</mark>"));
}
