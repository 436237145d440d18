use chrono::{Duration, TimeZone, Utc};
use lifedeck_core::{
    generate_prompt, generate_prompts_for_subcategory, Entry, EntryLabel, PromptKind,
    CONTEXT_PLACEHOLDER, NO_CONTEXT_MARKER, UNIVERSAL_SYNTHESIS_PROMPT,
};

fn entry(id: &str, title: &str, content: &str, updated_minutes: i64) -> Entry {
    let base = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
    Entry {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        category_id: None,
        subcategory_id: Some("sleep".to_string()),
        label: EntryLabel::Note,
        created_at: base,
        updated_at: base + Duration::minutes(updated_minutes),
    }
}

#[test]
fn every_generated_template_substitutes_empty_context() {
    let templates = generate_prompts_for_subcategory("Health", "Sleep");
    for kind in PromptKind::ALL {
        let template = templates.get(kind);
        let rendered = generate_prompt(template, &[], true, None);
        assert_eq!(rendered, template.replacen(CONTEXT_PLACEHOLDER, "", 1));
    }
}

#[test]
fn disabled_context_never_leaks_entry_content() {
    let entries = vec![entry("a", "Late night", "went to bed at 2am", 1)];
    let templates = generate_prompts_for_subcategory("Health", "Sleep");
    for kind in PromptKind::ALL {
        let rendered = generate_prompt(templates.get(kind), &entries, false, None);
        assert!(rendered.contains(NO_CONTEXT_MARKER));
        assert!(!rendered.contains("went to bed at 2am"));
        assert!(!rendered.contains(CONTEXT_PLACEHOLDER));
    }
}

#[test]
fn selected_entries_render_newest_first_with_header() {
    let entries = vec![
        entry("old", "Old", "first night", 1),
        entry("skip", "Skip", "not chosen", 2),
        entry("new", "New", "second night", 3),
    ];
    let selection = vec!["old".to_string(), "new".to_string()];

    let rendered = generate_prompt(
        "Context:\n{{CONTEXT}}",
        &entries,
        true,
        Some(selection.as_slice()),
    );

    assert!(rendered.starts_with("Context:\nHere's my current context from previous entries:"));
    let newer = rendered.find("Title: New").unwrap();
    let older = rendered.find("Title: Old").unwrap();
    assert!(newer < older);
    assert!(!rendered.contains("not chosen"));
}

#[test]
fn template_without_placeholder_is_unchanged() {
    let entries = vec![entry("a", "A", "body", 1)];
    let rendered = generate_prompt("Just reflect.", &entries, true, None);
    assert_eq!(rendered, "Just reflect.");
}

#[test]
fn scaffolds_use_lower_cased_names_and_are_deterministic() {
    let first = generate_prompts_for_subcategory("Personal Growth", "Reading & Learning");
    let second = generate_prompts_for_subcategory("Personal Growth", "Reading & Learning");
    assert_eq!(first, second);
    assert!(first.evaluation.contains("reading & learning"));
    assert!(!first.planning.contains("Reading & Learning"));
}

#[test]
fn universal_synthesis_carries_one_placeholder() {
    assert_eq!(UNIVERSAL_SYNTHESIS_PROMPT.matches(CONTEXT_PLACEHOLDER).count(), 1);
}
