//! Result shaping for search listings.
//!
//! Lengths and offsets are counted in characters, not bytes.

use regex::RegexBuilder;

/// Default snippet length for result rows.
pub const DEFAULT_PREVIEW_LENGTH: usize = 150;

const ELLIPSIS: &str = "...";

/// Returns up to `length` characters of `content` around the first match.
///
/// Truncated sides are marked with `...`. A blank query or a miss returns
/// the head of the content.
pub fn search_preview(content: &str, query: &str, length: usize) -> String {
    let chars: Vec<char> = content.chars().collect();

    let match_index = if query.trim().is_empty() {
        None
    } else {
        find_case_insensitive(&chars, query)
    };

    let Some(match_index) = match_index else {
        return head(&chars, length);
    };

    let half = length / 2;
    let mut start = match_index.saturating_sub(half);
    let end = chars.len().min(start + length);
    if end - start < length && start > 0 {
        start = end.saturating_sub(length);
    }

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Wraps every case-insensitive occurrence of `query` in `<mark>` tags.
pub fn highlight_match(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return text.to_string();
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };

    let mut highlighted = String::with_capacity(text.len());
    let mut last = 0;
    for found in pattern.find_iter(text) {
        highlighted.push_str(&text[last..found.start()]);
        highlighted.push_str("<mark>");
        highlighted.push_str(found.as_str());
        highlighted.push_str("</mark>");
        last = found.end();
    }
    highlighted.push_str(&text[last..]);
    highlighted
}

fn head(chars: &[char], length: usize) -> String {
    let mut snippet: String = chars.iter().take(length).collect();
    if chars.len() > length {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

fn find_case_insensitive(haystack: &[char], query: &str) -> Option<usize> {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let folded: Vec<char> = haystack.iter().copied().map(fold_char).collect();
    folded.windows(needle.len()).position(|window| window == needle.as_slice())
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
