//! Human-readable timestamp rendering for entry listings.

use chrono::{DateTime, Utc};

/// Renders `then` relative to `now`, e.g. `just now`, `3 hours ago`.
///
/// Months are 30 days and years 365 days. Future timestamps read `just now`.
pub fn format_relative_date(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return ago(minutes, "min");
    }
    if hours < 24 {
        return ago(hours, "hour");
    }
    if days < 7 {
        return ago(days, "day");
    }
    if days < 30 {
        return ago(days / 7, "week");
    }
    if days < 365 {
        return ago(days / 30, "month");
    }
    ago(days / 365, "year")
}

/// Renders a calendar date such as `Mar 5, 2024`.
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{plural} ago")
}
