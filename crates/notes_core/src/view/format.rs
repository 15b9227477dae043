//! Text helpers shared by views.

use crate::model::note::parse_timestamp;

/// Escapes text for safe inclusion in element content and attributes.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Keeps the first `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// `Jan 5, 2024, 03:04 PM` in UTC. Unparseable input is returned as is.
pub fn format_date_short(timestamp: &str) -> String {
    format_with(timestamp, "%b %-d, %Y, %I:%M %p")
}

/// `January 5, 2024, 03:04 PM` in UTC. Unparseable input is returned as is.
pub fn format_date_long(timestamp: &str) -> String {
    format_with(timestamp, "%B %-d, %Y, %I:%M %p")
}

fn format_with(timestamp: &str, pattern: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(at) => at.format(pattern).to_string(),
        None => timestamp.to_string(),
    }
}
