use std::fmt::Display;

/// Escapes text for embedding inside HTML element content or quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Absent values render as the empty string.
pub fn escape_optional<T: Display>(value: Option<T>) -> String {
    match value {
        Some(value) => escape_html(&value.to_string()),
        None => String::new(),
    }
}
