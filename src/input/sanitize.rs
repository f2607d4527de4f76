//! Two independent defences for the search fields: rejecting angle
//! brackets as they are typed or pasted, and HTML-escaping the query
//! before it is used anywhere downstream.

use std::fmt;

pub const REJECTED_CHARS_MESSAGE: &str = "The characters < and > are not allowed";
pub const TAGS_REMOVED_MESSAGE: &str = "HTML tags were removed";

/// A user-facing validation notice. Always rendered as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn rejected_chars() -> Self {
        Self::new(REJECTED_CHARS_MESSAGE)
    }

    pub fn tags_removed() -> Self {
        Self::new(TAGS_REMOVED_MESSAGE)
    }

    pub fn query_too_long(max: usize) -> Self {
        Self::new(format!("Search term is too long (max. {} characters)", max))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn is_rejected(c: char) -> bool {
    c == '<' || c == '>'
}

/// Keystroke guard: `<` and `>` are discarded before they reach the field.
pub fn guard_keystroke(c: char) -> Result<(), Warning> {
    if is_rejected(c) {
        Err(Warning::rejected_chars())
    } else {
        Ok(())
    }
}

/// Paste guard: the pasted text has already landed in the field, so the
/// whole value is cleaned. Returns the cleaned value when anything was removed.
pub fn strip_pasted(value: &str) -> Option<String> {
    if value.contains(is_rejected) {
        Some(value.chars().filter(|c| !is_rejected(*c)).collect())
    } else {
        None
    }
}

/// Escape markup-significant characters and drop null bytes.
pub fn sanitize_query(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => sanitized.push_str("&amp;"),
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#x27;"),
            '/' => sanitized.push_str("&#x2F;"),
            '\0' => {}
            c => sanitized.push(c),
        }
    }
    sanitized
}
