//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Label used when a hand-off has no keyword to name it
pub const FALLBACK_LABEL: &str = "回答";

/// Truncate text to a maximum number of characters, ending with an ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}…", head)
    }
}

/// Collapse runs of spaces and tabs and strip whitespace around line breaks
pub fn normalize_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.split([' ', '\t'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a hand-off message from a summary: a bracketed keyword header and a bounded body
pub fn build_handoff_payload(keyword: Option<&str>, summary: &str, max_length: usize) -> String {
    let head = match keyword.filter(|keyword| !keyword.is_empty()) {
        Some(keyword) => format!("【{}】", keyword),
        None => format!("【{}】", FALLBACK_LABEL),
    };
    let body = truncate_text(&normalize_whitespace(summary), max_length);
    format!("{}\n{}", head, body)
}
