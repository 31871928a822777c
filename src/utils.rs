//! Utility functions for string handling and provider payload cleanup.
//!
//! This module provides helper functions used throughout the application:
//! - Topic validation and normalization
//! - Removal of control characters from provider text before display
//! - String truncation for logging
//! - JSON error detection for handling LLM response truncation
//! - Extraction of the JSON array embedded in a model's free-text reply

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a fenced code block, optionally tagged (```json ... ```).
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*\n?(.*?)```").expect("valid fence regex"));

/// Normalize a submitted topic.
///
/// Returns the trimmed topic, or `None` when nothing but whitespace was
/// entered.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_topic("  inteligência artificial \n"), Some("inteligência artificial"));
/// assert_eq!(normalize_topic(" \t "), None);
/// ```
pub fn normalize_topic(topic: &str) -> Option<&str> {
    let trimmed = topic.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Drop control characters (ESC, BEL, CR, ...) from text headed for the
/// terminal, so provider output cannot emit escape sequences.
///
/// Newlines are dropped too; callers that keep line structure split on
/// `lines()` first.
pub fn strip_controls(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to the
/// nearest char boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// When the model's reply is cut off (token limits), parsing fails with an
/// EOF error rather than a syntax error.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Pull the JSON array out of a model reply.
///
/// Models answer with prose, fenced blocks, or both. The content of the first
/// fenced block is preferred; the slice from the first `[` to the last `]` is
/// then taken. When no closing bracket exists the tail from `[` is returned so
/// the parse error reports truncation.
///
/// Returns `None` when the reply holds no `[` at all.
pub fn extract_json_array(reply: &str) -> Option<&str> {
    let body = CODE_FENCE
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply);

    let start = body.find('[')?;
    match body.rfind(']') {
        Some(end) if end > start => Some(&body[start..=end]),
        _ => Some(&body[start..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("economia"), Some("economia"));
        assert_eq!(normalize_topic("  economia  "), Some("economia"));
        assert_eq!(normalize_topic(""), None);
        assert_eq!(normalize_topic(" \t\n "), None);
    }

    #[test]
    fn test_strip_controls() {
        assert_eq!(strip_controls("Alerta\x1b[31m vermelho\x07"), "Alerta[31m vermelho");
        assert_eq!(strip_controls("linha\r"), "linha");
        assert_eq!(strip_controls("ação já"), "ação já");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // "ç" is two bytes; cutting at 1 must back off to 0
        let result = truncate_for_log("çã", 1);
        assert_eq!(result, "…(+4 bytes)");
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"[{"title": "value"#;
        let err = serde_json::from_str::<serde_json::Value>(json_eof).unwrap_err();
        assert!(looks_truncated(&err));

        let json_bad = r#"[{"title": nope}]"#;
        let err = serde_json::from_str::<serde_json::Value>(json_bad).unwrap_err();
        assert!(!looks_truncated(&err));
    }

    #[test]
    fn test_extract_plain_array() {
        assert_eq!(extract_json_array("[]"), Some("[]"));
        assert_eq!(
            extract_json_array(r#"[{"title":"A"}]"#),
            Some(r#"[{"title":"A"}]"#)
        );
    }

    #[test]
    fn test_extract_fenced_array_with_prose() {
        let reply = "Aqui estão as notícias:\n```json\n[{\"title\":\"A\"}]\n```\nFontes: [1]";
        assert_eq!(extract_json_array(reply), Some("[{\"title\":\"A\"}]"));
    }

    #[test]
    fn test_extract_unfenced_with_prose() {
        let reply = "Resultado: [{\"title\":\"A\"}] fim";
        assert_eq!(extract_json_array(reply), Some("[{\"title\":\"A\"}]"));
    }

    #[test]
    fn test_extract_truncated_and_missing() {
        assert_eq!(extract_json_array("[{\"title\":"), Some("[{\"title\":"));
        assert_eq!(extract_json_array("sem resultados"), None);
    }
}
