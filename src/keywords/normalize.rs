//! Cleans text extracted from PDFs before it is sent to the model.
//!
//! PDF extraction leaves CRLF line endings, words hyphenated across lines,
//! trailing whitespace and long runs of blank lines, all of which cost
//! tokens without carrying meaning.

use once_cell::sync::Lazy;
use regex::Regex;

/// Landing page copy is capped at this many characters.
pub const MAX_COPY_CHARS: usize = 20_000;

static HYPHEN_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\n").unwrap());
static TRAILING_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Normalizes line endings and whitespace.
///
/// 1. `\r\n` and lone `\r` become `\n`.
/// 2. Hyphenated line breaks are joined (`hyphen-\nated` → `hyphenated`).
/// 3. Spaces and tabs before a newline are dropped.
/// 4. Three or more newlines collapse to one blank line.
/// 5. Runs of spaces and tabs collapse to one space.
/// 6. The result is trimmed.
pub fn normalize_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = HYPHEN_BREAK_RE.replace_all(&text, "");
    let text = TRAILING_SPACE_RE.replace_all(&text, "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    let text = SPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Truncates to at most `max_chars` characters without splitting a UTF-8
/// sequence.
pub fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_end, _)) => text[..byte_end].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_text("  hello world  "), "hello world");
    }

    #[test]
    fn test_joins_hyphenated_line_breaks() {
        assert_eq!(normalize_text("hyphen-\nated word"), "hyphenated word");
    }

    #[test]
    fn test_strips_spaces_before_line_breaks() {
        assert_eq!(normalize_text("hello   \nworld"), "hello\nworld");
        assert_eq!(normalize_text("hello\t\nworld"), "hello\nworld");
    }

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(normalize_text("hello\n\n\n\nworld"), "hello\n\nworld");
        assert_eq!(normalize_text("hello\n\nworld"), "hello\n\nworld");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize_text("a  b\t\tc \t d\n  e"), "a b c d\n e");
    }

    #[test]
    fn test_converts_line_endings() {
        assert_eq!(normalize_text("hello\r\nworld"), "hello\nworld");
        assert_eq!(normalize_text("hello\rworld"), "hello\nworld");
    }

    #[test]
    fn test_combined_cases() {
        let input = "  Multi-\nline text with   \r\nextra  \n\n\n\nspaces  ";
        assert_eq!(normalize_text(input), "Multiline text with\nextra\n\nspaces");
    }

    #[test]
    fn test_reduces_length() {
        let input = "This is a sample   \r\ndocument with many words and      \n\n\n\nexcessive spaces   and line   \r\nbreaks.";
        let normalized = normalize_text(input);

        assert!(normalized.len() < input.len());
        assert_eq!(
            normalized,
            "This is a sample\ndocument with many words and\n\nexcessive spaces and line\nbreaks."
        );
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize_text(" \r\n\t \n "), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef".to_string(), 3), "abc");
        assert_eq!(truncate_chars("abc".to_string(), 3), "abc");
        assert_eq!(truncate_chars("héllo wörld".to_string(), 4), "héll");
    }
}
