//! Plain-text parsing.
//!
//! The thinnest of the three parsers: normalize line endings, detect URLs,
//! and count lines and characters. [`is_plain_text`] classifies content as
//! text or binary by printable-character ratio; format dispatch itself goes
//! by file extension, so the check is offered to callers rather than applied
//! here.

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap());

/// Minimum share of printable ASCII (plus tab/newline) for content to be
/// treated as text.
const PRINTABLE_RATIO_THRESHOLD: f64 = 0.8;

/// Result of a plain-text parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextParse {
    /// Content with line endings normalized to `\n`.
    pub text: String,
    /// URLs detected in the content, deduplicated in order of first
    /// appearance.
    pub urls: Vec<String>,
    /// Number of lines in the normalized text.
    pub line_count: usize,
    /// Number of characters in the normalized text.
    pub char_count: usize,
}

/// Parse plain text content.
///
/// # Example
///
/// ```
/// use refmap_extract::parse::parse_text;
///
/// let parsed = parse_text("See https://example.com/docs.\r\nSecond line.");
/// assert_eq!(parsed.urls, vec!["https://example.com/docs"]);
/// assert_eq!(parsed.line_count, 2);
/// ```
pub fn parse_text(content: &str) -> TextParse {
    let text = normalize_line_endings(content);
    let urls = extract_urls(&text);
    let line_count = text.lines().count();
    let char_count = text.chars().count();
    TextParse {
        text,
        urls,
        line_count,
        char_count,
    }
}

/// Normalize CRLF and bare CR line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Detect `http://` and `https://` URLs, deduplicated in order of first
/// appearance. Trailing sentence punctuation is not part of the URL.
pub fn extract_urls(content: &str) -> Vec<String> {
    let mut urls = Vec::new();
    for found in URL_PATTERN.find_iter(content) {
        let url = found.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if !url.is_empty() && !urls.iter().any(|seen| seen == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

/// Check whether content looks like text rather than binary data.
///
/// Empty content counts as text. A null byte, or a printable-ASCII share at
/// or below 80%, marks the content as binary.
pub fn is_plain_text(content: &str) -> bool {
    if content.is_empty() {
        return true;
    }
    if content.contains('\0') {
        return false;
    }
    let total = content.chars().count();
    let printable = content
        .chars()
        .filter(|c| matches!(c, '\x20'..='\x7e' | '\n' | '\r' | '\t'))
        .count();
    printable as f64 / total as f64 > PRINTABLE_RATIO_THRESHOLD
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------
    // Line endings and counts
    // -------------------------------------------------------------------

    #[test]
    fn test_crlf_and_cr_normalized() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_counts() {
        let parsed = parse_text("one\r\ntwo\nthree");
        assert_eq!(parsed.line_count, 3);
        assert_eq!(parsed.char_count, "one\ntwo\nthree".chars().count());
    }

    #[test]
    fn test_empty_content() {
        let parsed = parse_text("");
        assert_eq!(parsed.line_count, 0);
        assert_eq!(parsed.char_count, 0);
        assert!(parsed.urls.is_empty());
    }

    // -------------------------------------------------------------------
    // URL detection
    // -------------------------------------------------------------------

    #[test]
    fn test_urls_detected_and_deduplicated() {
        let parsed = parse_text(
            "Start at https://example.com/a then http://other.example/b, \
             and back to https://example.com/a again.",
        );
        assert_eq!(
            parsed.urls,
            vec!["https://example.com/a", "http://other.example/b"]
        );
    }

    #[test]
    fn test_url_trailing_punctuation_trimmed() {
        assert_eq!(
            extract_urls("Read https://example.com/page. Done?"),
            vec!["https://example.com/page"]
        );
    }

    #[test]
    fn test_url_scheme_case_insensitive() {
        assert_eq!(
            extract_urls("HTTPS://Example.COM/Path"),
            vec!["HTTPS://Example.COM/Path"]
        );
    }

    #[test]
    fn test_no_urls() {
        assert!(extract_urls("nothing to see here, not even ftp://x").is_empty());
    }

    // -------------------------------------------------------------------
    // Binary detection
    // -------------------------------------------------------------------

    #[test]
    fn test_ordinary_text_is_plain() {
        assert!(is_plain_text("Just some notes.\nWith lines.\n"));
        assert!(is_plain_text(""));
    }

    #[test]
    fn test_null_byte_is_binary() {
        assert!(!is_plain_text("almost text\0but not"));
    }

    #[test]
    fn test_mostly_unprintable_is_binary() {
        let junk: String = std::iter::repeat('\u{1}').take(90).chain("short".chars()).collect();
        assert!(!is_plain_text(&junk));
    }

    #[test]
    fn test_unicode_heavy_text_is_binary_by_ratio() {
        // The heuristic is ASCII-based on purpose: content that is mostly
        // non-ASCII trips the binary gate.
        let content = "данные".repeat(40);
        assert!(!is_plain_text(&content));
    }
}
