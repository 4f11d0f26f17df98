//! Format-agnostic extraction primitives.
//!
//! These heuristics are shared by every extractor: word counting, reading
//! time, internal/external link categorization, blockquote collection, and
//! summary/TLDR synthesis. They operate on plain text; anything that needs
//! knowledge of a concrete document syntax stays in the format-specific
//! extractor that owns it.
//!
//! All lengths in this module are counted in characters, not bytes, so
//! multi-byte content behaves the same as ASCII.

use std::sync::LazyLock;

use regex::Regex;

/// Default minimum paragraph length for summary extraction.
pub const SUMMARY_MIN_LENGTH: usize = 50;
/// Minimum paragraph length when synthesizing a TLDR.
pub const TLDR_MIN_LENGTH: usize = 200;
/// Maximum TLDR length.
pub const TLDR_MAX_LENGTH: usize = 900;

static PARAGRAPH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid paragraph split regex"));
static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.!?]+[.!?]").expect("valid first sentence regex"));

/// Count whitespace-separated words.
///
/// # Examples
///
/// ```
/// use refmap_extract::toolkit::count_words;
///
/// assert_eq!(count_words("the quick  brown\nfox"), 4);
/// assert_eq!(count_words("   "), 0);
/// ```
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Calculate reading time in minutes, ceiling-rounded.
///
/// Zero words is zero minutes; anything else is at least one minute.
///
/// # Examples
///
/// ```
/// use refmap_extract::toolkit::reading_time;
///
/// assert_eq!(reading_time(0, 225), 0);
/// assert_eq!(reading_time(225, 225), 1);
/// assert_eq!(reading_time(226, 225), 2);
/// ```
pub fn reading_time(word_count: u32, words_per_minute: u32) -> u32 {
    if words_per_minute == 0 {
        return 0;
    }
    word_count.div_ceil(words_per_minute)
}

/// Links split into internal and external buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedLinks {
    /// Links whose URL starts with the configured base URL.
    pub internal: Vec<String>,
    /// All other absolute links.
    pub external: Vec<String>,
}

/// Categorize candidate URLs as internal or external.
///
/// Only `http://` and `https://` URLs are considered. A URL is internal when
/// `base_url` is set and the URL starts with it; otherwise it is external.
/// Each bucket stops accumulating at `max_links`, and the scan stops early
/// once both buckets are full.
pub fn categorize_links<'a, I>(
    urls: I,
    base_url: Option<&str>,
    max_links: usize,
) -> CategorizedLinks
where
    I: IntoIterator<Item = &'a str>,
{
    let mut links = CategorizedLinks::default();

    for url in urls {
        if url.starts_with("http://") || url.starts_with("https://") {
            if base_url.is_some_and(|base| url.starts_with(base)) {
                if links.internal.len() < max_links {
                    links.internal.push(url.to_string());
                }
            } else if links.external.len() < max_links {
                links.external.push(url.to_string());
            }
        }

        if links.internal.len() >= max_links && links.external.len() >= max_links {
            break;
        }
    }

    links
}

/// Extract quotes from blockquote-style (`>`-prefixed) lines.
///
/// A contiguous run of `>`-lines forms one quote; the `>` marker and the
/// whitespace after it are stripped and the lines are joined with single
/// spaces. Collection stops at `max_quotes`.
pub fn extract_blockquotes(content: &str, max_quotes: usize) -> Vec<String> {
    let mut quotes = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('>') {
            current.push_str(rest.trim_start());
            current.push(' ');
        } else if !current.is_empty() {
            let quote = current.trim().to_string();
            if !quote.is_empty() {
                quotes.push(quote);
            }
            current.clear();
            if quotes.len() >= max_quotes {
                break;
            }
        }
    }

    if !current.trim().is_empty() && quotes.len() < max_quotes {
        quotes.push(current.trim().to_string());
    }

    quotes.truncate(max_quotes);
    quotes
}

/// Extract a one-sentence summary from the first qualifying paragraph.
///
/// Paragraphs that start with a heading marker or a code fence, or that are
/// shorter than `min_length` characters, are skipped. The first qualifying
/// paragraph yields its first sentence, or a 200-character truncation when no
/// sentence boundary is found.
pub fn extract_summary(content: &str, min_length: usize) -> Option<String> {
    for paragraph in paragraphs(content) {
        if paragraph.starts_with('#')
            || paragraph.starts_with("```")
            || char_len(paragraph) < min_length
        {
            continue;
        }

        if let Some(sentence) = FIRST_SENTENCE.find(paragraph) {
            return Some(sentence.as_str().trim().to_string());
        }

        return Some(if char_len(paragraph) > 200 {
            format!("{}...", truncate_chars(paragraph, 200).trim_end())
        } else {
            paragraph.trim().to_string()
        });
    }

    None
}

/// Synthesize a TLDR of 200-900 characters.
///
/// First tries [`extract_summary`] with a 200-character minimum. If that
/// yields fewer than 200 characters, successive non-heading, non-code-fence
/// paragraphs are accumulated (space-joined) until the running total reaches
/// 200. Text over 900 characters is hard-truncated to 897 plus `"..."`.
/// Returns `None` when the document's prose cannot reach 200 characters.
pub fn extract_tldr(content: &str) -> Option<String> {
    let candidate = match extract_summary(content, TLDR_MIN_LENGTH) {
        Some(summary) if char_len(&summary) >= TLDR_MIN_LENGTH => summary,
        _ => {
            let mut tldr = String::new();
            for paragraph in paragraphs(content) {
                if paragraph.starts_with('#') || paragraph.starts_with("```") {
                    continue;
                }
                if !tldr.is_empty() {
                    tldr.push(' ');
                }
                tldr.push_str(paragraph);
                if char_len(&tldr) >= TLDR_MIN_LENGTH {
                    break;
                }
            }
            tldr
        }
    };

    let len = char_len(&candidate);
    if len < TLDR_MIN_LENGTH {
        return None;
    }
    if len > TLDR_MAX_LENGTH {
        return Some(format!(
            "{}...",
            truncate_chars(&candidate, TLDR_MAX_LENGTH - 3)
        ));
    }
    Some(candidate)
}

/// Split content into trimmed, non-empty blank-line-delimited paragraphs.
fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_SPLIT
        .split(content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Tests
// ============================================================================
