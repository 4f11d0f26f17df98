//! Markdown parsing: frontmatter, links, and plain text.
//!
//! [`parse_markdown`] splits a `---`-delimited frontmatter block from the
//! body, walks the body's block structure with `pulldown-cmark` to collect
//! links, and strips Markdown syntax from the body to produce plain text.
//!
//! Frontmatter is parsed as YAML first (JSON frontmatter parses as the YAML
//! subset it is), with a TOML fallback. A block that parses as neither is
//! logged and dropped; the body is still returned. Parse problems are never
//! fatal to the caller.
//!
//! # Example
//!
//! ```rust
//! use refmap_extract::parse::parse_markdown;
//!
//! let content = "---\nauthor: Jane\n---\n\nSee [docs](https://example.com/docs).";
//! let parsed = parse_markdown(content);
//!
//! assert_eq!(
//!     parsed.frontmatter.as_ref().and_then(|fm| fm.get("author")).and_then(|v| v.as_str()),
//!     Some("Jane"),
//! );
//! assert_eq!(parsed.links[0].url, "https://example.com/docs");
//! assert_eq!(parsed.text, "See docs.");
//! ```

use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

/// A link collected from the Markdown document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// Link destination URL.
    pub url: String,
    /// Optional link title (`[text](url "title")`).
    pub title: Option<String>,
    /// Anchor text, if any.
    pub text: Option<String>,
}

/// Result of parsing a Markdown document.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParse {
    /// Plain text with Markdown syntax stripped (frontmatter excluded).
    pub text: String,
    /// Parsed frontmatter, if present and valid.
    pub frontmatter: Option<Value>,
    /// Links collected from the document tree.
    pub links: Vec<MarkdownLink>,
    /// The raw frontmatter block, when delimiters were found.
    pub raw_frontmatter: Option<String>,
}

impl MarkdownParse {
    /// Deserialize the frontmatter into a caller-defined type.
    ///
    /// Returns `Ok(None)` when the document had no frontmatter.
    pub fn deserialize_frontmatter<T: DeserializeOwned>(&self) -> refmap_core::Result<Option<T>> {
        match &self.frontmatter {
            Some(value) => {
                let parsed: T = serde_yaml::from_value(value.clone()).map_err(|e| {
                    refmap_core::Error::parse(format!("Failed to deserialize frontmatter: {e}"))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }
}

/// Parse Markdown content into plain text, frontmatter, and links.
///
/// Never fails: malformed frontmatter degrades to `frontmatter: None` and the
/// body is processed as-is.
pub fn parse_markdown(content: &str) -> MarkdownParse {
    let (frontmatter, raw_frontmatter, body) = split_frontmatter(content);

    MarkdownParse {
        text: strip_markdown(body),
        links: collect_links(body),
        frontmatter,
        raw_frontmatter,
    }
}

/// Split a leading `---`-delimited frontmatter block from the body.
///
/// Returns the parsed frontmatter value (if any), the raw block text (when
/// delimiters were present, even if parsing failed), and the body.
fn split_frontmatter(content: &str) -> (Option<Value>, Option<String>, &str) {
    if !content.starts_with("---") {
        return (None, None, content);
    }

    let after_open = match content[3..].find('\n') {
        Some(pos) => &content[3 + pos + 1..],
        None => return (None, None, content),
    };

    // Empty frontmatter (`---` immediately after the opener) or the normal
    // `\n---` closing delimiter.
    let (raw, after_close) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else if let Some(close) = after_open.find("\n---") {
        (&after_open[..close], &after_open[close + 4..])
    } else {
        log::warn!("Frontmatter opening delimiter found but no closing delimiter");
        return (None, None, content);
    };

    let body = after_close.strip_prefix('\n').unwrap_or(after_close);
    (parse_frontmatter_block(raw), Some(raw.to_string()), body)
}

/// Parse a frontmatter block as YAML, falling back to TOML.
///
/// Only mapping-shaped results count: YAML will happily read almost any text
/// as a plain scalar, which is not frontmatter.
fn parse_frontmatter_block(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }

    if let Ok(value @ Value::Mapping(_)) = serde_yaml::from_str::<Value>(raw) {
        return Some(value);
    }

    if let Ok(table) = raw.parse::<toml::Table>() {
        if let Ok(value @ Value::Mapping(_)) = serde_yaml::to_value(&table) {
            return Some(value);
        }
    }

    log::warn!("Frontmatter block is not a valid YAML or TOML mapping");
    None
}

/// Walk the document tree and collect every link's URL, title, and text.
fn collect_links(body: &str) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    let mut current: Option<MarkdownLink> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                current = Some(MarkdownLink {
                    url: dest_url.to_string(),
                    title: (!title.is_empty()).then(|| title.to_string()),
                    text: None,
                });
            }
            Event::End(TagEnd::Link) => {
                if let Some(link) = current.take() {
                    links.push(link);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(link) = current.as_mut() {
                    match link.text.as_mut() {
                        Some(existing) => existing.push_str(&text),
                        None => link.text = Some(text.to_string()),
                    }
                }
            }
            _ => {}
        }
    }

    links
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code fence regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+`").expect("valid inline code regex"));
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading regex"));
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").expect("valid bold regex"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").expect("valid italic regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid image regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static BLOCKQUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>\s*").expect("valid blockquote regex"));
static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(-{3,}|\*{3,}|_{3,})$").expect("valid hr regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").expect("valid bullet regex"));
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").expect("valid ordered list regex"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Strip Markdown syntax, leaving plain text.
///
/// Images are removed entirely; links keep their anchor text. Runs of three
/// or more newlines collapse to two.
fn strip_markdown(body: &str) -> String {
    let text = CODE_FENCE.replace_all(body, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    // Images before links: image syntax contains link syntax
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = BLOCKQUOTE_MARKER.replace_all(&text, "");
    let text = HORIZONTAL_RULE.replace_all(&text, "");
    let text = BULLET_MARKER.replace_all(&text, "");
    let text = ORDERED_MARKER.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

// ============================================================================
// Tests
// ============================================================================
