//! HTML parsing.
//!
//! [`parse_html`] loads a document into a DOM and pulls out the pieces the
//! extractor works from: visible text, `<meta>` tags, links, images, and
//! blockquotes. Parsing is infallible; the underlying parser recovers from
//! arbitrary tag soup, so malformed input degrades to whatever structure
//! could be salvaged.
//!
//! [`strip_tags`] is the regex fallback for callers that only need text from
//! an HTML fragment without paying for a DOM build.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid selector"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid selector"));
static BLOCKQUOTE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("blockquote").expect("valid selector"));

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static NEWLINE_PADDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Document metadata collected from `<title>` and `<meta>` tags.
///
/// Every field is raw tag content; precedence between overlapping sources
/// (Open Graph, Twitter cards, plain tags) is the extractor's call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlMeta {
    /// `<title>` text.
    pub title: Option<String>,
    /// `meta[name=description]` content.
    pub description: Option<String>,
    /// `meta[name=keywords]`, split on commas.
    pub keywords: Option<Vec<String>>,
    /// `meta[name=author]` content.
    pub author: Option<String>,
    /// `meta[property=og:title]` content.
    pub og_title: Option<String>,
    /// `meta[property=og:description]` content.
    pub og_description: Option<String>,
    /// `meta[property=og:image]` content.
    pub og_image: Option<String>,
    /// `meta[name=twitter:title]` content.
    pub twitter_title: Option<String>,
    /// `meta[name=twitter:description]` content.
    pub twitter_description: Option<String>,
    /// `meta[name=twitter:image]` content.
    pub twitter_image: Option<String>,
}

/// An anchor element: resolved `href` plus its visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlLink {
    pub url: String,
    pub text: String,
}

/// An image element: `src` plus its `alt` text, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlImage {
    pub url: String,
    pub alt: Option<String>,
}

/// Everything a single DOM pass yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlParse {
    /// Visible body text. Runs of spaces collapse to one, block elements
    /// separate paragraphs with blank lines, and three or more consecutive
    /// newlines collapse to exactly two. Script, style, and noscript
    /// contents are excluded.
    pub text: String,
    /// `<title>` and `<meta>` tag contents.
    pub meta: HtmlMeta,
    /// Anchors with a non-empty `href`, in document order.
    pub links: Vec<HtmlLink>,
    /// Images with a non-empty `src`, in document order.
    pub images: Vec<HtmlImage>,
    /// Text of top-level blockquotes, in document order. Nested blockquotes
    /// are folded into their outermost ancestor.
    pub blockquotes: Vec<String>,
}

/// Parse an HTML document into text, metadata, links, images, and quotes.
///
/// # Example
///
/// ```
/// use refmap_extract::parse::parse_html;
///
/// let parsed = parse_html(
///     "<html><head><title>Hi</title></head><body><p>Hello world</p></body></html>",
/// );
/// assert_eq!(parsed.meta.title.as_deref(), Some("Hi"));
/// assert_eq!(parsed.text, "Hello world");
/// ```
pub fn parse_html(content: &str) -> HtmlParse {
    let doc = Html::parse_document(content);

    let text = doc
        .select(&BODY_SELECTOR)
        .next()
        .map(page_text)
        .unwrap_or_else(|| page_text(doc.root_element()));

    let meta = collect_meta(&doc);

    let links = doc
        .select(&LINK_SELECTOR)
        .filter_map(|el| {
            let url = el.value().attr("href")?.trim();
            if url.is_empty() {
                return None;
            }
            Some(HtmlLink {
                url: url.to_string(),
                text: collect_text(el),
            })
        })
        .collect();

    let images = doc
        .select(&IMAGE_SELECTOR)
        .filter_map(|el| {
            let url = el.value().attr("src")?.trim();
            if url.is_empty() {
                return None;
            }
            Some(HtmlImage {
                url: url.to_string(),
                alt: el
                    .value()
                    .attr("alt")
                    .map(str::trim)
                    .filter(|alt| !alt.is_empty())
                    .map(String::from),
            })
        })
        .collect();

    let blockquotes = doc
        .select(&BLOCKQUOTE_SELECTOR)
        .filter(|el| !has_blockquote_ancestor(*el))
        .map(collect_text)
        .filter(|quote| !quote.is_empty())
        .collect();

    HtmlParse {
        text,
        meta,
        links,
        images,
        blockquotes,
    }
}

/// Strip tags from an HTML fragment with regexes, no DOM build.
///
/// Script and style blocks are removed wholesale, remaining tags are replaced
/// with spaces, common entities are decoded, and whitespace is collapsed.
pub fn strip_tags(html: &str) -> String {
    let no_scripts = SCRIPT_BLOCK.replace_all(html, " ");
    let no_styles = STYLE_BLOCK.replace_all(&no_scripts, " ");
    let no_tags = ANY_TAG.replace_all(&no_styles, " ");
    let decoded = decode_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element subtree, flattened to a single line.
fn collect_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(el, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element subtree with paragraph structure kept.
///
/// Block elements contribute blank-line separators so downstream paragraph
/// segmentation still works even when the source markup carries no newlines
/// of its own.
fn page_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(el, &mut raw);
    let spaced = HORIZONTAL_WS.replace_all(&raw, " ");
    let unpadded = NEWLINE_PADDING.replace_all(&spaced, "\n");
    EXCESS_NEWLINES.replace_all(&unpadded, "\n\n").trim().to_string()
}

fn is_block_element(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "main"
            | "blockquote"
            | "pre"
            | "ul"
            | "ol"
            | "li"
            | "table"
            | "tr"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

fn push_text(el: ElementRef<'_>, out: &mut String) {
    if matches!(el.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            push_text(child_el, out);
            if is_block_element(name) {
                out.push_str("\n\n");
            }
        }
    }
}

fn has_blockquote_ancestor(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "blockquote")
}

fn collect_meta(doc: &Html) -> HtmlMeta {
    let mut meta = HtmlMeta {
        title: doc
            .select(&TITLE_SELECTOR)
            .next()
            .map(collect_text)
            .filter(|title| !title.is_empty()),
        ..HtmlMeta::default()
    };

    for el in doc.select(&META_SELECTOR) {
        let Some(content) = el
            .value()
            .attr("content")
            .map(str::trim)
            .filter(|content| !content.is_empty())
        else {
            continue;
        };

        // Twitter cards use `name`, Open Graph uses `property`, but pages mix
        // them up often enough that both attributes are accepted for either.
        let key = el
            .value()
            .attr("name")
            .or_else(|| el.value().attr("property"))
            .map(str::to_ascii_lowercase);

        match key.as_deref() {
            Some("description") => meta.description = Some(content.to_string()),
            Some("author") => meta.author = Some(content.to_string()),
            Some("keywords") => {
                let keywords: Vec<String> = content
                    .split(',')
                    .map(str::trim)
                    .filter(|kw| !kw.is_empty())
                    .map(String::from)
                    .collect();
                if !keywords.is_empty() {
                    meta.keywords = Some(keywords);
                }
            }
            Some("og:title") => meta.og_title = Some(content.to_string()),
            Some("og:description") => meta.og_description = Some(content.to_string()),
            Some("og:image") => meta.og_image = Some(content.to_string()),
            Some("twitter:title") => meta.twitter_title = Some(content.to_string()),
            Some("twitter:description") => meta.twitter_description = Some(content.to_string()),
            Some("twitter:image") => meta.twitter_image = Some(content.to_string()),
            _ => {}
        }
    }

    meta
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ============================================================================
// Tests
// ============================================================================
