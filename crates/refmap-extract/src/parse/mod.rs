//! Format parsers.
//!
//! Each parser turns raw document content of one format into a common
//! intermediate form: plain text, a link list, and format-specific side
//! channels (frontmatter for Markdown, meta tags for HTML, detected URLs for
//! plain text). Parsers fail open: malformed input yields a degraded result,
//! never an error.
//!
//! - [`markdown`]: frontmatter split, link walk, syntax stripping
//! - [`html`]: DOM load, meta tags, links, images
//! - [`text`]: line-ending normalization, URL detection

pub mod html;
pub mod markdown;
pub mod text;

pub use html::{parse_html, strip_tags, HtmlImage, HtmlLink, HtmlMeta, HtmlParse};
pub use markdown::{parse_markdown, MarkdownLink, MarkdownParse};
pub use text::{extract_urls, is_plain_text, normalize_line_endings, parse_text, TextParse};
