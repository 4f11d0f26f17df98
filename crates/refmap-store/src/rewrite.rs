//! Content rewriting between local paths and published URLs.
//!
//! These helpers scan a block of content for path- or URL-shaped substrings
//! and swap in the mapped counterpart wherever the store knows one. Unmapped
//! matches are left untouched, so rewriting is always safe to run over
//! content with references the store has never seen.

use std::sync::LazyLock;

use regex::Regex;

use crate::store::MappingStore;

/// Absolute local paths with a document-like extension, Unix or Windows.
static LOCAL_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:[A-Z]:\\|/)[^\s"'<>|?*]+\.(?:html?|md|markdown|txt|pdf|docx?)"#).unwrap()
});

/// Published http(s) URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).unwrap());

/// Replace mapped local paths in content with their published URLs.
///
/// `pattern` overrides the default path matcher; pass `None` for the stock
/// one.
pub fn local_links_to_published(
    content: &str,
    store: &MappingStore,
    pattern: Option<&Regex>,
) -> String {
    let pattern = pattern.unwrap_or(&LOCAL_PATH_PATTERN);
    pattern
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let candidate = &caps[0];
            store
                .url_for_path(candidate)
                .unwrap_or(candidate)
                .to_string()
        })
        .into_owned()
}

/// Replace mapped published URLs in content with their local paths.
pub fn published_links_to_local(
    content: &str,
    store: &MappingStore,
    pattern: Option<&Regex>,
) -> String {
    let pattern = pattern.unwrap_or(&URL_PATTERN);
    pattern
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let candidate = &caps[0];
            store
                .path_for_url(candidate)
                .unwrap_or(candidate)
                .to_string()
        })
        .into_owned()
}

/// Look up the published URL for each path, pairing inputs with results.
pub fn batch_paths_to_urls<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    store: &MappingStore,
) -> Vec<(&'a str, Option<String>)> {
    paths
        .into_iter()
        .map(|path| (path, store.url_for_path(path).map(String::from)))
        .collect()
}

/// Look up the local path for each URL, pairing inputs with results.
pub fn batch_urls_to_paths<'a>(
    urls: impl IntoIterator<Item = &'a str>,
    store: &MappingStore,
) -> Vec<(&'a str, Option<String>)> {
    urls.into_iter()
        .map(|url| (url, store.path_for_url(url).map(String::from)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::UrlMapping;

    fn store() -> MappingStore {
        let mut store = MappingStore::new();
        store
            .insert(UrlMapping::new(
                "Post",
                "https://a.example/post/",
                "/blog/post.md",
            ))
            .unwrap();
        store
            .insert(UrlMapping::new(
                "Guide",
                "https://a.example/guide/",
                "/blog/guide.html",
            ))
            .unwrap();
        store
    }

    #[test]
    fn test_local_paths_rewritten() {
        let content = "See /blog/post.md and /blog/guide.html for details.";
        let rewritten = local_links_to_published(content, &store(), None);
        assert_eq!(
            rewritten,
            "See https://a.example/post/ and https://a.example/guide/ for details."
        );
    }

    #[test]
    fn test_unmapped_path_left_alone() {
        let content = "See /blog/unknown.md here.";
        assert_eq!(local_links_to_published(content, &store(), None), content);
    }

    #[test]
    fn test_published_urls_rewritten() {
        let content = "Read https://a.example/post/ but not https://other.example/x/.";
        let rewritten = published_links_to_local(content, &store(), None);
        assert!(rewritten.contains("/blog/post.md"));
        assert!(rewritten.contains("https://other.example/x/"));
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = Regex::new(r"/blog/\S+\.md").unwrap();
        let content = "Only /blog/post.md matches, not /blog/guide.html.";
        let rewritten = local_links_to_published(content, &store(), Some(&pattern));
        assert!(rewritten.contains("https://a.example/post/"));
        assert!(rewritten.contains("/blog/guide.html"));
    }

    #[test]
    fn test_batch_lookups() {
        let store = store();
        let paths = batch_paths_to_urls(["/blog/post.md", "/missing.md"], &store);
        assert_eq!(paths[0].1.as_deref(), Some("https://a.example/post/"));
        assert_eq!(paths[1].1, None);

        let urls = batch_urls_to_paths(["https://a.example/guide/"], &store);
        assert_eq!(urls[0].1.as_deref(), Some("/blog/guide.html"));
    }
}
