//! End-to-end tests for file-based extraction.

use std::io::Write;

use refmap_extract::{extract_metadata, Error, ExtractionConfig};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.md");

    let err = extract_metadata(&missing, ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
    assert!(err.to_string().contains("File not found"));
}

#[tokio::test]
async fn directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let err = extract_metadata(dir.path(), ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[tokio::test]
async fn empty_file_yields_zero_counts() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.md", "");

    let meta = extract_metadata(&path, ExtractionConfig::default())
        .await
        .unwrap();
    assert_eq!(meta.word_count, Some(0));
    assert_eq!(meta.reading_time, Some(0));
    assert!(meta.summary.is_none());
    assert!(meta.tldr.is_none());
}

#[tokio::test]
async fn markdown_blog_post_end_to_end() {
    let dir = TempDir::new().unwrap();
    let content = "---\n\
                   author: John Doe\n\
                   tags: typescript, testing\n\
                   ---\n\n\
                   This opening paragraph introduces the subject with enough prose to give \
                   the summary heuristics something substantial to work with downstream.\n\n\
                   > A quotation worth surfacing in the metadata\n\n\
                   The closing paragraph keeps going for long enough that the accumulated \
                   body text comfortably clears the minimum length required for a generated \
                   long summary of the document as a whole.";
    let path = write_file(&dir, "post.md", content);

    let meta = extract_metadata(&path, ExtractionConfig::default())
        .await
        .unwrap();

    assert_eq!(meta.author.as_deref(), Some("John Doe"));
    assert_eq!(meta.tags.as_deref(), Some("typescript, testing"));
    assert!(meta.quotes.as_ref().is_some_and(|q| !q.is_empty()));
    assert!(meta.word_count.unwrap() > 0);
    assert!(meta.reading_time.unwrap() >= 1);
    let tldr_len = meta.tldr.expect("tldr synthesized").chars().count();
    assert!((200..=900).contains(&tldr_len), "tldr length {tldr_len}");
}

#[tokio::test]
async fn html_page_end_to_end() {
    let dir = TempDir::new().unwrap();
    let content = "<html><head>\
                   <title>Irrelevant</title>\
                   <meta name=\"author\" content=\"Jane Doe\">\
                   <meta name=\"description\" content=\"A page description.\">\
                   <meta property=\"og:image\" content=\"https://a.example/hero.png\">\
                   </head><body>\
                   <p>Visible paragraph with some words.</p>\
                   <a href=\"https://a.example/next\">next</a>\
                   </body></html>";
    let path = write_file(&dir, "page.html", content);

    let meta = extract_metadata(&path, ExtractionConfig::default())
        .await
        .unwrap();

    assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
    assert_eq!(meta.summary.as_deref(), Some("A page description."));
    assert_eq!(
        meta.featured_images.as_deref(),
        Some(&["https://a.example/hero.png".to_string()][..])
    );
    assert_eq!(
        meta.external_links.as_deref(),
        Some(&["https://a.example/next".to_string()][..])
    );
    assert_eq!(meta.word_count, Some(6));
}

#[tokio::test]
async fn unknown_extension_extracts_as_text() {
    let dir = TempDir::new().unwrap();
    let content = "word ".repeat(500);
    let path = write_file(&dir, "notes.log", &content);

    let config = ExtractionConfig::default().with_reading_speed(200);
    let meta = extract_metadata(&path, config).await.unwrap();

    assert_eq!(meta.word_count, Some(500));
    assert_eq!(meta.reading_time, Some(3));
    assert!(meta.author.is_none());
}
