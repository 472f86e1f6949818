//! Article content extraction.
//!
//! Turns arbitrary HTML into a clean article body, title, and representative
//! image. The heuristic walks a fixed priority list of content-area
//! selectors, keeps paragraphs long enough to be prose rather than
//! navigation, and falls back to headings and finally to a whole-document
//! scan that skips boilerplate regions.

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::fetch::{FetchConfig, fetch_url};
use crate::parse::{Document, Element};
use crate::Result;

/// Selectors tried in order when locating the main content area.
const CONTENT_SELECTORS: &[&str] =
    &["article", "main", ".content", ".post", ".entry", ".article-content", "#content", "[role=\"main\"]"];

/// Elements whose descendants are ignored by the whole-document fallback.
const BOILERPLATE_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Substituted when extraction finds nothing usable.
pub const NO_CONTENT_SENTINEL: &str = "No content could be extracted from this URL.";

/// Configuration for content extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Maximum length of the extracted text in characters.
    pub max_text_length: usize,
    /// Paragraphs at or below this length are treated as navigation noise.
    pub min_paragraph_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_text_length: 8000, min_paragraph_chars: 50 }
    }
}

/// The result of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Cleaned article text. Never empty: falls back to
    /// [`NO_CONTENT_SENTINEL`] when nothing was found.
    pub text: String,
    /// Absolute URL of the hero image, if one was found.
    pub image_url: Option<String>,
    /// Page title, if one was found.
    pub title: Option<String>,
}

/// Fetches a URL and extracts its main content.
pub async fn extract_content(url: &str, fetch: &FetchConfig, config: &ExtractConfig) -> Result<ExtractedContent> {
    let html = fetch_url(url, fetch).await?;
    let page_url = Url::parse(url).ok();
    let content = extract_from_html(&html, page_url.as_ref(), config);

    debug!(
        chars = content.text.chars().count(),
        has_title = content.title.is_some(),
        has_image = content.image_url.is_some(),
        "extraction complete"
    );

    Ok(content)
}

/// Extracts title, hero image, and body text from already-fetched HTML.
///
/// `page_url` is used to resolve relative image paths against the page's
/// origin; without it relative paths are returned unchanged.
pub fn extract_from_html(html: &str, page_url: Option<&Url>, config: &ExtractConfig) -> ExtractedContent {
    let doc = Document::parse(html);

    let title = extract_title(&doc);
    let image_url = extract_image(&doc, page_url);

    let body = extract_body_text(&doc, config);
    let normalized = normalize_text(&body);
    let text = truncate_text(&normalized, config.max_text_length);

    let text = if text.is_empty() { NO_CONTENT_SENTINEL.to_string() } else { text };

    ExtractedContent { text, image_url, title }
}

/// Extract title with priority fallback:
/// 1. Open Graph `og:title`
/// 2. `<title>` element
/// 3. First `<h1>` element
fn extract_title(doc: &Document) -> Option<String> {
    if let Some(title) = doc.meta_content("og:title") {
        return Some(title);
    }

    if let Some(title) = doc.title() {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    if let Ok(headings) = doc.select("h1")
        && let Some(first) = headings.first()
    {
        let text = first.text();
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    None
}

/// Extract the hero image with priority fallback:
/// 1. Open Graph `og:image`
/// 2. Twitter-card `twitter:image`
/// 3. Largest `width × height` image inside the content area
///
/// Relative paths are resolved against the page origin.
fn extract_image(doc: &Document, page_url: Option<&Url>) -> Option<String> {
    let raw = doc
        .meta_content("og:image")
        .or_else(|| doc.meta_content("twitter:image"))
        .or_else(|| largest_content_image(doc));

    raw.map(|src| resolve_against_origin(&src, page_url))
}

/// Picks the `<img>` with the largest declared `width × height` product
/// inside the content area. Inline `data:` URIs and images without explicit
/// dimensions are skipped.
fn largest_content_image(doc: &Document) -> Option<String> {
    let area = content_area(doc)?;
    let mut best: Option<(String, u64)> = None;

    for element in &area {
        let Ok(images) = element.select("img") else { continue };
        for img in images {
            let Some(src) = img.attr("src") else { continue };
            if src.starts_with("data:") {
                continue;
            }

            let width: u64 = img.attr("width").and_then(|v| v.parse().ok()).unwrap_or(0);
            let height: u64 = img.attr("height").and_then(|v| v.parse().ok()).unwrap_or(0);
            let size = width * height;

            if size > best.as_ref().map_or(0, |(_, s)| *s) {
                best = Some((src.to_string(), size));
            }
        }
    }

    best.map(|(src, _)| src)
}

fn resolve_against_origin(src: &str, page_url: Option<&Url>) -> String {
    if src.starts_with("http") {
        return src.to_string();
    }

    let Some(base) = page_url else {
        return src.to_string();
    };

    let origin = base.origin().ascii_serialization();
    if src.starts_with('/') { format!("{}{}", origin, src) } else { format!("{}/{}", origin, src) }
}

/// Returns all elements matched by the first content selector that matches
/// anything, or `None` when no selector matches.
fn content_area(doc: &'_ Document) -> Option<Vec<Element<'_>>> {
    for selector in CONTENT_SELECTORS {
        if let Ok(elements) = doc.select(selector)
            && !elements.is_empty()
        {
            return Some(elements);
        }
    }

    None
}

/// Collects body text as paragraphs separated by blank lines.
///
/// Inside the content area, paragraphs longer than the noise threshold win;
/// headings are the in-area fallback. Whenever nothing has accumulated the
/// whole document is scanned, excluding paragraphs nested in boilerplate
/// elements.
fn extract_body_text(doc: &Document, config: &ExtractConfig) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    if let Some(area) = content_area(doc) {
        for element in &area {
            if let Ok(candidates) = element.select("p") {
                for p in candidates {
                    let text = p.text();
                    let text = text.trim();
                    if text.chars().count() > config.min_paragraph_chars {
                        paragraphs.push(text.to_string());
                    }
                }
            }
        }

        if paragraphs.is_empty() {
            for element in &area {
                if let Ok(headings) = element.select("h1, h2, h3, h4, h5, h6") {
                    for h in headings {
                        let text = h.text();
                        let text = text.trim();
                        if !text.is_empty() {
                            paragraphs.push(text.to_string());
                        }
                    }
                }
            }
        }
    }

    if paragraphs.is_empty()
        && let Ok(candidates) = doc.select("p")
    {
        for p in candidates {
            if p.has_ancestor_in(BOILERPLATE_TAGS) {
                continue;
            }
            let text = p.text();
            let text = text.trim();
            if text.chars().count() > config.min_paragraph_chars {
                paragraphs.push(text.to_string());
            }
        }
    }

    paragraphs.join("\n\n")
}

/// Collapses runs of 3+ newlines to one blank line and all other whitespace
/// runs to single spaces, then trims line ends.
fn normalize_text(text: &str) -> String {
    let newline_runs = Regex::new(r"\n\s*\n\s*\n+").unwrap();
    let collapsed = newline_runs.replace_all(text, "\n\n");

    let space_runs = Regex::new(r"[^\S\n]+").unwrap();
    let spaced = space_runs.replace_all(&collapsed, " ");

    spaced.lines().map(str::trim).collect::<Vec<_>>().join("\n").trim().to_string()
}

/// Truncates to `max` characters, appending an ellipsis marker if anything
/// was cut.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut truncated: String = text.chars().take(max).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn extract(html: &str) -> ExtractedContent {
        extract_from_html(html, None, &ExtractConfig::default())
    }

    fn extract_with_url(html: &str, url: &str) -> ExtractedContent {
        let page_url = Url::parse(url).unwrap();
        extract_from_html(html, Some(&page_url), &ExtractConfig::default())
    }

    fn long_paragraph(len: usize) -> String {
        "word ".repeat(len / 5).trim_end().to_string()
    }

    #[test]
    fn test_title_prefers_open_graph() {
        let html = r#"
            <html>
            <head>
                <title>Document Title</title>
                <meta property="og:title" content="OG Title">
            </head>
            <body><h1>Heading Title</h1></body>
            </html>
        "#;
        assert_eq!(extract(html).title, Some("OG Title".to_string()));
    }

    #[rstest]
    #[case("<html><head><title>Document Title</title></head><body><h1>Heading</h1></body></html>", Some("Document Title"))]
    #[case("<html><head></head><body><h1>Heading Title</h1></body></html>", Some("Heading Title"))]
    #[case("<html><head><title>  </title></head><body><h1>Heading Title</h1></body></html>", Some("Heading Title"))]
    #[case("<html><head></head><body><p>No headings here at all</p></body></html>", None)]
    fn test_title_fallback_chain(#[case] html: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract(html).title, expected.map(String::from));
    }

    #[test]
    fn test_image_prefers_og_then_twitter() {
        let html = r#"
            <html><head>
                <meta property="og:image" content="https://example.com/og.png">
                <meta name="twitter:image" content="https://example.com/card.png">
            </head><body></body></html>
        "#;
        assert_eq!(extract(html).image_url, Some("https://example.com/og.png".to_string()));

        let html = r#"
            <html><head>
                <meta name="twitter:image" content="https://example.com/card.png">
            </head><body></body></html>
        "#;
        assert_eq!(extract(html).image_url, Some("https://example.com/card.png".to_string()));
    }

    #[test]
    fn test_image_largest_in_content_area() {
        let html = r#"
            <html><body>
                <article>
                    <img src="/small.jpg" width="100" height="100">
                    <img src="/large.jpg" width="1200" height="800">
                    <img src="data:image/png;base64,AAAA" width="9999" height="9999">
                    <img src="/no-dimensions.jpg">
                </article>
            </body></html>
        "#;
        let content = extract_with_url(html, "https://example.com/posts/1");
        assert_eq!(content.image_url, Some("https://example.com/large.jpg".to_string()));
    }

    #[test]
    fn test_image_without_dimensions_is_not_picked() {
        let html = r#"
            <html><body><article><img src="/only.jpg"></article></body></html>
        "#;
        assert_eq!(extract(html).image_url, None);
    }

    #[test]
    fn test_relative_image_resolved_against_origin() {
        let html = r#"
            <html><body><article><img src="assets/hero.png" width="10" height="10"></article></body></html>
        "#;
        let content = extract_with_url(html, "https://example.com/deep/path/page.html");
        assert_eq!(content.image_url, Some("https://example.com/assets/hero.png".to_string()));
    }

    #[test]
    fn test_body_filters_short_paragraphs() {
        let body = long_paragraph(200);
        let html = format!(
            r#"<html><body><article>
                <p>Menu</p>
                <p>{}</p>
                <p>Share</p>
            </article></body></html>"#,
            body
        );
        let content = extract(&html);
        assert_eq!(content.text, body);
    }

    #[test]
    fn test_body_heading_fallback_inside_content_area() {
        let html = r#"
            <html><body><main>
                <h2>First Section</h2>
                <h3>Second Section</h3>
                <p>short</p>
            </main></body></html>
        "#;
        let content = extract(html);
        assert_eq!(content.text, "First Section\n\nSecond Section");
    }

    #[test]
    fn test_body_whole_document_fallback_skips_boilerplate() {
        let noise = long_paragraph(120);
        let body = long_paragraph(300);
        let html = format!(
            r#"<html><body>
                <nav><p>{noise}</p></nav>
                <header><p>{noise}</p></header>
                <div><p>{body}</p></div>
                <footer><p>{noise}</p></footer>
            </body></html>"#,
        );
        let content = extract(&html);
        assert_eq!(content.text, body);
    }

    #[test]
    fn test_content_area_priority_order() {
        let in_article = long_paragraph(150);
        let in_div = long_paragraph(150).replace("word", "filler");
        let html = format!(
            r#"<html><body>
                <div class="content"><p>{in_div}</p></div>
                <article><p>{in_article}</p></article>
            </body></html>"#,
        );
        let content = extract(&html);
        assert_eq!(content.text, in_article);
    }

    #[test]
    fn test_paragraphs_joined_with_blank_lines() {
        let first = long_paragraph(100);
        let second = long_paragraph(100).replace("word", "term");
        let html = format!("<html><body><article><p>{first}</p><p>{second}</p></article></body></html>");
        let content = extract(&html);
        assert_eq!(content.text, format!("{}\n\n{}", first, second));
    }

    #[test]
    fn test_whitespace_normalization() {
        let html = "<html><body><article><p>Spaced    out\ttext that keeps going long enough to pass the noise \
                    filter for paragraphs</p></article></body></html>";
        let content = extract(html);
        assert!(!content.text.contains("  "));
        assert!(!content.text.contains('\t'));
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        let config = ExtractConfig { max_text_length: 100, ..Default::default() };
        let html = format!("<html><body><article><p>{}</p></article></body></html>", long_paragraph(400));
        let content = extract_from_html(&html, None, &config);
        assert_eq!(content.text.chars().count(), 103);
        assert!(content.text.ends_with("..."));
    }

    #[test]
    fn test_exact_length_body_is_not_truncated() {
        let body = long_paragraph(1200);
        assert_eq!(body.chars().count(), 1199);
        let html = format!("<html><body><article><p>{}</p></article></body></html>", body);
        let content = extract(&html);
        assert_eq!(content.text.chars().count(), 1199);
        assert!(!content.text.ends_with("..."));
    }

    #[test]
    fn test_empty_page_yields_sentinel() {
        let content = extract("<html><body><div>nothing substantial</div></body></html>");
        assert_eq!(content.text, NO_CONTENT_SENTINEL);
        assert_eq!(content.image_url, None);
    }

    #[test]
    fn test_full_article_page() {
        let body = long_paragraph(1200);
        let html = format!(
            r#"<html>
            <head>
                <title>Fallback Title</title>
                <meta property="og:title" content="A Big Announcement">
                <meta property="og:image" content="https://example.com/hero.jpg">
            </head>
            <body>
                <nav><p>Home | About | Contact and more links that run long enough to be prose</p></nav>
                <article><p>{}</p></article>
            </body>
            </html>"#,
            body
        );
        let content = extract_with_url(&html, "https://example.com/article");
        assert_eq!(content.title, Some("A Big Announcement".to_string()));
        assert_eq!(content.image_url, Some("https://example.com/hero.jpg".to_string()));
        assert_eq!(content.text, body);
    }
}
