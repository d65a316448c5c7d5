//! HTML parser for extracting links and page metadata
//!
//! This module handles parsing fetched pages to extract:
//! - Links to follow (from `<a href>` tags), resolved to absolute HTTP(S) URLs
//! - Page title
//! - A short excerpt of the body text for the persistence sink
//!
//! Malformed markup never fails: the parser degrades to whatever it can
//! recover, down to an empty page.

use scraper::{Html, Selector};
use url::Url;

/// Maximum number of characters kept from the body text
pub const EXCERPT_CHARS: usize = 500;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// The page title (from the <title> tag)
    pub title: Option<String>,

    /// Whitespace-collapsed body text, at most [`EXCERPT_CHARS`] characters
    pub excerpt: String,

    /// Links in document order, absolute, duplicates preserved
    pub links: Vec<String>,
}

/// Turns a fetched page into links (and metadata) for the crawl engine
pub trait LinkExtractor: Send + Sync {
    /// Parses a page fetched from `base_url`
    fn parse(&self, base_url: &str, body: &str) -> ParsedPage;

    /// Returns just the absolute HTTP(S) links of a page
    fn extract(&self, base_url: &str, body: &str) -> Vec<String> {
        self.parse(base_url, body).links
    }
}

/// [`LinkExtractor`] built on `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn parse(&self, base_url: &str, body: &str) -> ParsedPage {
        match Url::parse(base_url) {
            Ok(base) => parse_html(body, &base),
            Err(e) => {
                tracing::debug!("Cannot resolve links against {}: {}", base_url, e);
                let document = Html::parse_document(body);
                ParsedPage {
                    title: extract_title(&document),
                    excerpt: extract_excerpt(&document),
                    links: Vec::new(),
                }
            }
        }
    }
}

/// Parses HTML content and extracts links and metadata
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a href="...">`, relative hrefs resolved against `base_url`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that is not HTTP(S) after resolution
///
/// # Example
///
/// ```
/// use crawl_bench::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        excerpt: extract_excerpt(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the body text, whitespace collapsed, truncated to [`EXCERPT_CHARS`]
fn extract_excerpt(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    body.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(EXCERPT_CHARS)
        .collect()
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
