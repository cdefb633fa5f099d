//! HTML and sitemap parser
//!
//! This module handles parsing fetched documents to extract:
//! - Page metadata (title, first heading, meta description, canonical link)
//! - Body-class style markers used by the classifier
//! - Links to follow (from `<a>` tags)
//! - Sitemap entries (child sitemaps and page URLs)

use crate::mapping::StyleMarkers;
use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracted information from an HTML page
///
/// Missing elements yield empty strings rather than errors.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Text of the `<title>` element
    pub title: String,

    /// Text of the first `<h1>` element
    pub h1: String,

    /// Content of `<meta name="description">`
    pub meta_description: String,

    /// Href of `<link rel="canonical">`
    pub canonical: String,

    /// Class names on the `<body>` element
    pub markers: StyleMarkers,

    /// All anchor links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Entries of a sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// `<sitemap><loc>` entries: child sitemaps of an index
    pub sitemaps: Vec<String>,

    /// `<url><loc>` entries: page URLs
    pub urls: Vec<String>,
}

/// Parses HTML content and extracts metadata and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// Malformed markup is parsed leniently and never fails.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was served from, for resolving relative links
///
/// # Example
///
/// ```
/// use migration_mapper::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body class="home"><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// assert!(parsed.markers.contains("home"));
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: first_text(&document, "title"),
        h1: first_text(&document, "h1"),
        meta_description: first_attr(&document, r#"meta[name="description"]"#, "content"),
        canonical: first_attr(&document, r#"link[rel~="canonical"]"#, "href"),
        markers: StyleMarkers::from_class_attr(&first_attr(&document, "body", "class")),
        links: extract_links(&document, base_url),
    }
}

/// Returns the whitespace-normalized text of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .unwrap_or_default()
}

/// Returns the trimmed attribute value of the first element matching `selector`
fn first_attr(document: &Html, selector: &str, attr: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Joins an element's text nodes, collapsing runs of whitespace
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts all followable anchor links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}

/// Parses a sitemap or sitemap index document
///
/// `<loc>` text may be plain, entity-escaped or wrapped in CDATA. Both
/// document kinds are read leniently: a file that is not a sitemap yields no
/// entries, and malformed XML yields the entries read before the error.
///
/// # Example
///
/// ```
/// use migration_mapper::crawler::parse_sitemap;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/about/</loc></url>
/// </urlset>"#;
/// let doc = parse_sitemap(xml);
/// assert_eq!(doc.urls, vec!["https://example.com/about/".to_string()]);
/// assert!(doc.sitemaps.is_empty());
/// ```
pub fn parse_sitemap(xml: &str) -> SitemapDocument {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut document = SitemapDocument::default();
    let mut entry: Option<SitemapEntry> = None;
    let mut loc: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => match element.local_name().as_ref() {
                b"sitemap" => entry = Some(SitemapEntry::Sitemap),
                b"url" => entry = Some(SitemapEntry::Url),
                b"loc" if entry.is_some() => loc = Some(String::new()),
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if let Some(loc) = loc.as_mut() {
                    match text.unescape() {
                        Ok(value) => loc.push_str(&value),
                        Err(_) => loc.push_str(&String::from_utf8_lossy(&text)),
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(loc) = loc.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"loc" => {
                    let value = loc.take().unwrap_or_default();
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    match entry {
                        Some(SitemapEntry::Sitemap) => document.sitemaps.push(value.to_string()),
                        Some(SitemapEntry::Url) => document.urls.push(value.to_string()),
                        None => {}
                    }
                }
                b"sitemap" | b"url" => entry = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(
                    "Stopped reading sitemap at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    document
}

/// The sitemap element a `<loc>` belongs to
#[derive(Debug, Clone, Copy)]
enum SitemapEntry {
    Sitemap,
    Url,
}
