//! Crawl records: discovered pages, fetch failures and the aggregate result

use crate::model::PageType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// One page discovered and successfully fetched during a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Canonical URL, unique within a crawl
    pub url: String,

    /// Text of the `<title>` element (empty if missing)
    pub title: String,

    /// Text of the first `<h1>` element (empty if missing)
    pub h1: String,

    /// Content of `<meta name="description">` (empty if missing)
    pub meta_description: String,

    /// Href of `<link rel="canonical">` (empty if missing)
    pub canonical: String,

    /// Classification result
    pub page_type: PageType,

    /// HTTP status observed when fetching the page
    pub status_code: u16,

    /// Destination path on the new site
    pub suggested_redirect: String,
}

impl PageRecord {
    /// Returns the path component of the page URL, or an empty string if the
    /// URL does not parse
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }
}

/// A failed fetch, recorded and never retried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlError {
    /// The URL that failed
    pub url: String,

    /// HTTP status observed, `0` if no response was received
    pub status_code: u16,

    /// Error message
    pub message: String,
}

/// How the frontier was seeded for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlMode {
    /// Seeded from the sitemap; no link extraction
    Sitemap,

    /// Seeded with the homepage; links are followed
    LinkDiscovery,
}

impl CrawlMode {
    /// Returns true if links found on pages should be followed
    pub fn follows_links(&self) -> bool {
        matches!(self, Self::LinkDiscovery)
    }
}

/// Aggregate result of one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    /// The site that was crawled
    pub base_url: String,

    /// Discovered pages in discovery order
    pub pages: Vec<PageRecord>,

    /// Failed fetches in the order they happened
    pub errors: Vec<CrawlError>,

    /// URLs found in the sitemap (empty if none was found)
    pub sitemap_urls: Vec<String>,

    /// How the frontier was seeded
    pub mode: CrawlMode,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl CrawlResult {
    /// Counts discovered pages per page type
    pub fn page_type_counts(&self) -> BTreeMap<PageType, usize> {
        let mut counts = BTreeMap::new();
        for page in &self.pages {
            *counts.entry(page.page_type).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the number of seconds the run took
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
