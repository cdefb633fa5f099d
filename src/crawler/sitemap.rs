//! Sitemap discovery
//!
//! Probes the usual sitemap locations of a site and flattens sitemap indexes
//! into a single list of page URLs used to seed the frontier.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_sitemap;
use crate::url::{is_valid_url, site_authority};
use flate2::read::GzDecoder;
use std::collections::{HashSet, VecDeque};
use std::io::Read;
use url::Url;

/// Sitemap locations probed under the base URL, in order
///
/// Each is appended to the base URL, so a base with a path such as
/// `https://example.com/nl` is probed below that path.
const SITEMAP_LOCATIONS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/wp-sitemap.xml",
    "/sitemap/",
    "/sitemap.xml.gz",
];

/// How many levels of nested sitemap indexes are followed
const MAX_SITEMAP_DEPTH: usize = 3;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Resolves the sitemap hierarchy of a site into page URLs
pub struct SitemapResolver<'a> {
    fetcher: &'a PageFetcher,
}

impl<'a> SitemapResolver<'a> {
    pub fn new(fetcher: &'a PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Returns every valid page URL listed by the site's sitemap
    ///
    /// Locations are probed in order and the first one yielding at least one
    /// URL wins. An empty result means no usable sitemap was found; this is
    /// not an error.
    pub async fn resolve(&self, base_url: &Url) -> Vec<String> {
        let Some(site_host) = site_authority(base_url) else {
            tracing::warn!("Base URL {} has no host, skipping sitemap discovery", base_url);
            return Vec::new();
        };

        let root = base_url.as_str().trim_end_matches('/');

        for location in SITEMAP_LOCATIONS {
            let sitemap_url = format!("{}{}", root, location);

            tracing::debug!("Probing sitemap at {}", sitemap_url);
            let urls = self.collect(&sitemap_url, &site_host).await;
            if !urls.is_empty() {
                tracing::info!("Found {} URLs in sitemap at {}", urls.len(), sitemap_url);
                return urls;
            }
        }

        tracing::info!("No sitemap found for {}", base_url);
        Vec::new()
    }

    /// Collects page URLs from one sitemap and every child sitemap it lists
    async fn collect(&self, root: &str, site_host: &str) -> Vec<String> {
        let mut queue = VecDeque::from([(root.to_string(), 0usize)]);
        let mut fetched = HashSet::new();
        let mut seen_urls = HashSet::new();
        let mut urls = Vec::new();

        while let Some((sitemap_url, depth)) = queue.pop_front() {
            if !fetched.insert(sitemap_url.clone()) {
                continue;
            }

            let Some(body) = self.fetcher.fetch_bytes(&sitemap_url).await else {
                continue;
            };
            let Some(xml) = decode_body(&body) else {
                tracing::warn!("Could not decompress sitemap {}", sitemap_url);
                continue;
            };

            let document = parse_sitemap(&xml);

            for child in document.sitemaps {
                if depth < MAX_SITEMAP_DEPTH {
                    queue.push_back((child, depth + 1));
                } else {
                    tracing::warn!("Sitemap nesting too deep, skipping {}", child);
                }
            }

            for url in document.urls {
                if is_valid_url(&url, site_host) && seen_urls.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }

        urls
    }
}

/// Decodes a sitemap body, inflating it first if it is gzip-compressed
fn decode_body(body: &[u8]) -> Option<String> {
    if body.starts_with(&GZIP_MAGIC) {
        let mut xml = String::new();
        GzDecoder::new(body).read_to_string(&mut xml).ok()?;
        Some(xml)
    } else {
        Some(String::from_utf8_lossy(body).into_owned())
    }
}
