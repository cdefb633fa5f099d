//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier from the sitemap or the homepage
//! - Fetching pages one at a time with a politeness delay
//! - Classifying pages and mapping their redirects
//! - Following same-site links when no sitemap was found

use crate::config::Config;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::crawler::sitemap::SitemapResolver;
use crate::mapping::{classify, RedirectMapper};
use crate::model::{CrawlError, CrawlMode, CrawlResult, PageRecord};
use crate::url::{is_valid_url, normalize_url, site_authority};
use crate::{ConfigError, MigrateError};
use chrono::Utc;
use std::time::Duration;
use url::Url;

/// Pages between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Main crawler coordinator structure
///
/// Owns all crawl state; a coordinator runs exactly one crawl.
pub struct Coordinator {
    base_url: Url,
    site_host: String,
    delay: Duration,
    fetcher: PageFetcher,
    mapper: RedirectMapper,
    frontier: Frontier,
    pages: Vec<PageRecord>,
    errors: Vec<CrawlError>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MigrateError)` - The base URL is unusable or the HTTP client
    ///   could not be built
    pub fn new(config: Config) -> Result<Self, MigrateError> {
        let base_url = Url::parse(&config.crawler.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base_url '{}': {}",
                config.crawler.base_url, e
            ))
        })?;

        let site_host = site_authority(&base_url).ok_or_else(|| {
            ConfigError::InvalidUrl(format!("base_url '{}' has no host", base_url))
        })?;

        let fetcher = PageFetcher::new(&config.http)?;

        Ok(Self {
            base_url,
            site_host,
            delay: config.crawler.delay(),
            fetcher,
            mapper: RedirectMapper::new(&config.redirects),
            frontier: Frontier::new(config.crawler.max_pages),
            pages: Vec::new(),
            errors: Vec::new(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// This method:
    /// 1. Seeds the frontier from the sitemap, or from the homepage if the
    ///    site has none
    /// 2. Takes URLs from the frontier until it is empty or the budget is spent
    /// 3. Fetches, classifies and maps each page
    /// 4. Enqueues discovered links when crawling by link discovery
    ///
    /// Fetch failures are recorded on the result and never abort the crawl.
    pub async fn run(mut self) -> CrawlResult {
        let started_at = Utc::now();
        tracing::info!("Starting crawl of {}", self.base_url);

        let (mode, sitemap_urls) = self.seed().await;

        let mut processed = 0;
        let start_time = std::time::Instant::now();

        while let Some(url) = self.frontier.next() {
            if !self.frontier.mark_visited(&url) {
                continue;
            }

            tracing::debug!("Processing URL: {}", url);
            self.process_url(&url, mode).await;
            processed += 1;

            if processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} URLs processed, {} pages recorded, {} in frontier, {} errors",
                    processed,
                    self.pages.len(),
                    self.frontier.pending_len(),
                    self.errors.len()
                );
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        if self.frontier.pending_len() > 0 {
            tracing::info!(
                "Page budget reached, {} queued URLs left unvisited",
                self.frontier.pending_len()
            );
        }

        tracing::info!(
            "Crawl completed: {} pages, {} errors in {:?}",
            self.pages.len(),
            self.errors.len(),
            start_time.elapsed()
        );

        CrawlResult {
            base_url: self.base_url.to_string(),
            pages: self.pages,
            errors: self.errors,
            sitemap_urls,
            mode,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Seeds the frontier and decides the crawl mode
    async fn seed(&mut self) -> (CrawlMode, Vec<String>) {
        let sitemap_urls = SitemapResolver::new(&self.fetcher)
            .resolve(&self.base_url)
            .await;

        if sitemap_urls.is_empty() {
            let homepage = normalize_url(self.base_url.as_str());
            tracing::info!("Crawling by link discovery from {}", homepage);
            self.frontier.enqueue(homepage);
            return (CrawlMode::LinkDiscovery, sitemap_urls);
        }

        let added = self
            .frontier
            .seed(sitemap_urls.iter().map(|url| normalize_url(url)));
        tracing::info!("Seeded frontier with {} URLs from the sitemap", added);
        (CrawlMode::Sitemap, sitemap_urls)
    }

    /// Processes a single URL
    ///
    /// This method:
    /// 1. Fetches the page
    /// 2. On HTTP 200, parses, classifies and maps it into a `PageRecord`
    /// 3. In link discovery mode, enqueues valid same-site links
    /// 4. Otherwise records a `CrawlError`
    async fn process_url(&mut self, url: &str, mode: CrawlMode) {
        match self.fetcher.fetch_url(url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                let page_url = Url::parse(&final_url)
                    .or_else(|_| Url::parse(url))
                    .unwrap_or_else(|_| self.base_url.clone());
                let parsed = parse_html(&body, &page_url);

                let page_type = classify(url, &parsed.markers);
                let suggested_redirect = self.mapper.suggest_for(url, page_type);
                tracing::debug!("{} -> {} ({})", url, suggested_redirect, page_type);

                self.pages.push(PageRecord {
                    url: url.to_string(),
                    title: parsed.title,
                    h1: parsed.h1,
                    meta_description: parsed.meta_description,
                    canonical: parsed.canonical,
                    page_type,
                    status_code,
                    suggested_redirect,
                });

                if mode.follows_links() {
                    self.handle_discovered_links(&parsed.links);
                }
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                self.errors.push(CrawlError {
                    url: url.to_string(),
                    status_code,
                    message: format!("HTTP {}", status_code),
                });
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                self.errors.push(CrawlError {
                    url: url.to_string(),
                    status_code: 0,
                    message: error,
                });
            }
        }
    }

    /// Enqueues every valid same-site link in canonical form
    fn handle_discovered_links(&mut self, links: &[String]) {
        let added = links
            .iter()
            .filter(|link| is_valid_url(link, &self.site_host))
            .filter(|link| self.frontier.enqueue(normalize_url(link)))
            .count();

        if added > 0 {
            tracing::debug!("Discovered {} new URLs", added);
        }
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Resolve the sitemap and seed the frontier
/// 3. Fetch, classify and map pages until the frontier is exhausted
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed (individual page failures are part of the result)
/// * `Err(MigrateError)` - The crawl could not start
///
/// # Example
///
/// ```no_run
/// use migration_mapper::config::load_config;
/// use migration_mapper::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("migration.toml"))?;
/// let result = run_crawl(config).await?;
/// println!("{} pages found", result.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> crate::Result<CrawlResult> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config(base_url: &str) -> Config {
        let mut config = Config::default();
        config.crawler.base_url = base_url.to_string();
        config.crawler.delay_ms = 0;
        config
    }

    #[test]
    fn test_coordinator_creation() {
        let coordinator = Coordinator::new(create_test_config("https://example.com")).unwrap();
        assert_eq!(coordinator.site_host, "example.com");
        assert!(coordinator.delay.is_zero());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Coordinator::new(create_test_config("not a url"));
        assert!(matches!(
            result,
            Err(MigrateError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_discovered_links_are_filtered_and_normalized() {
        let mut coordinator =
            Coordinator::new(create_test_config("https://example.com")).unwrap();

        coordinator.handle_discovered_links(&[
            "https://example.com/about/".to_string(),
            "https://example.com/about#team".to_string(),
            "https://example.com/blog/?replytocom=3".to_string(),
            "https://example.com/logo.png".to_string(),
            "https://other.com/page".to_string(),
            "https://example.com/contact?utm_source=x".to_string(),
        ]);

        assert_eq!(coordinator.frontier.next().as_deref(), Some("https://example.com/about"));
        assert_eq!(
            coordinator.frontier.next().as_deref(),
            Some("https://example.com/contact")
        );
        assert_eq!(coordinator.frontier.next(), None);
    }
}
