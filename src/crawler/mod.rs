//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with redirect following and timeouts
//! - HTML and sitemap parsing
//! - Sitemap discovery
//! - The frontier of pending and visited URLs
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod sitemap;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchResult, PageFetcher};
pub use frontier::Frontier;
pub use parser::{parse_html, parse_sitemap, ParsedPage, SitemapDocument};
pub use sitemap::SitemapResolver;
