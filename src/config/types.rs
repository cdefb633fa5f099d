use serde::Deserialize;
use std::time::Duration;

/// Default page budget for a crawl
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Default politeness delay between requests (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Migration-Mapper
///
/// Every section is optional; missing sections and keys fall back to defaults
/// so that a crawl can be configured entirely from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub redirects: RedirectConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Base URL (scheme and host) of the site to crawl
    pub base_url: String,

    /// Maximum number of pages to process
    pub max_pages: usize,

    /// Delay after every request (milliseconds)
    pub delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_pages: DEFAULT_MAX_PAGES,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl CrawlerConfig {
    /// Returns the politeness delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// HTTP client configuration
///
/// The default header set mimics a desktop browser; some hosts block obvious
/// bot user agents outright.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// `User-Agent` header
    pub user_agent: String,

    /// `Accept` header
    pub accept: String,

    /// `Accept-Language` header
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

impl HttpConfig {
    /// Returns the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path prefix for every exported file (without extension)
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "output/redirect_mapping".to_string(),
        }
    }
}

/// Redirect rule configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RedirectConfig {
    /// Prefix that old listing paths are moved under when a page could not
    /// be classified
    pub property_fallback_prefix: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            property_fallback_prefix: "/properties/phuket/other/".to_string(),
        }
    }
}
