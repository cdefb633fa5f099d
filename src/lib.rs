//! Migration-Mapper: a site crawler for URL migrations
//!
//! This crate discovers the reachable pages of an existing website, classifies
//! each page by its URL shape and markup, and suggests a destination path on the
//! new site so that every old URL can be permanently redirected.

pub mod config;
pub mod crawler;
pub mod mapping;
pub mod model;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Migration-Mapper operations
///
/// Failures inside the crawl loop never surface here: they are recorded as
/// [`model::CrawlError`] entries on the crawl result instead.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Migration-Mapper operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use mapping::{classify, RedirectMapper, StyleMarkers};
pub use model::{CrawlError, CrawlMode, CrawlResult, PageRecord, PageType};
pub use url::{is_valid_url, normalize_url, site_authority};
