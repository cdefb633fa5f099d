//! Configuration module for Migration-Mapper
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All keys are optional; command-line flags override file values.
//!
//! # Example
//!
//! ```no_run
//! use migration_mapper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("migration.toml")).unwrap();
//! println!("Crawling {} (budget {})", config.crawler.base_url, config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, RedirectConfig, DEFAULT_DELAY_MS,
    DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
