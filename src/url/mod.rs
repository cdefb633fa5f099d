//! URL handling module for Migration-Mapper
//!
//! This module provides URL normalization (the deduplication key used by the
//! frontier), site authority extraction, and the crawl-scope validator.

mod domain;
mod normalize;
mod validate;

// Re-export main functions
pub use domain::site_authority;
pub use normalize::normalize_url;
pub use validate::is_valid_url;
