//! Data model for crawl results
//!
//! # Components
//!
//! - `PageType`: the closed classification assigned to each page
//! - `PageRecord`: one discovered page with its metadata and redirect
//! - `CrawlError`: a failed fetch
//! - `CrawlResult`: everything one run produced, handed to the exporters

mod page_type;
mod record;

// Re-export main types
pub use page_type::PageType;
pub use record::{CrawlError, CrawlMode, CrawlResult, PageRecord};
