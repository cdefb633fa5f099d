//! Redirect path synthesis
//!
//! Turns a classified page into the path it should permanently redirect to on
//! the new site.

use crate::config::RedirectConfig;
use crate::model::{PageRecord, PageType};
use url::Url;

/// Old blog prefixes collapsed onto the new blog section
const BLOG_PREFIXES: &[&str] = &["/blog/", "/news/", "/article/"];

/// Old listing prefixes collapsed onto the property fallback prefix
const PROPERTY_PREFIXES: &[&str] = &["/property/", "/listing/", "/properties/"];

/// Catalog root, used for archives and as the last-resort destination
const CATALOG_ROOT: &str = "/properties";

/// Computes redirect destinations for classified pages
#[derive(Debug, Clone)]
pub struct RedirectMapper {
    property_fallback_prefix: String,
}

impl Default for RedirectMapper {
    fn default() -> Self {
        Self::new(&RedirectConfig::default())
    }
}

impl RedirectMapper {
    /// Creates a mapper from the redirect configuration
    pub fn new(config: &RedirectConfig) -> Self {
        Self {
            property_fallback_prefix: config.property_fallback_prefix.clone(),
        }
    }

    /// Suggests the destination path for a page record
    ///
    /// See [`RedirectMapper::suggest_for`] for the rules.
    pub fn suggest_redirect(&self, page: &PageRecord) -> String {
        self.suggest_for(&page.url, page.page_type)
    }

    /// Suggests the destination path for a URL of the given type
    ///
    /// # Rules
    ///
    /// | Page type | Destination |
    /// |-----------|-------------|
    /// | homepage | `/` |
    /// | about, agent | `/about` |
    /// | contact | `/contact` |
    /// | privacy | `/privacy-policy` |
    /// | terms | `/terms-and-conditions` |
    /// | rental | `/rental-services` |
    /// | faq | `/faq` |
    /// | property | `/listings/{slug}` |
    /// | blog | `/blogs/{slug}` |
    /// | location | `/locations/{slug}` |
    /// | service | `/services/{slug}` |
    /// | archive | `/properties` |
    /// | page, unknown | rewritten old path, or `/properties` |
    ///
    /// The slug is the last path segment. The result is never empty and
    /// always starts with `/`.
    pub fn suggest_for(&self, url: &str, page_type: PageType) -> String {
        let path = Url::parse(url)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| "/".to_string());

        if page_type.is_fallback() {
            return self.rewrite_path(&path);
        }
        if page_type.uses_slug() {
            return format!("{}/{}", slug_section(page_type), slug(&path));
        }
        fixed_destination(page_type).to_string()
    }

    /// Rewrites a leading blog prefix to `/blogs/` and then a leading listing
    /// prefix to the property fallback prefix. Falls back to the catalog root
    /// if neither applies.
    fn rewrite_path(&self, path: &str) -> String {
        let rewritten = replace_prefix(path, BLOG_PREFIXES, "/blogs/");
        let rewritten = replace_prefix(&rewritten, PROPERTY_PREFIXES, &self.property_fallback_prefix);

        if rewritten != path {
            rewritten
        } else {
            CATALOG_ROOT.to_string()
        }
    }
}

/// New-site section holding pages whose destination is built from a slug
fn slug_section(page_type: PageType) -> &'static str {
    match page_type {
        PageType::Property => "/listings",
        PageType::Blog => "/blogs",
        PageType::Location => "/locations",
        PageType::Service => "/services",
        _ => CATALOG_ROOT,
    }
}

/// Destination shared by every page of a type that has no slug
fn fixed_destination(page_type: PageType) -> &'static str {
    match page_type {
        PageType::Homepage => "/",
        PageType::About | PageType::Agent => "/about",
        PageType::Contact => "/contact",
        PageType::Privacy => "/privacy-policy",
        PageType::Terms => "/terms-and-conditions",
        PageType::Rental => "/rental-services",
        PageType::Faq => "/faq",
        _ => CATALOG_ROOT,
    }
}

/// Returns the last segment of a path, ignoring trailing slashes
fn slug(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Replaces the first matching prefix of `path` with `replacement`
fn replace_prefix(path: &str, prefixes: &[&str], replacement: &str) -> String {
    for prefix in prefixes {
        if let Some(rest) = path.strip_prefix(prefix) {
            return format!("{}{}", replacement, rest);
        }
    }
    path.to_string()
}
