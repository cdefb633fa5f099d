use crate::model::PageType;
use std::collections::BTreeSet;
use url::Url;

/// Path fragments of single property listings
const PROPERTY_PATHS: &[&str] = &[
    "/property/",
    "/listing/",
    "/villa/",
    "/house/",
    "/condo/",
    "/apartment/",
];
const PROPERTY_MARKERS: &[&str] = &["single-property", "single-listing"];

const BLOG_PATHS: &[&str] = &["/blog/", "/news/", "/article/"];
const BLOG_MARKERS: &[&str] = &["single-post"];

const ARCHIVE_PATHS: &[&str] = &["/category/", "/tag/"];
const ARCHIVE_MARKERS: &[&str] = &["archive", "category"];

const AGENT_PATHS: &[&str] = &["/agent/", "/agents/"];

const PAGE_MARKERS: &[&str] = &["page"];

/// Keyword rules for the static page types, checked in order after the
/// structural types. English and Dutch terms are both recognized.
const STATIC_RULES: &[(PageType, &[&str])] = &[
    (PageType::About, &["/about", "/over-ons", "/team"]),
    (PageType::Contact, &["/contact", "/contactus"]),
    (PageType::Privacy, &["/privacy", "/gdpr"]),
    (PageType::Terms, &["/terms", "/voorwaarden", "/conditions"]),
    (PageType::Service, &["/service", "/dienst"]),
    (PageType::Rental, &["/rental", "/verhuur", "/rent"]),
    (PageType::Location, &["/location", "/area", "/region"]),
    (PageType::Faq, &["/faq", "/veelgestelde-vragen"]),
];

/// Template markers of a page, taken from the classes on its `<body>` element
///
/// Themes describe the rendering template through body classes such as
/// `single-post`, `post-type-archive` or `page-template-default`. A marker
/// query matches when any class contains the queried text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMarkers {
    classes: BTreeSet<String>,
}

impl StyleMarkers {
    /// Builds a marker set from class names
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes
                .into_iter()
                .map(Into::into)
                .filter(|class: &String| !class.is_empty())
                .collect(),
        }
    }

    /// Builds a marker set from a whitespace-separated `class` attribute value
    pub fn from_class_attr(attr: &str) -> Self {
        Self::new(attr.split_whitespace())
    }

    /// Returns true if any class contains `fragment`
    pub fn contains(&self, fragment: &str) -> bool {
        self.classes.iter().any(|class| class.contains(fragment))
    }

    fn contains_any(&self, fragments: &[&str]) -> bool {
        fragments.iter().any(|fragment| self.contains(fragment))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

/// Classifies a page from its URL and template markers
///
/// # Cascade
///
/// Rules are evaluated in order and the first match wins, so listing types
/// outrank archives and the generic `page` marker:
///
/// 1. Listing path or single-listing marker → `Property`
/// 2. Blog/news/article path or single-post marker → `Blog`
/// 3. Category/tag path or archive marker → `Archive`
/// 4. Agent path → `Agent`
/// 5. Root path → `Homepage`
/// 6. Static keyword table → `About`, `Contact`, `Privacy`, `Terms`,
///    `Service`, `Rental`, `Location`, `Faq`
/// 7. Generic page marker → `Page`
/// 8. Otherwise → `Unknown`
///
/// Path matching is case-insensitive substring matching. A URL that does not
/// parse is treated as having an empty path.
///
/// # Examples
///
/// ```
/// use migration_mapper::mapping::{classify, StyleMarkers};
/// use migration_mapper::PageType;
///
/// let none = StyleMarkers::default();
/// assert_eq!(classify("https://example.com/property/sea-view-villa/", &none), PageType::Property);
/// assert_eq!(classify("https://example.com/", &none), PageType::Homepage);
/// assert_eq!(classify("https://example.com/over-ons", &none), PageType::About);
/// ```
pub fn classify(url: &str, markers: &StyleMarkers) -> PageType {
    let path = Url::parse(url)
        .map(|url| url.path().to_string())
        .unwrap_or_default();
    classify_path(&path, markers)
}

/// Classifies a page from an already-extracted path
pub fn classify_path(path: &str, markers: &StyleMarkers) -> PageType {
    let path = path.to_lowercase();
    let path_has = |fragments: &[&str]| fragments.iter().any(|f| path.contains(f));

    if path_has(PROPERTY_PATHS) || markers.contains_any(PROPERTY_MARKERS) {
        return PageType::Property;
    }

    if path_has(BLOG_PATHS) || markers.contains_any(BLOG_MARKERS) {
        return PageType::Blog;
    }

    if path_has(ARCHIVE_PATHS) || markers.contains_any(ARCHIVE_MARKERS) {
        return PageType::Archive;
    }

    if path_has(AGENT_PATHS) {
        return PageType::Agent;
    }

    if path.is_empty() || path == "/" {
        return PageType::Homepage;
    }

    for (page_type, keywords) in STATIC_RULES {
        if path_has(keywords) {
            return *page_type;
        }
    }

    if markers.contains_any(PAGE_MARKERS) {
        return PageType::Page;
    }

    PageType::Unknown
}
