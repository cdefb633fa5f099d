/// Page type definitions for classified pages
///
/// This module defines the closed set of semantic types a crawled page can be
/// assigned. The type drives which redirect rule applies to the page.
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The semantic type of a crawled page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    // ===== Structural =====
    /// The site root
    Homepage,

    // ===== Content with a slug on the new site =====
    /// A single property listing
    Property,

    /// A blog post, news item or article
    Blog,

    /// A location or area page
    Location,

    /// A service description
    Service,

    // ===== Collapsed onto a fixed destination =====
    /// A category or tag listing
    Archive,

    /// An agent profile
    Agent,

    // ===== Static pages =====
    About,
    Contact,
    Privacy,
    Terms,
    Rental,
    Faq,

    // ===== Fallbacks =====
    /// A generic page template with no recognizable purpose
    Page,

    /// Nothing matched
    #[default]
    Unknown,
}

impl PageType {
    /// Returns the lowercase string form used in exports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Property => "property",
            Self::Blog => "blog",
            Self::Location => "location",
            Self::Service => "service",
            Self::Archive => "archive",
            Self::Agent => "agent",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Privacy => "privacy",
            Self::Terms => "terms",
            Self::Rental => "rental",
            Self::Faq => "faq",
            Self::Page => "page",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true if the redirect destination is derived from the page's slug
    pub fn uses_slug(&self) -> bool {
        matches!(
            self,
            Self::Property | Self::Blog | Self::Location | Self::Service
        )
    }

    /// Returns true if the page could not be given a specific purpose
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Page | Self::Unknown)
    }

    /// Returns all page types
    pub fn all_types() -> Vec<Self> {
        vec![
            Self::Homepage,
            Self::Property,
            Self::Blog,
            Self::Location,
            Self::Service,
            Self::Archive,
            Self::Agent,
            Self::About,
            Self::Contact,
            Self::Privacy,
            Self::Terms,
            Self::Rental,
            Self::Faq,
            Self::Page,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_types()
            .into_iter()
            .find(|page_type| page_type.as_str() == s)
            .ok_or_else(|| format!("unknown page type '{}'", s))
    }
}
