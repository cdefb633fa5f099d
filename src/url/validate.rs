use crate::url::domain::site_authority;
use url::Url;

/// File extensions that never point at an HTML page
const SKIP_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip", ".css", ".js", ".ico", ".svg", ".webp",
    ".woff", ".woff2", ".ttf", ".eot",
];

/// Administrative and system path prefixes (admin panel, login, includes,
/// uploads, feeds, XML-RPC and the JSON API)
const SKIP_PATH_PREFIXES: &[&str] = &[
    "/wp-admin",
    "/wp-login",
    "/wp-includes",
    "/wp-content/uploads",
    "/feed",
    "/xmlrpc.php",
    "/wp-json",
];

/// Query fragments that produce near-duplicate URLs for the same content
const SKIP_QUERY_FRAGMENTS: &[&str] = &["replytocom", "share=", "like_comment", "print="];

/// Checks whether a URL is in scope for crawling
///
/// A URL is rejected when:
/// - it cannot be parsed, or its `host[:port]` differs from `site_host`
/// - its path ends with a non-HTML file extension
/// - its path starts with an administrative or system prefix
/// - its query string contains a noise fragment (comment replies, share,
///   like and print links)
///
/// Path checks are case-insensitive. Noise fragments are matched as plain
/// substrings of the raw query, so `?reprint=1` is rejected as well.
///
/// # Arguments
///
/// * `url` - The absolute URL to check
/// * `site_host` - The site authority, as returned by [`site_authority`]
///
/// # Examples
///
/// ```
/// use migration_mapper::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/about", "example.com"));
/// assert!(!is_valid_url("https://other.com/about", "example.com"));
/// assert!(!is_valid_url("https://example.com/logo.png", "example.com"));
/// assert!(!is_valid_url("https://example.com/wp-admin/", "example.com"));
/// assert!(!is_valid_url("https://example.com/post?replytocom=5", "example.com"));
/// ```
pub fn is_valid_url(url: &str, site_host: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    match site_authority(&parsed) {
        Some(authority) if authority.eq_ignore_ascii_case(site_host) => {}
        _ => return false,
    }

    let path = parsed.path().to_lowercase();

    if SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    if SKIP_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return false;
    }

    if let Some(query) = parsed.query() {
        if SKIP_QUERY_FRAGMENTS
            .iter()
            .any(|fragment| query.contains(fragment))
        {
            return false;
        }
    }

    true
}
