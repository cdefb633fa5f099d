use crate::url::domain::site_authority;
use url::Url;

/// Normalizes a URL into the canonical form used as the frontier's deduplication key
///
/// # Normalization Steps
///
/// 1. Parse the URL (the parser lowercases the host and resolves dot segments)
/// 2. Drop the fragment and the query string
/// 3. Rebuild as `scheme://host[:port]/path`
/// 4. Remove trailing slashes from the path, except for the root `/`
///
/// This function never fails. Input that cannot be parsed as an absolute URL
/// with a host is handled on a best-effort basis: everything from the first
/// `#` or `?` is cut and trailing slashes are removed.
///
/// Normalization is idempotent: normalizing a canonical URL returns it unchanged.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// The canonical URL string
///
/// # Examples
///
/// ```
/// use migration_mapper::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://example.com/property/sea-view-villa/#gallery"),
///     "https://example.com/property/sea-view-villa"
/// );
/// assert_eq!(normalize_url("https://example.com"), "https://example.com/");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return normalize_unparsed(raw),
    };

    let authority = match site_authority(&url) {
        Some(authority) => authority,
        None => return normalize_unparsed(raw),
    };

    format!(
        "{}://{}{}",
        url.scheme(),
        authority,
        normalize_path(url.path())
    )
}

/// Removes trailing slashes, keeping a lone `/` for the root
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Best-effort normalization for strings the URL parser rejects
fn normalize_unparsed(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    without_query.trim_end_matches('/').to_string()
}
