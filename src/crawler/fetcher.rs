//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building an HTTP client that presents itself as a desktop browser
//! - GET requests for pages (text) and sitemaps (raw bytes)
//! - Redirect following and request timeouts
//! - Error classification

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client, StatusCode};

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The page was fetched with HTTP 200
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No response was received (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with browser-like default headers
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use migration_mapper::config::HttpConfig;
/// use migration_mapper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, ACCEPT, &config.accept);
    insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

fn insert_header(headers: &mut HeaderMap, name: reqwest::header::HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::warn!("Ignoring invalid {} header value: {:?}", name, value),
    }
}

/// Fetches pages and sitemap documents for a single crawl
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with a client built from the given configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches a page as text
    ///
    /// Only an HTTP 200 counts as success; redirects are followed first, so
    /// the status is that of the final response.
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 200 | `Success` |
    /// | Any other status | `HttpError` |
    /// | Timeout, connection failure, too many redirects | `NetworkError` |
    /// | Body could not be read | `NetworkError` |
    pub async fn fetch_url(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchResult::NetworkError {
                    error: describe_error(&e),
                }
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        let final_url = response.url().to_string();

        match response.text().await {
            Ok(body) => FetchResult::Success {
                final_url,
                status_code: status.as_u16(),
                body,
            },
            Err(e) => FetchResult::NetworkError {
                error: describe_error(&e),
            },
        }
    }

    /// Fetches a document as raw bytes
    ///
    /// Returns `None` for anything but an HTTP 200 with a readable body.
    /// Callers treat that as "no document here", so failures are only logged.
    pub async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Failed to fetch {}: {}", url, describe_error(&e));
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!("{} returned HTTP {}", url, response.status().as_u16());
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, describe_error(&e));
                None
            }
        }
    }
}

/// Produces a short description of a transport error
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_redirect() {
        format!("Redirect error: {}", error)
    } else {
        error.to_string()
    }
}
