//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use migration_mapper::config::Config;
use migration_mapper::crawler::run_crawl;
use migration_mapper::output::export_all;
use migration_mapper::{CrawlMode, CrawlResult, PageRecord, PageType};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given site
fn create_test_config(base_url: &str, max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.max_pages = max_pages;
    config.crawler.delay_ms = 0; // No politeness delay against a mock server
    config.http.timeout_secs = 5;
    config
}

/// Mounts an HTML page at `at`
async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts an XML document at `at`
async fn mount_xml(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn html(title: &str, body_class: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{}</title></head><body class="{}">{}</body></html>"#,
        title, body_class, body
    )
}

fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|url| format!("<url><loc>{}</loc></url>", url))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn find_page<'a>(result: &'a CrawlResult, url: &str) -> &'a PageRecord {
    result
        .pages
        .iter()
        .find(|page| page.url == url)
        .unwrap_or_else(|| panic!("page {} not crawled", url))
}

/// Mounts a small site without a sitemap
async fn mount_link_site(server: &MockServer) {
    let base_url = server.uri();

    mount_page(
        server,
        "/",
        html(
            "Home",
            "home page-template-default",
            &format!(
                r#"<h1>Welcome</h1>
                <a href="/about-us/">About</a>
                <a href="{}/property/sea-view-villa/">Villa</a>
                <a href="/blog/top-5-beaches#comments">Beaches</a>
                <a href="/wp-admin/">Admin</a>
                <a href="/brochure.pdf">Brochure</a>
                <a href="https://other.example.org/page">Elsewhere</a>
                <a href="mailto:info@example.com">Mail</a>"#,
                base_url
            ),
        ),
    )
    .await;

    mount_page(
        server,
        "/about-us",
        html("About us", "page", r#"<h1>About us</h1><a href="/">Home</a>"#),
    )
    .await;

    mount_page(
        server,
        "/property/sea-view-villa",
        html(
            "Sea View Villa",
            "single single-property",
            r#"<h1>Sea View Villa</h1><a href="/about-us">About</a>"#,
        ),
    )
    .await;

    mount_page(
        server,
        "/blog/top-5-beaches",
        html(
            "Top 5 beaches",
            "single single-post",
            r#"<h1>Top 5 beaches</h1>"#,
        ),
    )
    .await;
}

#[tokio::test]
async fn test_link_discovery_crawl() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_link_site(&server).await;

    let result = run_crawl(create_test_config(&base_url, 50))
        .await
        .expect("Crawl should start");

    assert_eq!(result.mode, CrawlMode::LinkDiscovery);
    assert!(result.sitemap_urls.is_empty());
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert_eq!(result.pages.len(), 4);

    // Homepage first, then links in discovery order
    let urls: Vec<&str> = result.pages.iter().map(|page| page.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/about-us", base_url),
            format!("{}/property/sea-view-villa", base_url),
            format!("{}/blog/top-5-beaches", base_url),
        ]
    );

    let home = find_page(&result, &format!("{}/", base_url));
    assert_eq!(home.page_type, PageType::Homepage);
    assert_eq!(home.suggested_redirect, "/");
    assert_eq!(home.title, "Home");
    assert_eq!(home.h1, "Welcome");

    let villa = find_page(&result, &format!("{}/property/sea-view-villa", base_url));
    assert_eq!(villa.page_type, PageType::Property);
    assert_eq!(villa.suggested_redirect, "/listings/sea-view-villa");
    assert_eq!(villa.status_code, 200);

    let blog = find_page(&result, &format!("{}/blog/top-5-beaches", base_url));
    assert_eq!(blog.page_type, PageType::Blog);
    assert_eq!(blog.suggested_redirect, "/blogs/top-5-beaches");

    let about = find_page(&result, &format!("{}/about-us", base_url));
    assert_eq!(about.page_type, PageType::About);
    assert_eq!(about.suggested_redirect, "/about");
}

#[tokio::test]
async fn test_sitemap_index_seeding() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // /sitemap.xml is not mounted and returns 404
    mount_xml(
        &server,
        "/sitemap_index.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>{0}/post-sitemap.xml</loc></sitemap>
              <sitemap><loc>{0}/page-sitemap.xml</loc></sitemap>
            </sitemapindex>"#,
            base_url
        ),
    )
    .await;
    mount_xml(
        &server,
        "/post-sitemap.xml",
        urlset(&[format!("{}/blog/first-post/", base_url)]),
    )
    .await;
    mount_xml(
        &server,
        "/page-sitemap.xml",
        urlset(&[format!("{}/contact", base_url)]),
    )
    .await;

    mount_page(
        &server,
        "/blog/first-post",
        html("First post", "single-post", r#"<a href="/hidden">Hidden</a>"#),
    )
    .await;
    mount_page(
        &server,
        "/contact",
        html("Contact", "page", r#"<a href="/hidden">Hidden</a>"#),
    )
    .await;

    // Sitemap-seeded crawls never follow links
    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(&base_url, 50))
        .await
        .expect("Crawl should start");

    assert_eq!(result.mode, CrawlMode::Sitemap);
    assert_eq!(
        result.sitemap_urls,
        vec![
            format!("{}/blog/first-post/", base_url),
            format!("{}/contact", base_url),
        ]
    );
    assert_eq!(result.pages.len(), 2);

    let post = find_page(&result, &format!("{}/blog/first-post", base_url));
    assert_eq!(post.page_type, PageType::Blog);
    assert_eq!(post.suggested_redirect, "/blogs/first-post");

    let contact = find_page(&result, &format!("{}/contact", base_url));
    assert_eq!(contact.page_type, PageType::Contact);
    assert_eq!(contact.suggested_redirect, "/contact");
}

#[tokio::test]
async fn test_http_error_is_recorded() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/gone", base_url),
            format!("{}/about", base_url),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/about", html("About", "page", "<h1>About</h1>")).await;

    let result = run_crawl(create_test_config(&base_url, 50))
        .await
        .expect("Crawl should start");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].url, format!("{}/gone", base_url));
    assert_eq!(result.errors[0].status_code, 404);
    assert_eq!(result.errors[0].message, "HTTP 404");

    // The crawl continues past the failure
    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].url, format!("{}/about", base_url));
}

#[tokio::test]
async fn test_delay_follows_every_attempt() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/gone", base_url),
            format!("{}/about", base_url),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/about", html("About", "page", "<h1>About</h1>")).await;

    let mut config = create_test_config(&base_url, 50);
    config.crawler.delay_ms = 50;

    let start = Instant::now();
    let result = run_crawl(config).await.expect("Crawl should start");
    let elapsed = start.elapsed();

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.errors.len(), 1);
    // one delay after the failed fetch and one after the successful one
    assert!(
        elapsed >= Duration::from_millis(100),
        "crawl took only {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_page_budget() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let links: String = (1..=10)
        .map(|n| format!(r#"<a href="/page-{}">Page {}</a>"#, n, n))
        .collect();
    mount_page(&server, "/", html("Home", "home", &links)).await;

    for n in 1..=10 {
        mount_page(
            &server,
            &format!("/page-{}", n),
            html(&format!("Page {}", n), "page", ""),
        )
        .await;
    }

    let result = run_crawl(create_test_config(&base_url, 3))
        .await
        .expect("Crawl should start");

    assert_eq!(result.pages.len(), 3);
    assert!(result.errors.is_empty());
    assert_eq!(result.pages[0].url, format!("{}/", base_url));
    assert_eq!(result.pages[1].url, format!("{}/page-1", base_url));
    assert_eq!(result.pages[2].url, format!("{}/page-2", base_url));
}

#[tokio::test]
async fn test_redirected_page_is_recorded_under_its_own_url() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        html("Home", "home", r#"<a href="/old-news/">Old</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old-news"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/news/", base_url).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/news/",
        html("News", "blog", r#"<a href="latest">Latest</a>"#),
    )
    .await;
    mount_page(&server, "/news/latest", html("Latest", "single-post", "")).await;

    let result = run_crawl(create_test_config(&base_url, 10))
        .await
        .expect("Crawl should start");

    let old = find_page(&result, &format!("{}/old-news", base_url));
    assert_eq!(old.status_code, 200);
    assert_eq!(old.title, "News");

    // Relative links resolve against the final URL after redirects
    let latest = find_page(&result, &format!("{}/news/latest", base_url));
    assert_eq!(latest.page_type, PageType::Blog);
}

#[tokio::test]
async fn test_transport_failure() {
    let result = run_crawl(create_test_config("http://127.0.0.1:1", 5))
        .await
        .expect("Crawl should start");

    assert_eq!(result.mode, CrawlMode::LinkDiscovery);
    assert!(result.pages.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].url, "http://127.0.0.1:1/");
    assert_eq!(result.errors[0].status_code, 0);
    assert!(!result.errors[0].message.is_empty());
}

#[tokio::test]
async fn test_invalid_base_url_does_not_start() {
    let result = run_crawl(create_test_config("not a url", 5)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_export_crawl_result() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_link_site(&server).await;

    let result = run_crawl(create_test_config(&base_url, 50))
        .await
        .expect("Crawl should start");

    let dir = TempDir::new().unwrap();
    let prefix = dir.path().join("output").join("redirect_mapping");
    let written = export_all(&result, prefix.to_str().unwrap()).expect("Export should succeed");
    assert_eq!(written.len(), 4);

    let csv = std::fs::read_to_string(dir.path().join("output/redirect_mapping.csv")).unwrap();
    assert!(csv.starts_with("Old URL,Page Type,Title,H1,Suggested Redirect,Status,Notes"));
    assert!(csv.contains(&format!(
        "{}/property/sea-view-villa,property,Sea View Villa,Sea View Villa,/listings/sea-view-villa,200,",
        base_url
    )));

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("output/redirect_mapping.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["total_pages"], 4);
    assert_eq!(json["page_types"]["blog"], 1);

    let vercel: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("output/redirect_mapping_vercel_redirects.json"))
            .unwrap(),
    )
    .unwrap();
    let sources: Vec<&str> = vercel["redirects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["source"].as_str().unwrap())
        .collect();
    assert_eq!(
        sources,
        vec!["/about-us", "/property/sea-view-villa", "/blog/top-5-beaches"]
    );

    let nextjs = std::fs::read_to_string(
        dir.path().join("output/redirect_mapping_nextjs_redirects.ts"),
    )
    .unwrap();
    assert!(nextjs.contains(
        "{ source: '/blog/top-5-beaches', destination: '/blogs/top-5-beaches', permanent: true },"
    ));
}
