//! Integration tests for the scanner
//!
//! These tests drive full scans against a scripted browser. The sitemap and
//! robots.txt probes hit a wiremock server, whose address doubles as the
//! scanned site's origin.

mod common;

use common::{FakeBrowser, Response};
use seo_scan::result::LinkStatus;
use seo_scan::scanner::MAX_LINK_CHECKS;
use seo_scan::{Config, ScanOutcome, ScanRequest, Scanner};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TITLE: &str = "Acme Widgets - Quality Tools for Makers";
const DESCRIPTION: &str = "Acme Widgets builds durable, well-tested tools for makers, \
hobbyists and professionals who care about quality, precision and a long service life.";

/// A page that earns every weighted point
fn perfect_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>{TITLE}</title>
  <meta name="description" content="{DESCRIPTION}">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="canonical" href="/">
</head>
<body>
  <h1>Acme Widgets</h1>
  <h2>Our tools</h2>
  <img src="/hammer.png" alt="Hammer">
  <img src="/saw.png" alt="Saw">
  <a href="/about">About</a>
  <a href="/contact">Contact</a>
  <a href="https://partner.example.org/">Partner</a>
</body>
</html>"#
    )
}

/// A page linking to `count` internal pages, `/page-0` to `/page-{count-1}`
fn page_with_links(count: usize) -> String {
    let links: String = (0..count)
        .map(|i| format!(r#"<a href="/page-{i}">Page {i}</a>"#))
        .collect();
    format!("<html><head><title>Links</title></head><body><h1>Links</h1>{links}</body></html>")
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.scanner.page_timeout_ms = 2_000;
    config.scanner.network_idle_ms = 50;
    config.scanner.link_check_timeout_ms = 1_000;
    config.scanner.probe_timeout_ms = 1_000;
    config
}

fn site_url(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

async fn mount_sitemap_and_robots(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/xml"))
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/plain"))
        .mount(server)
        .await;
}

async fn run_scan(browser: Arc<FakeBrowser>, url: &str) -> ScanOutcome {
    let scanner = Scanner::new(browser, &test_config()).unwrap();
    let request = ScanRequest::new(url).unwrap();
    scanner.scan(&request).await
}

#[tokio::test]
async fn test_perfect_page_scores_100() {
    let server = MockServer::start().await;
    mount_sitemap_and_robots(&server).await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::ok(perfect_page())));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(!outcome.is_degraded());
    let result = outcome.into_result();
    assert_eq!(result.url, url);
    assert_eq!(result.score, 100);
    assert!(result.errors.is_empty());
    assert_eq!(result.metadata.title.as_deref(), Some(TITLE));
    assert_eq!(result.metadata.description.as_deref(), Some(DESCRIPTION));
    assert_eq!(result.metadata.lang.as_deref(), Some("en"));
    assert_eq!(result.headings.h1, vec!["Acme Widgets".to_string()]);
    assert_eq!(result.images.total, 2);
    assert_eq!(result.images.without_alt, 0);
    assert_eq!(result.links.internal.len(), 2);
    assert_eq!(result.links.external, vec!["https://partner.example.org/".to_string()]);
    assert_eq!(result.links.total, 3);
    assert!(result.links.broken.is_empty());
    assert!(result.mobile_friendly);
    assert_eq!(result.sitemap, Some(format!("{}/sitemap.xml", server.uri())));
    assert_eq!(result.robots_txt, Some(format!("{}/robots.txt", server.uri())));

    // Main page plus both internal links; the external link is never loaded
    assert_eq!(browser.opened(), 3);
    assert_eq!(browser.closed(), 3);
    assert!(!browser
        .visited()
        .contains(&"https://partner.example.org/".to_string()));
}

#[tokio::test]
async fn test_performance_is_collected() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::ok(perfect_page())));
    let result = run_scan(browser, &url).await.into_result();

    let performance = result.performance.expect("performance present on success");
    assert!(performance.load_time >= 0.0 && performance.load_time < 2.0);
    assert_eq!(performance.dom_content_loaded, Some(0.25));
    assert_eq!(performance.first_contentful_paint, Some(0.8));
    assert_eq!(performance.cumulative_layout_shift, Some(0.05));
    assert_eq!(performance.largest_contentful_paint, None);
}

#[tokio::test]
async fn test_missing_sitemap_and_robots_lose_bonus() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::ok(perfect_page())));
    let result = run_scan(browser, &url).await.into_result();

    assert_eq!(result.score, 90);
    assert_eq!(result.sitemap, None);
    assert_eq!(result.robots_txt, None);
}

#[tokio::test]
async fn test_http_error_degrades_scan() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::status(404)));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(outcome.is_degraded());
    let result = outcome.into_result();
    assert_eq!(result.score, 0);
    assert_eq!(result.errors, vec![format!("HTTP 404 for {}", url)]);
    assert!(result.performance.is_none());
    assert!(result.links.internal.is_empty());
    assert_eq!(result.metadata.title, None);
    assert_eq!(browser.opened(), 1);
    assert_eq!(browser.closed(), 1);
}

#[tokio::test]
async fn test_timeout_degrades_scan() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::Timeout));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(outcome.is_degraded());
    let result = outcome.result();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0],
        format!("Timeout loading {} after 2000ms", url)
    );
    assert_eq!(browser.closed(), browser.opened());
}

#[tokio::test]
async fn test_empty_content_degrades_scan() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::ok("  \n  ")));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(outcome.is_degraded());
    assert_eq!(
        outcome.result().errors,
        vec![format!("Failed to fetch page content for {}", url)]
    );
    assert_eq!(browser.closed(), browser.opened());
}

#[tokio::test]
async fn test_navigation_failure_degrades_scan() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().route(url.as_str(), Response::NavigationError));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(outcome.is_degraded());
    assert!(outcome.result().errors[0].contains("ERR_NAME_NOT_RESOLVED"));
    assert_eq!(browser.opened(), 1);
    assert_eq!(browser.closed(), 1);
}

#[tokio::test]
async fn test_browser_unavailable_degrades_scan() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(FakeBrowser::new().with_page_limit(0));
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.result().score, 0);
    assert_eq!(browser.opened(), 0);
}

#[tokio::test]
async fn test_only_first_links_are_checked() {
    let server = MockServer::start().await;
    let url = site_url(&server);
    let origin = server.uri();

    // The last two links are broken but fall outside the sample
    let browser = Arc::new(
        FakeBrowser::new()
            .route(url.as_str(), Response::ok(page_with_links(12)))
            .route(format!("{origin}/page-3"), Response::status(404))
            .route(format!("{origin}/page-10"), Response::status(500))
            .route(format!("{origin}/page-11"), Response::status(404)),
    );
    let result = run_scan(Arc::clone(&browser), &url).await.into_result();

    assert_eq!(result.links.internal.len(), 12);
    assert_eq!(result.links.broken.len(), 1);
    assert_eq!(result.links.broken[0].url, format!("{origin}/page-3"));
    assert_eq!(result.links.broken[0].status, LinkStatus::Broken);

    let visited = browser.visited();
    assert_eq!(visited.len(), 1 + MAX_LINK_CHECKS);
    assert!(!visited.contains(&format!("{origin}/page-10")));
    assert!(!visited.contains(&format!("{origin}/page-11")));
    assert_eq!(browser.closed(), browser.opened());
}

#[tokio::test]
async fn test_link_checks_are_bounded() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    let browser = Arc::new(
        FakeBrowser::new()
            .with_load_delay(Duration::from_millis(30))
            .route(url.as_str(), Response::ok(page_with_links(25))),
    );
    run_scan(Arc::clone(&browser), &url).await;

    assert!(browser.peak_open() <= MAX_LINK_CHECKS);
    assert!(browser.peak_open() > 1);
    assert_eq!(browser.opened(), 1 + MAX_LINK_CHECKS);
    assert_eq!(browser.closed(), browser.opened());
}

#[tokio::test]
async fn test_failed_link_loads_are_broken() {
    let server = MockServer::start().await;
    let url = site_url(&server);
    let origin = server.uri();

    let browser = Arc::new(
        FakeBrowser::new()
            .route(url.as_str(), Response::ok(page_with_links(3)))
            .route(format!("{origin}/page-0"), Response::Timeout)
            .route(format!("{origin}/page-1"), Response::NavigationError),
    );
    let result = run_scan(Arc::clone(&browser), &url).await.into_result();

    let broken: Vec<(&str, LinkStatus)> = result
        .links
        .broken
        .iter()
        .map(|b| (b.url.as_str(), b.status))
        .collect();
    let page_0 = format!("{origin}/page-0");
    let page_1 = format!("{origin}/page-1");
    assert_eq!(
        broken,
        vec![
            (page_0.as_str(), LinkStatus::Broken),
            (page_1.as_str(), LinkStatus::Broken)
        ]
    );
    assert_eq!(browser.closed(), browser.opened());
}

#[tokio::test]
async fn test_unopenable_link_pages_are_errors() {
    let server = MockServer::start().await;
    let url = site_url(&server);

    // Only the main page can be opened
    let browser = Arc::new(
        FakeBrowser::new()
            .with_page_limit(1)
            .route(url.as_str(), Response::ok(page_with_links(2))),
    );
    let outcome = run_scan(Arc::clone(&browser), &url).await;

    assert!(!outcome.is_degraded());
    let result = outcome.into_result();
    assert_eq!(result.links.broken.len(), 2);
    assert!(result
        .links
        .broken
        .iter()
        .all(|b| b.status == LinkStatus::Error));
    assert_eq!(browser.opened(), 1);
    assert_eq!(browser.closed(), 1);
}

#[tokio::test]
async fn test_scan_url_rejects_bad_scheme() {
    let browser = Arc::new(FakeBrowser::new());
    let scanner = Scanner::new(browser.clone(), &test_config()).unwrap();

    let outcome = scanner.scan_url("ftp://example.com/").await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.result().score, 0);
    assert_eq!(outcome.result().errors.len(), 1);
    assert_eq!(browser.opened(), 0);
}

#[tokio::test]
async fn test_scan_url_normalizes_bare_host() {
    let server = MockServer::start().await;
    let bare = server.uri().trim_start_matches("http://").to_string();
    let browser = Arc::new(FakeBrowser::new());
    let scanner = Scanner::new(browser.clone(), &test_config()).unwrap();

    let outcome = scanner.scan_url(&bare).await;

    // A bare host is assumed to be https
    assert_eq!(browser.visited()[0], format!("https://{}/", bare));
    assert!(!outcome.is_degraded());
}
