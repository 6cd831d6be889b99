//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up a small site and exercise the full
//! crawl cycle end-to-end: frontier dedup, page cap, per-page failure
//! isolation, and the empty-result condition.

use sitescribe::config::Config;
use sitescribe::crawler::Orchestrator;
use sitescribe::ScribeError;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test configuration tuned for mock servers: small timeout, few workers
fn test_config(max_pages: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.max_concurrent_workers = 3;
    config.crawler.fetch_timeout_ms = 500;
    config
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts the canonical 3-page site: A links to B and C, which link back
/// to A.
async fn mount_triangle_site(server: &MockServer) {
    let base = server.uri();
    mount_html(
        server,
        "/",
        format!(
            r#"<html><head><title>A</title></head><body>
            <a href="{base}/b">B</a>
            <a href="{base}/c">C</a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        server,
        "/b",
        format!(
            r#"<html><head><title>B</title></head><body><a href="{base}/">A</a></body></html>"#
        ),
    )
    .await;
    mount_html(
        server,
        "/c",
        format!(
            r#"<html><head><title>C</title></head><body><a href="{base}/">A</a></body></html>"#
        ),
    )
    .await;
}

#[tokio::test]
async fn test_triangle_site_yields_three_unique_records() {
    let server = MockServer::start().await;
    mount_triangle_site(&server).await;

    let orchestrator = Orchestrator::new(&test_config(10)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{}/", server.uri()), "test-triangle".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);

    let urls: HashSet<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls.len(), 3, "every URL must be unique");

    let titles: HashSet<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["A", "B", "C"]));
}

#[tokio::test]
async fn test_cap_of_one_returns_only_start_url() {
    let server = MockServer::start().await;
    mount_triangle_site(&server).await;

    let start = format!("{}/", server.uri());
    let orchestrator = Orchestrator::new(&test_config(1)).unwrap();
    let records = orchestrator
        .crawl_with_session(&start, "test-cap-one".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, start);
}

#[tokio::test]
async fn test_cap_bounds_larger_crawls() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A hub page linking to 10 leaves.
    let hub_links: String = (0..10)
        .map(|i| format!(r#"<a href="{base}/leaf{i}">leaf {i}</a>"#))
        .collect();
    mount_html(&server, "/", format!("<html><body>{hub_links}</body></html>")).await;
    for i in 0..10 {
        mount_html(
            &server,
            &format!("/leaf{i}"),
            format!("<html><head><title>Leaf {i}</title></head><body>leaf</body></html>"),
        )
        .await;
    }

    let orchestrator = Orchestrator::new(&test_config(4)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{base}/"), "test-cap".to_string())
        .await
        .unwrap();

    assert!(records.len() <= 4, "cap exceeded: {}", records.len());
}

#[tokio::test]
async fn test_timeout_page_is_skipped_not_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><head><title>Fast</title></head><body>
            <a href="{base}/slow">slow page</a>
            </body></html>"#
        ),
    )
    .await;
    // Always slower than the configured 500ms fetch timeout.
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>too late</body></html>", "text/html")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(&test_config(10)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{base}/"), "test-timeout".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Fast");
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_result_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(&test_config(10)).unwrap();
    let result = orchestrator
        .crawl_with_session(&format!("{}/", server.uri()), "test-empty".to_string())
        .await;

    assert!(matches!(result, Err(ScribeError::EmptyResult { .. })));
}

#[tokio::test]
async fn test_offsite_links_are_not_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="https://definitely-elsewhere.example.org/">offsite</a>
            <a href="{base}/local">local</a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/local",
        "<html><head><title>Local</title></head><body>here</body></html>".to_string(),
    )
    .await;

    let orchestrator = Orchestrator::new(&test_config(10)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{base}/"), "test-scope".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.url.starts_with(&base), "offsite URL crawled: {}", record.url);
    }
}

#[tokio::test]
async fn test_extracted_fields_survive_the_pipeline() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><head>
        <title>Field Test</title>
        <meta name="description" content="All the fields.">
        </head><body>
        <nav>menu noise</nav>
        <h1>Top</h1>
        <h2>Sub one</h2><h2>Sub two</h2>
        <p>Visible body text.</p>
        <script>ignored()</script>
        </body></html>"#
            .to_string(),
    )
    .await;

    let orchestrator = Orchestrator::new(&test_config(5)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{}/", server.uri()), "test-fields".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title, "Field Test");
    assert_eq!(record.meta_description, "All the fields.");
    assert_eq!(record.h1, vec!["Top"]);
    assert_eq!(record.h2, vec!["Sub one", "Sub two"]);
    assert_eq!(record.body_text, "Top Sub one Sub two Visible body text.");
}

#[tokio::test]
async fn test_fragment_variants_crawl_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/page#intro">intro</a>
            <a href="{base}/page#usage">usage</a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/page",
        "<html><head><title>Page</title></head><body>once</body></html>".to_string(),
    )
    .await;

    let orchestrator = Orchestrator::new(&test_config(10)).unwrap();
    let records = orchestrator
        .crawl_with_session(&format!("{base}/"), "test-fragments".to_string())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
}
