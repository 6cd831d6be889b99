//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests that load one page to completion
//! - Error classification into recoverable per-page failures
//!
//! A fully received response body is the "document is stable" signal for
//! the downstream snapshot; the configured timeout bounds the wait.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client shared by all workers
///
/// # Arguments
///
/// * `user_agent` - The user agent identification configuration
/// * `crawler` - Crawler behavior configuration (timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let agent = format!(
        "{}/{} (+{})",
        user_agent.crawler_name, user_agent.crawler_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(agent)
        .timeout(Duration::from_millis(crawler.fetch_timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one URL and returns its HTML body
///
/// # Failure classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `FetchError::Timeout` |
/// | Connection / transport failure | `FetchError::Http` |
/// | Non-2xx response | `FetchError::Status` |
/// | Content-Type is not HTML | `FetchError::NotHtml` |
///
/// All of these are recoverable: the orchestrator records the page as
/// failed and moves on.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // A missing Content-Type header is tolerated; an explicit non-HTML
    // type is not worth parsing.
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return Err(FetchError::NotHtml {
            url: url.to_string(),
            content_type,
        });
    }

    response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, e))
}

fn classify_transport_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_build_http_client() {
        let config = Config::default();
        let client = build_http_client(&config.user_agent, &config.crawler);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let config = Config::default();
        let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
        let url = Url::parse(&format!("{}/", server.uri())).unwrap();

        let body = fetch_page(&client, &url).await.unwrap();
        assert!(body.contains("hi"));
    }

    #[tokio::test]
    async fn test_fetch_page_status_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = Config::default();
        let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();

        match fetch_page(&client, &url).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_not_html() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let config = Config::default();
        let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
        let url = Url::parse(&format!("{}/data.json", server.uri())).unwrap();

        assert!(matches!(
            fetch_page(&client, &url).await,
            Err(FetchError::NotHtml { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_timeout() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.crawler.fetch_timeout_ms = 200;
        let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();

        assert!(matches!(
            fetch_page(&client, &url).await,
            Err(FetchError::Timeout { .. })
        ));
    }
}
