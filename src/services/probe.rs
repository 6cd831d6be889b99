//! Existing-document probe
//!
//! Sites that already publish a curated index document expose it at a
//! conventional well-known path. The probe checks for it; absence is a
//! normal answer, never an error.

use reqwest::Client;
use url::Url;

/// Well-known path where a site's curated index document lives
const WELL_KNOWN_PATH: &str = "/llms.txt";

/// Fetches a site's existing curated document, if it has one
///
/// Any failure to produce a 2xx body, including network errors and
/// unparseable join results, is reported as `None` ("absent").
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `site_url` - Any URL on the site; only its origin is used
pub async fn probe_existing_document(client: &Client, site_url: &Url) -> Option<String> {
    let probe_url = site_url.join(WELL_KNOWN_PATH).ok()?;

    let response = match client.get(probe_url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Existing-document probe failed for {}: {}", probe_url, e);
            return None;
        }
    };

    if !response.status().is_success() {
        return None;
    }

    response.text().await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_probe_finds_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/llms.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# existing doc"))
            .mount(&server)
            .await;

        let client = Client::new();
        let site = Url::parse(&format!("{}/some/page", server.uri())).unwrap();

        let doc = probe_existing_document(&client, &site).await;
        assert_eq!(doc.as_deref(), Some("# existing doc"));
    }

    #[tokio::test]
    async fn test_probe_absent_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/llms.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let site = Url::parse(&server.uri()).unwrap();

        assert!(probe_existing_document(&client, &site).await.is_none());
    }

    #[tokio::test]
    async fn test_probe_absent_on_network_error() {
        // Nothing is listening on this port.
        let client = Client::new();
        let site = Url::parse("http://127.0.0.1:1/").unwrap();

        assert!(probe_existing_document(&client, &site).await.is_none());
    }
}
