//! Same-site scoping helpers
//!
//! The crawl is bounded to the registrable domain of the start URL. The
//! registrable domain is the URL's host with any leading `www.` prefix
//! stripped; subdomains of it count as in scope, other hosts do not.

use crate::ScribeError;
use url::Url;

/// Parses a start URL, failing fast on malformed input
///
/// # Arguments
///
/// * `raw` - The start URL string supplied by the caller
///
/// # Returns
///
/// * `Ok(Url)` - An absolute HTTP(S) URL
/// * `Err(ScribeError::InvalidInput)` - The string is not a usable start URL
pub fn parse_start_url(raw: &str) -> Result<Url, ScribeError> {
    let url = Url::parse(raw).map_err(|e| ScribeError::InvalidInput {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ScribeError::InvalidInput {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(ScribeError::InvalidInput {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// Returns the registrable domain for a host: lowercased, `www.` stripped
///
/// # Examples
///
/// ```
/// use sitescribe::url_scope::registrable_domain;
///
/// assert_eq!(registrable_domain("www.example.com"), "example.com");
/// assert_eq!(registrable_domain("Docs.Example.COM"), "docs.example.com");
/// ```
pub fn registrable_domain(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Tests whether a host falls inside a crawl scope
///
/// A host is in scope when its registrable domain equals the scope or is a
/// dot-boundary subdomain of it. The boundary check keeps lookalike hosts
/// such as `evil-example.com` out of an `example.com` crawl.
pub fn in_scope(host: &str, scope: &str) -> bool {
    let domain = registrable_domain(host);
    domain == scope || domain.ends_with(&format!(".{}", scope))
}

/// Derives a short human-readable label for a site
///
/// The label is the first dot-separated segment of the registrable domain,
/// falling back to `"website"` when the URL does not parse or has no host.
pub fn site_label(site_url: &str) -> String {
    let label = Url::parse(site_url)
        .ok()
        .and_then(|u| u.host_str().map(registrable_domain))
        .and_then(|domain| domain.split('.').next().map(str::to_string))
        .filter(|s| !s.is_empty());

    label.unwrap_or_else(|| "website".to_string())
}
