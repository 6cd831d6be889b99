use serde::Deserialize;

/// Main configuration structure for Sitescribe
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Maximum number of pages collected per crawl
    #[serde(default = "default_max_pages", rename = "max-pages")]
    pub max_pages: u32,

    /// Size of the concurrent worker pool
    #[serde(default = "default_workers", rename = "max-concurrent-workers")]
    pub max_concurrent_workers: u32,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_fetch_timeout", rename = "fetch-timeout-ms")]
    pub fetch_timeout_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_crawler_name", rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(default = "default_crawler_version", rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(default = "default_contact_url", rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory where per-page markdown documents are written
    #[serde(default = "default_pages_dir", rename = "pages-dir")]
    pub pages_dir: String,

    /// Path of the concatenated full-text bundle
    #[serde(default = "default_bundle_path", rename = "bundle-path")]
    pub bundle_path: String,
}

fn default_max_pages() -> u32 {
    100
}

fn default_workers() -> u32 {
    4
}

fn default_fetch_timeout() -> u64 {
    30_000
}

fn default_crawler_name() -> String {
    "sitescribe".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/sitescribe/sitescribe".to_string()
}

fn default_pages_dir() -> String {
    "./pages".to_string()
}

fn default_bundle_path() -> String {
    "./full-content.md".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_concurrent_workers: default_workers(),
            fetch_timeout_ms: default_fetch_timeout(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            bundle_path: default_bundle_path(),
        }
    }
}
