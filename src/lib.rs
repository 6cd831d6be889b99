//! Sitescribe: turns a website into a bounded markdown corpus
//!
//! This crate implements a domain-scoped crawler that collects a capped,
//! deduplicated sample of a site's pages, extracts denoised structured
//! records from them, and renders the records into deterministic markdown
//! documents plus a single concatenated bundle.

pub mod config;
pub mod crawler;
pub mod output;
pub mod services;
pub mod url_scope;

use thiserror::Error;

/// Main error type for Sitescribe operations
///
/// Only whole-crawl conditions live here. Per-page failures are modeled as
/// [`FetchError`] and absorbed inside the orchestrator.
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid start URL '{url}': {reason}")]
    InvalidInput { url: String, reason: String },

    #[error("No pages found for {url}")]
    EmptyResult { url: String },

    #[error("Text synthesis failed: {0}")]
    Synthesis(#[from] services::SynthesisError),

    #[error("Archive packaging failed: {0}")]
    Packaging(#[from] services::PackagingError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Recoverable per-page fetch failure
///
/// Every variant carries the URL it occurred on. The orchestrator logs the
/// failure, marks the frontier entry failed, and continues the crawl; a
/// single page's failure is never fatal to the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML for {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },
}

impl FetchError {
    /// The URL this failure occurred on
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Http { url, .. }
            | Self::Status { url, .. }
            | Self::NotHtml { url, .. } => url,
        }
    }
}

/// Result type alias for Sitescribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Orchestrator, PageRecord};
pub use output::{assemble_bundle, format_page, MarkdownPage};
pub use url_scope::{parse_start_url, registrable_domain, site_label};
