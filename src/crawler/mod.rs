//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic:
//! - The frontier queue (dedup, domain scope, page cap)
//! - HTTP fetching with per-page error classification
//! - Snapshot-based field extraction and link discovery
//! - Worker-pool orchestration

mod extractor;
mod fetcher;
mod frontier;
mod links;
mod orchestrator;
mod snapshot;

pub use extractor::{extract_record, PageRecord, BODY_TEXT_LIMIT};
pub use fetcher::{build_http_client, fetch_page};
pub use frontier::{Dequeue, Frontier, UrlState};
pub use links::discover_links;
pub use orchestrator::{CrawlSession, Orchestrator};
pub use snapshot::{HeadingLevel, HtmlSnapshot, PageSnapshot};

use crate::config::Config;
use crate::ScribeError;

/// Runs a complete crawl with default settings for one start URL
///
/// Convenience wrapper over [`Orchestrator`]: builds it from the given
/// configuration and returns the collected records in completion order.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - Absolute URL the crawl is scoped to
///
/// # Returns
///
/// * `Ok(Vec<PageRecord>)` - At least one page was collected
/// * `Err(ScribeError)` - Invalid input, or the crawl produced nothing
pub async fn crawl(config: &Config, start_url: &str) -> Result<Vec<PageRecord>, ScribeError> {
    let orchestrator = Orchestrator::new(config)?;
    orchestrator.crawl(start_url).await
}
