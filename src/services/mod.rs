//! Collaborator contracts consumed around the crawl core
//!
//! The crawl itself produces records and markdown; turning those into a
//! curated summary document, packaging them into an archive, and durably
//! recording activity are external concerns. This module defines their
//! contracts, plus the small pieces that are cheap enough to ship here:
//! a tracing-backed activity sink and the existing-document probe.

mod probe;

pub use probe::probe_existing_document;

use crate::crawler::PageRecord;
use crate::output::MarkdownPage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Payload cap for activity-log rows, in characters
const PAYLOAD_CAP: usize = 500;

/// A curated document produced by the text-synthesis service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDocument {
    pub content: String,
    pub suggested_filename: String,
}

/// Text-synthesis service failures
///
/// A missing credential is surfaced to the caller verbatim and never
/// retried internally.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("{0}")]
    Service(String),
}

/// Archive-packaging failures
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PackagingError(pub String);

/// Turns extracted records, or an already-published document, into a
/// curated summary
///
/// Implementations may take seconds to tens of seconds per call.
pub trait TextSynthesizer {
    /// Synthesizes a summary document from crawled records
    fn synthesize_from_records(
        &self,
        records: &[PageRecord],
        site_url: &Url,
    ) -> impl std::future::Future<Output = Result<SynthesizedDocument, SynthesisError>> + Send;

    /// Refreshes a summary from an existing published document
    fn synthesize_from_existing(
        &self,
        existing_text: &str,
        site_url: &Url,
    ) -> impl std::future::Future<Output = Result<SynthesizedDocument, SynthesisError>> + Send;
}

/// Packages a crawl's documents into a downloadable artifact
pub trait ArchivePackager {
    /// Packs the per-page documents and the two whole-document texts into
    /// an archive, returning its storage name
    fn package(
        &self,
        pages: &[MarkdownPage],
        bundle_text: &str,
        summary_text: &str,
        label: &str,
    ) -> Result<String, PackagingError>;
}

/// One append-only activity row
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub status: String,
    pub payload: String,
}

impl ActivityEntry {
    /// Builds a row, capping the payload so oversized page titles or error
    /// chains cannot bloat the log
    pub fn new(url: &str, status: &str, payload: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            url: url.to_string(),
            status: status.to_string(),
            payload: cap_payload(payload),
        }
    }
}

fn cap_payload(payload: &str) -> String {
    if payload.chars().count() <= PAYLOAD_CAP {
        payload.to_string()
    } else {
        payload.chars().take(PAYLOAD_CAP).collect()
    }
}

/// Append-only activity sink; fire-and-forget
///
/// Implementations must never let a sink failure propagate to the caller.
pub trait ActivityLogSink {
    fn append(&self, entry: ActivityEntry);
}

/// Activity sink that records rows through the tracing pipeline
pub struct TracingLogSink;

impl ActivityLogSink for TracingLogSink {
    fn append(&self, entry: ActivityEntry) {
        tracing::info!(
            url = %entry.url,
            status = %entry.status,
            payload = %entry.payload,
            "activity"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_entry_keeps_short_payload() {
        let entry = ActivityEntry::new("https://example.com/", "done", "Title");
        assert_eq!(entry.payload, "Title");
    }

    #[test]
    fn test_activity_entry_caps_payload() {
        let oversized = "p".repeat(2000);
        let entry = ActivityEntry::new("https://example.com/", "failed", &oversized);
        assert_eq!(entry.payload.chars().count(), 500);
    }

    #[test]
    fn test_tracing_sink_accepts_rows() {
        let sink = TracingLogSink;
        sink.append(ActivityEntry::new("https://example.com/", "done", ""));
    }
}
