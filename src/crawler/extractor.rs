//! Structured field extraction from page snapshots
//!
//! Extraction is total per field: a missing title or description defaults
//! to an empty string rather than failing the page. Only the fetch itself
//! can abort a page.

use crate::crawler::snapshot::{HeadingLevel, PageSnapshot};
use serde::Serialize;
use url::Url;

/// Maximum stored body text length, in characters, before the ellipsis
/// marker is appended
pub const BODY_TEXT_LIMIT: usize = 2500;

const ELLIPSIS: &str = "...";

/// Structured extraction result for one URL
///
/// Immutable once produced; the orchestrator owns the collected set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub meta_description: String,

    /// H1 heading texts in document order
    pub h1: Vec<String>,

    /// H2 heading texts in document order
    pub h2: Vec<String>,

    /// Denoised body text, at most `BODY_TEXT_LIMIT` characters plus the
    /// ellipsis marker when the source exceeded the limit
    pub body_text: String,
}

/// Derives a [`PageRecord`] from a snapshot
///
/// # Arguments
///
/// * `snapshot` - The page snapshot to read
/// * `url` - The URL the snapshot was fetched from
pub fn extract_record<S: PageSnapshot>(snapshot: &S, url: &Url) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        title: snapshot.title().unwrap_or_default(),
        meta_description: snapshot.meta_description().unwrap_or_default(),
        h1: snapshot.headings(HeadingLevel::H1),
        h2: snapshot.headings(HeadingLevel::H2),
        body_text: truncate_body(snapshot.denoised_body_text()),
    }
}

/// Caps body text at `BODY_TEXT_LIMIT` characters, appending `"..."` when
/// the source was longer
///
/// The limit counts characters, not bytes, so multi-byte text is never
/// split inside a code point.
fn truncate_body(text: String) -> String {
    if text.chars().count() <= BODY_TEXT_LIMIT {
        return text;
    }

    let mut truncated: String = text.chars().take(BODY_TEXT_LIMIT).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Snapshot stub with directly settable fields
    #[derive(Default)]
    struct FakeSnapshot {
        title: Option<String>,
        meta_description: Option<String>,
        h1: Vec<String>,
        h2: Vec<String>,
        body: String,
    }

    impl PageSnapshot for FakeSnapshot {
        fn title(&self) -> Option<String> {
            self.title.clone()
        }

        fn meta_description(&self) -> Option<String> {
            self.meta_description.clone()
        }

        fn headings(&self, level: HeadingLevel) -> Vec<String> {
            match level {
                HeadingLevel::H1 => self.h1.clone(),
                HeadingLevel::H2 => self.h2.clone(),
            }
        }

        fn denoised_body_text(&self) -> String {
            self.body.clone()
        }

        fn links(&self) -> Vec<Url> {
            Vec::new()
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extracts_all_fields() {
        let snap = FakeSnapshot {
            title: Some("Title".to_string()),
            meta_description: Some("Desc".to_string()),
            h1: vec!["Main".to_string()],
            h2: vec!["Sub A".to_string(), "Sub B".to_string()],
            body: "Body text.".to_string(),
        };

        let record = extract_record(&snap, &url());
        assert_eq!(record.url, "https://example.com/page");
        assert_eq!(record.title, "Title");
        assert_eq!(record.meta_description, "Desc");
        assert_eq!(record.h1, vec!["Main"]);
        assert_eq!(record.h2, vec!["Sub A", "Sub B"]);
        assert_eq!(record.body_text, "Body text.");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = extract_record(&FakeSnapshot::default(), &url());
        assert_eq!(record.title, "");
        assert_eq!(record.meta_description, "");
        assert!(record.h1.is_empty());
        assert!(record.h2.is_empty());
        assert_eq!(record.body_text, "");
    }

    #[test]
    fn test_body_under_limit_kept_exactly() {
        let snap = FakeSnapshot {
            body: "x".repeat(BODY_TEXT_LIMIT),
            ..Default::default()
        };
        let record = extract_record(&snap, &url());
        assert_eq!(record.body_text.chars().count(), BODY_TEXT_LIMIT);
        assert!(!record.body_text.ends_with("..."));
    }

    #[test]
    fn test_body_over_limit_truncated_with_marker() {
        let snap = FakeSnapshot {
            body: "x".repeat(5000),
            ..Default::default()
        };
        let record = extract_record(&snap, &url());
        assert_eq!(record.body_text.chars().count(), 2503);
        assert!(record.body_text.ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let snap = FakeSnapshot {
            body: "é".repeat(3000),
            ..Default::default()
        };
        let record = extract_record(&snap, &url());
        assert_eq!(record.body_text.chars().count(), 2503);
    }

    #[test]
    fn test_empty_headings_preserved() {
        let snap = FakeSnapshot {
            h1: vec!["".to_string(), "Real".to_string()],
            ..Default::default()
        };
        let record = extract_record(&snap, &url());
        assert_eq!(record.h1, vec!["", "Real"]);
    }
}
