//! Per-page markdown document generation
//!
//! This module renders one [`PageRecord`] into one self-contained markdown
//! document with a filesystem-safe filename. The transform is pure and
//! deterministic: formatting the same record twice yields byte-identical
//! output.

use crate::crawler::PageRecord;
use serde::Serialize;

/// Character count at which a running block is flushed as a paragraph
/// once a sentence boundary is seen
const PARAGRAPH_TARGET: usize = 300;

/// Maximum filename stem length before the `.md` extension is applied
const FILENAME_STEM_LIMIT: usize = 200;

/// The formatted-document projection of a page record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownPage {
    pub url: String,
    pub filename: String,
    pub content: String,
}

/// Formats a page record as a markdown document
///
/// # Content layout, in order
///
/// 1. H1 heading with the page title (URL when the title is empty)
/// 2. A "Source URL" line with the URL linked to itself
/// 3. Blockquote of the meta description, when present
/// 4. "Main Headings" bullet list, when any h1 entries exist
/// 5. "Sub Topics" bullet list, when any h2 entries exist
/// 6. "Content" section with the body run through paragraph segmentation
pub fn format_page(record: &PageRecord) -> MarkdownPage {
    let mut md = String::new();

    let heading = if record.title.is_empty() {
        &record.url
    } else {
        &record.title
    };
    md.push_str(&format!("# {}\n\n", heading));

    md.push_str(&format!("Source URL: [{}]({})\n\n", record.url, record.url));

    if !record.meta_description.is_empty() {
        md.push_str(&format!("> {}\n\n", record.meta_description));
    }

    if !record.h1.is_empty() {
        md.push_str("## Main Headings\n\n");
        for entry in &record.h1 {
            md.push_str(&format!("- {}\n", entry));
        }
        md.push('\n');
    }

    if !record.h2.is_empty() {
        md.push_str("## Sub Topics\n\n");
        for entry in &record.h2 {
            md.push_str(&format!("- {}\n", entry));
        }
        md.push('\n');
    }

    md.push_str("## Content\n\n");
    let paragraphs = segment_paragraphs(&record.body_text);
    if paragraphs.is_empty() {
        md.push_str(&record.body_text);
        md.push('\n');
    } else {
        md.push_str(&paragraphs.join("\n\n"));
        md.push('\n');
    }

    MarkdownPage {
        url: record.url.clone(),
        filename: derive_filename(&record.url),
        content: md,
    }
}

/// Derives a filesystem-safe filename from a URL
///
/// Strips the scheme, maps every character outside `[A-Za-z0-9.\-_]` to
/// `_`, collapses `_` runs, truncates to 200 characters, and appends `.md`
/// unless already present.
///
/// # Examples
///
/// ```
/// use sitescribe::output::derive_filename;
///
/// assert_eq!(
///     derive_filename("https://example.com/docs/intro"),
///     "example.com_docs_intro.md"
/// );
/// ```
pub fn derive_filename(url: &str) -> String {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    let mut stem = String::new();
    let mut last_was_underscore = false;
    for c in without_scheme.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            stem.push(c);
            last_was_underscore = c == '_';
        } else if !last_was_underscore {
            stem.push('_');
            last_was_underscore = true;
        }
    }

    let mut name: String = stem.chars().take(FILENAME_STEM_LIMIT).collect();
    if !name.ends_with(".md") {
        name.push_str(".md");
    }
    name
}

/// Splits body text into paragraphs at heuristic sentence boundaries
///
/// A boundary is a period immediately followed by an uppercase letter,
/// which is how denoised HTML text runs sentences together. The running
/// block is flushed once it exceeds the target length at a boundary; any
/// trailing non-whitespace text is flushed at the end. The rule knowingly
/// splits on abbreviations and versioned identifiers.
fn segment_paragraphs(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut paragraphs = Vec::new();
    let mut block = String::new();
    let mut block_len = 0usize;

    for i in 0..chars.len() {
        block.push(chars[i]);
        block_len += 1;

        let at_boundary =
            chars[i] == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_uppercase();
        if at_boundary && block_len > PARAGRAPH_TARGET {
            paragraphs.push(block.trim().to_string());
            block.clear();
            block_len = 0;
        }
    }

    if !block.trim().is_empty() {
        paragraphs.push(block.trim().to_string());
    }

    paragraphs
}
