//! Full-text bundle assembly
//!
//! Concatenates every formatted page into one artifact, fronted by a site
//! title and description. Pure function of its inputs.

use crate::output::markdown::MarkdownPage;
use crate::url_scope::site_label;

/// Assembles the concatenated full-text document for one crawl
///
/// Layout: an H1 title labeled after the site, a one-line blockquote
/// description, a horizontal rule, then each page's content separated by
/// horizontal rules. Page order is preserved as given.
///
/// # Arguments
///
/// * `pages` - Formatted pages in the order they should appear
/// * `site_url` - The crawl's start URL, used for the label and description
pub fn assemble_bundle(pages: &[MarkdownPage], site_url: &str) -> String {
    let label = site_label(site_url);

    let mut bundle = String::new();
    bundle.push_str(&format!("# {} full content\n\n", label));
    bundle.push_str(&format!(
        "> Complete text content extracted from {}\n\n",
        site_url
    ));
    bundle.push_str("---\n\n");

    let bodies: Vec<&str> = pages.iter().map(|p| p.content.trim_end()).collect();
    bundle.push_str(&bodies.join("\n\n---\n\n"));
    bundle.push('\n');

    bundle
}
