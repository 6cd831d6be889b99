//! Page snapshot capability interface
//!
//! The extractor and link discoverer consume a narrow trait rather than a
//! DOM handle, so they can be unit-tested against fake snapshots with no
//! network or rendering dependency, and so the HTML backend stays
//! swappable behind one implementation.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Heading levels the extractor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    fn selector_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
        }
    }
}

/// Read-only view over one rendered page
///
/// All methods are total: a missing element yields an empty value, never an
/// error. Only a whole-page fetch failure aborts a page.
pub trait PageSnapshot {
    /// The document title, if any
    fn title(&self) -> Option<String>;

    /// Content of the first description meta tag, if any
    fn meta_description(&self) -> Option<String>;

    /// Trimmed heading texts of one level, in document order
    ///
    /// A heading element with no text contributes an empty string; callers
    /// that want them filtered do so themselves.
    fn headings(&self, level: HeadingLevel) -> Vec<String>;

    /// Body text with noise subtrees removed and whitespace collapsed
    fn denoised_body_text(&self) -> String;

    /// Absolute outbound hyperlink targets
    fn links(&self) -> Vec<Url>;
}

/// Subtrees whose text is navigation chrome or markup plumbing, not content
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "footer", "header", "svg",
];

/// [`PageSnapshot`] backed by a parsed scraper document
pub struct HtmlSnapshot {
    document: Html,
    base_url: Url,
}

impl HtmlSnapshot {
    /// Parses an HTML body fetched from `base_url`
    ///
    /// Parsing is lenient and never fails; malformed markup degrades to
    /// whatever the parser recovers.
    pub fn parse(html: &str, base_url: Url) -> Self {
        Self {
            document: Html::parse_document(html),
            base_url,
        }
    }

    fn body(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("body").ok()?;
        self.document.select(&selector).next()
    }
}

impl PageSnapshot for HtmlSnapshot {
    fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn meta_description(&self) -> Option<String> {
        let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
        self.document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(|content| content.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn headings(&self, level: HeadingLevel) -> Vec<String> {
        let selector = match Selector::parse(level.selector_str()) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        self.document
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn denoised_body_text(&self) -> String {
        let body = match self.body() {
            Some(b) => b,
            None => return String::new(),
        };

        let mut parts: Vec<&str> = Vec::new();
        for node in body.descendants() {
            if let Node::Text(text) = node.value() {
                if text.trim().is_empty() {
                    continue;
                }
                let in_noise = node.ancestors().any(|ancestor| {
                    matches!(ancestor.value(),
                        Node::Element(el) if NOISE_TAGS.contains(&el.name()))
                });
                if !in_noise {
                    parts.push(&**text);
                }
            }
        }

        // Joining then re-splitting collapses every whitespace run to a
        // single space and trims both ends.
        parts
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn links(&self) -> Vec<Url> {
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in self.document.select(&selector) {
                if element.value().attr("download").is_some() {
                    continue;
                }
                if let Some(href) = element.value().attr("href") {
                    if let Some(url) = resolve_link(href, &self.base_url) {
                        links.push(url);
                    }
                }
            }
        }

        links
    }
}

/// Resolves an href to an absolute URL, or None if it should be excluded
///
/// Excluded: `javascript:`, `mailto:`, `tel:`, `data:` schemes,
/// fragment-only anchors, unparseable hrefs, and non-HTTP(S) results.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
