//! Outbound link discovery
//!
//! Pulls hyperlink targets from a snapshot, strips fragments so the same
//! page behind different anchors dedups to one frontier entry, and feeds
//! everything to the frontier. Scope and cap enforcement live in the
//! frontier itself, so links are enqueued unconditionally.

use crate::crawler::frontier::Frontier;
use crate::crawler::snapshot::PageSnapshot;
use url::Url;

/// Discovers links on a page and feeds them to the frontier
///
/// Returns the number of links handed over, counting duplicates and
/// out-of-scope targets the frontier will drop.
pub fn discover_links<S: PageSnapshot>(snapshot: &S, frontier: &mut Frontier) -> usize {
    let mut count = 0;
    for link in snapshot.links() {
        frontier.enqueue(&clean_link(link));
        count += 1;
    }
    count
}

/// Normalizes a discovered link to its dedup identity
fn clean_link(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
