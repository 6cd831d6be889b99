//! Crawl frontier: the dedup + scope + cap-aware URL queue
//!
//! One frontier instance exists per crawl session and is discarded with it,
//! so no dedup or visited state ever leaks between invocations. The frontier
//! is the single shared mutable resource among workers; callers serialize
//! access through a mutex and keep critical sections short.

use crate::url_scope::in_scope;
use std::collections::{HashMap, VecDeque};
use url::Url;

/// Lifecycle state of a URL known to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlState {
    /// Queued, waiting for a worker
    Pending,

    /// Handed to a worker, result not yet reported
    InFlight,

    /// Fetched and extracted successfully
    Done,

    /// Fetch failed; does not count toward the page cap
    Failed,
}

/// Outcome of a dequeue attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeue {
    /// A URL is ready; it has been marked in-flight
    Next(Url),

    /// Nothing pending right now, but in-flight work may enqueue more
    Wait,

    /// The crawl is over for this worker: cap reached, or no pending
    /// URLs and no in-flight work left to produce any
    Exhausted,
}

/// Dedup + domain-scope + cap-aware URL queue for one crawl session
///
/// A URL that has ever been seen, in any state, is never re-enqueued.
/// `dequeue` refuses to hand out work once `done + in_flight` reaches the
/// page cap, which lets in-flight fetches drain gracefully while admitting
/// no new ones.
pub struct Frontier {
    /// Registrable domain of the start URL; the crawl scope
    scope: String,

    /// Page cap for this session
    max_pages: usize,

    /// Every URL ever enqueued, with its current state
    states: HashMap<String, UrlState>,

    /// Pending URLs in discovery order
    pending: VecDeque<Url>,

    in_flight: usize,
    done: usize,
    failed: usize,
}

impl Frontier {
    /// Creates an empty frontier scoped to a registrable domain
    ///
    /// # Arguments
    ///
    /// * `scope` - Registrable domain of the start URL
    /// * `max_pages` - Maximum number of successful pages for the session
    pub fn new(scope: impl Into<String>, max_pages: usize) -> Self {
        Self {
            scope: scope.into(),
            max_pages,
            states: HashMap::new(),
            pending: VecDeque::new(),
            in_flight: 0,
            done: 0,
            failed: 0,
        }
    }

    /// Adds a URL to the queue
    ///
    /// No-op if the URL was already seen in any state, or if its host is
    /// outside the session's registrable domain. Callers may therefore feed
    /// discovered links unconditionally.
    pub fn enqueue(&mut self, url: &Url) {
        let host = match url.host_str() {
            Some(h) => h,
            None => return,
        };

        if !in_scope(host, &self.scope) {
            tracing::trace!("Skipping out-of-scope URL: {}", url);
            return;
        }

        let key = url.as_str().to_string();
        if self.states.contains_key(&key) {
            return;
        }

        self.states.insert(key, UrlState::Pending);
        self.pending.push_back(url.clone());
    }

    /// Takes the next pending URL, marking it in-flight
    ///
    /// Refuses once `done + in_flight` has reached the cap. When the queue
    /// is momentarily empty but other workers are still in flight, returns
    /// [`Dequeue::Wait`] so the caller can retry after their links land.
    pub fn dequeue(&mut self) -> Dequeue {
        if self.done + self.in_flight >= self.max_pages {
            return Dequeue::Exhausted;
        }

        match self.pending.pop_front() {
            Some(url) => {
                self.states
                    .insert(url.as_str().to_string(), UrlState::InFlight);
                self.in_flight += 1;
                Dequeue::Next(url)
            }
            None if self.in_flight > 0 => Dequeue::Wait,
            None => Dequeue::Exhausted,
        }
    }

    /// Records a successful fetch for an in-flight URL
    pub fn mark_done(&mut self, url: &Url) {
        if let Some(state) = self.states.get_mut(url.as_str()) {
            if *state == UrlState::InFlight {
                *state = UrlState::Done;
                self.in_flight -= 1;
                self.done += 1;
            }
        }
    }

    /// Records a failed fetch for an in-flight URL
    ///
    /// Failed pages free their cap slot so the crawl can still reach its
    /// target from other pending URLs.
    pub fn mark_failed(&mut self, url: &Url) {
        if let Some(state) = self.states.get_mut(url.as_str()) {
            if *state == UrlState::InFlight {
                *state = UrlState::Failed;
                self.in_flight -= 1;
                self.failed += 1;
            }
        }
    }

    /// Number of URLs waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of successfully completed pages
    pub fn done_count(&self) -> usize {
        self.done
    }

    /// Number of failed pages
    pub fn failed_count(&self) -> usize {
        self.failed
    }
}
