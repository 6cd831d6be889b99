//! Crawl orchestration: worker pool, result channel, termination
//!
//! The orchestrator seeds a fresh frontier with the start URL, spawns a
//! bounded pool of worker tasks, and drains their results over a channel.
//! Each worker runs fetch → extract → discover per URL; failures are
//! absorbed here and never unwind past the crawl. Results arrive in
//! completion order, which is the only ordering the crawl guarantees.

use crate::config::Config;
use crate::crawler::extractor::{extract_record, PageRecord};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{Dequeue, Frontier};
use crate::crawler::links::discover_links;
use crate::crawler::snapshot::HtmlSnapshot;
use crate::services::{ActivityEntry, ActivityLogSink};
use crate::url_scope::{parse_start_url, registrable_domain};
use crate::{FetchError, ScribeError};
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

/// How long an idle worker sleeps before re-polling an empty frontier
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Ephemeral identity for one crawl invocation
///
/// Owns the frontier for the invocation; both are torn down when the crawl
/// returns, whatever the outcome, so no dedup state survives into a later
/// or concurrent crawl.
pub struct CrawlSession {
    pub id: String,
    frontier: Arc<Mutex<Frontier>>,
}

impl CrawlSession {
    /// Creates a session with a fresh frontier scoped to the start URL
    ///
    /// The id is supplied by the caller so tests can pin it; the public
    /// [`Orchestrator::crawl`] entry point derives one from the clock.
    pub fn new(start_url: &Url, max_pages: usize, id: impl Into<String>) -> Self {
        let scope = registrable_domain(start_url.host_str().unwrap_or_default());
        Self {
            id: id.into(),
            frontier: Arc::new(Mutex::new(Frontier::new(scope, max_pages))),
        }
    }
}

/// One worker's report for one URL
struct PageOutcome {
    url: Url,
    result: Result<PageRecord, FetchError>,
}

/// Drives a crawl to completion under a concurrency bound and page cap
pub struct Orchestrator {
    client: Client,
    workers: usize,
    max_pages: usize,
    log_sink: Option<Arc<dyn ActivityLogSink + Send + Sync>>,
}

impl Orchestrator {
    /// Creates an orchestrator from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to crawl
    /// * `Err(ScribeError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScribeError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        Ok(Self {
            client,
            workers: config.crawler.max_concurrent_workers as usize,
            max_pages: config.crawler.max_pages as usize,
            log_sink: None,
        })
    }

    /// Attaches an activity-log sink fed one row per completed page
    ///
    /// The sink is fire-and-forget; it never affects the crawl outcome.
    pub fn with_log_sink(mut self, sink: Arc<dyn ActivityLogSink + Send + Sync>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Crawls a site starting from `start_url`
    ///
    /// See [`Orchestrator::crawl_with_session`]; the session id is derived
    /// from the wall clock here.
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<PageRecord>, ScribeError> {
        let session_id = format!("crawl-{}", chrono::Utc::now().timestamp_millis());
        self.crawl_with_session(start_url, session_id).await
    }

    /// Crawls a site under an explicit session identity
    ///
    /// # Algorithm
    ///
    /// 1. Parse the start URL, failing fast on malformed input
    /// 2. Seed a fresh frontier with it
    /// 3. Spawn the worker pool; each worker loops dequeue → fetch →
    ///    extract → discover until the frontier is exhausted
    /// 4. Drain worker outcomes in completion order
    /// 5. Surface [`ScribeError::EmptyResult`] when nothing succeeded
    ///
    /// Per-page failures are logged and skipped; partial success returns
    /// `Ok` with a smaller-than-requested result set.
    pub async fn crawl_with_session(
        &self,
        start_url: &str,
        session_id: String,
    ) -> Result<Vec<PageRecord>, ScribeError> {
        let mut start = parse_start_url(start_url)?;
        start.set_fragment(None);

        let session = CrawlSession::new(&start, self.max_pages, session_id);
        tracing::info!(
            "Starting crawl session {} for {} (cap {}, {} workers)",
            session.id,
            start,
            self.max_pages,
            self.workers
        );

        session.frontier.lock().unwrap().enqueue(&start);

        let (tx, mut rx) = mpsc::unbounded_channel::<PageOutcome>();
        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let frontier = Arc::clone(&session.frontier);
            let client = self.client.clone();
            let tx = tx.clone();
            handles.push(tokio::spawn(worker_loop(worker_id, client, frontier, tx)));
        }
        // The drain loop below ends once every worker has dropped its
        // sender clone.
        drop(tx);

        let mut records = Vec::new();
        while let Some(outcome) = rx.recv().await {
            match outcome.result {
                Ok(record) => {
                    tracing::debug!("Collected {}", outcome.url);
                    self.log_activity(&outcome.url, "done", &record.title);
                    records.push(record);
                }
                Err(e) => {
                    tracing::warn!("Page failed, continuing crawl: {}", e);
                    self.log_activity(&outcome.url, "failed", &e.to_string());
                }
            }
        }

        for handle in handles {
            let _ = handle.await;
        }

        let (done, failed) = {
            let frontier = session.frontier.lock().unwrap();
            (frontier.done_count(), frontier.failed_count())
        };
        tracing::info!(
            "Crawl session {} finished: {} pages collected, {} failed",
            session.id,
            done,
            failed
        );

        if records.is_empty() {
            return Err(ScribeError::EmptyResult {
                url: start_url.to_string(),
            });
        }

        Ok(records)
    }

    fn log_activity(&self, url: &Url, status: &str, payload: &str) {
        if let Some(sink) = &self.log_sink {
            sink.append(ActivityEntry::new(url.as_str(), status, payload));
        }
    }
}

/// One worker task: repeatedly claim a URL and run the page pipeline
///
/// Exits when the frontier reports exhaustion (cap reached, or nothing
/// pending and nothing in flight). On `Wait` the worker sleeps briefly,
/// since an in-flight page on another worker may still enqueue links.
async fn worker_loop(
    worker_id: usize,
    client: Client,
    frontier: Arc<Mutex<Frontier>>,
    tx: mpsc::UnboundedSender<PageOutcome>,
) {
    loop {
        let next = frontier.lock().unwrap().dequeue();
        match next {
            Dequeue::Next(url) => {
                tracing::debug!("Worker {} fetching {}", worker_id, url);
                let result = process_url(&client, &url, &frontier).await;

                {
                    let mut f = frontier.lock().unwrap();
                    match &result {
                        Ok(_) => f.mark_done(&url),
                        Err(_) => f.mark_failed(&url),
                    }
                }

                if tx.send(PageOutcome { url, result }).is_err() {
                    break;
                }
            }
            Dequeue::Wait => tokio::time::sleep(POLL_INTERVAL).await,
            Dequeue::Exhausted => {
                tracing::debug!("Worker {} exiting, frontier exhausted", worker_id);
                break;
            }
        }
    }
}

/// Fetch → extract → discover for one URL
///
/// The snapshot lives only between the fetch and the enqueue of its links;
/// nothing page-local is shared across workers.
async fn process_url(
    client: &Client,
    url: &Url,
    frontier: &Arc<Mutex<Frontier>>,
) -> Result<PageRecord, FetchError> {
    let body = fetch_page(client, url).await?;

    let snapshot = HtmlSnapshot::parse(&body, url.clone());
    let record = extract_record(&snapshot, url);
    {
        let mut f = frontier.lock().unwrap();
        discover_links(&snapshot, &mut f);
    }

    Ok(record)
}
