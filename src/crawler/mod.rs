//! Crawler module: the crawl engine and its collaborators
//!
//! This module contains the core crawling logic, including:
//! - The frontier (FIFO queue plus seen-set)
//! - HTTP fetching and HTML link extraction behind trait seams
//! - Three scheduling strategies over the same workload:
//!   sequential, worker pool, and cooperative tasks
//!
//! Every crawl run builds its own [`CrawlState`]; nothing survives from one
//! run to the next.

mod cooperative;
mod fetcher;
mod frontier;
mod parser;
mod pool;
mod sequential;

pub use cooperative::crawl_cooperative;
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use frontier::{has_http_scheme, CrawlState, Frontier};
pub use parser::{parse_html, HtmlLinkExtractor, LinkExtractor, ParsedPage, EXCERPT_CHARS};
pub use pool::crawl_worker_pool;
pub use sequential::crawl_sequential;

use crate::config::Config;
use crate::storage::{open_sink, NoopSink, PageRecord, PageSink};
use crate::BenchError;
use std::fmt;
use std::sync::Arc;

/// Scheduling strategy for a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One control flow, one fetch at a time
    Sequential,

    /// Up to `max_workers` fetch+parse tasks running in parallel
    WorkerPool { max_workers: usize },

    /// `concurrency` cooperative tasks on one thread, interleaved at fetches
    Cooperative { concurrency: usize },
}

impl Strategy {
    /// The three strategies in benchmark order, sharing one concurrency level
    pub fn all(workers: usize) -> [Strategy; 3] {
        [
            Strategy::Sequential,
            Strategy::WorkerPool {
                max_workers: workers,
            },
            Strategy::Cooperative {
                concurrency: workers,
            },
        ]
    }

    /// Identifier used as the key in the raw results file
    ///
    /// `single_thread` and `thread_pool` match the keys of the Python
    /// benchmark script; its `asyncio` key is written as `cooperative` here,
    /// so diffs against that script's `raw_results.json` must map the one key.
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::Sequential => "single_thread",
            Strategy::WorkerPool { .. } => "thread_pool",
            Strategy::Cooperative { .. } => "cooperative",
        }
    }

    /// Short label used on charts
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Sequential => "Single",
            Strategy::WorkerPool { .. } => "Threads",
            Strategy::Cooperative { .. } => "Cooperative",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => write!(f, "sequential"),
            Strategy::WorkerPool { max_workers } => write!(f, "worker pool ({} workers)", max_workers),
            Strategy::Cooperative { concurrency } => {
                write!(f, "cooperative ({} tasks)", concurrency)
            }
        }
    }
}

/// Outcome of one crawl run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlResult {
    pub pages_crawled: usize,
    pub elapsed_seconds: f64,
}

/// The external collaborators a crawl run works with
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn LinkExtractor>,
    pub sink: Arc<dyn PageSink>,
}

impl CrawlContext {
    /// Creates a context without persistence
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn LinkExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            sink: Arc::new(NoopSink),
        }
    }

    /// Replaces the page sink
    pub fn with_sink(mut self, sink: Arc<dyn PageSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Builds the HTTP fetcher, HTML extractor and optional SQLite sink
    pub fn from_config(config: &Config) -> Result<Self, BenchError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        let sink = open_sink(config.output.database_path.as_deref())?;

        Ok(Self::new(Arc::new(fetcher), Arc::new(HtmlLinkExtractor)).with_sink(sink))
    }

    /// Fetches a URL, downgrading every failure to `None`
    ///
    /// An empty body counts as no content.
    pub(crate) async fn fetch_content(&self, url: &str) -> Option<String> {
        match self.fetcher.fetch(url).await {
            Ok(body) if !body.is_empty() => Some(body),
            Ok(_) => {
                tracing::debug!("Empty body from {}", url);
                None
            }
            Err(e) => {
                tracing::debug!("Fetch failed: {}", e);
                None
            }
        }
    }

    /// Parses a fetched page, hands it to the sink and returns its links
    pub(crate) fn process_page(&self, url: &str, body: &str, strategy: Strategy) -> Vec<String> {
        let page = self.extractor.parse(url, body);

        let record = PageRecord::new(url, page.title.as_deref(), &page.excerpt, strategy.key());
        if let Err(e) = self.sink.save(&record) {
            tracing::warn!("Failed to persist {}: {}", url, e);
        }

        tracing::debug!("Crawled {} ({} links)", url, page.links.len());
        page.links
    }
}

/// Runs one crawl from `seed_url` with the given strategy and page budget
///
/// The returned future completes only when the run reached one of its
/// terminal conditions (budget reached or frontier exhausted).
pub async fn crawl(
    ctx: &CrawlContext,
    strategy: Strategy,
    seed_url: &str,
    budget: usize,
) -> Result<CrawlResult, BenchError> {
    let result = match strategy {
        Strategy::Sequential => crawl_sequential(ctx, seed_url, budget).await,
        Strategy::WorkerPool { max_workers } => {
            crawl_worker_pool(ctx, seed_url, budget, max_workers).await?
        }
        Strategy::Cooperative { concurrency } => {
            crawl_cooperative(ctx, seed_url, budget, concurrency).await?
        }
    };

    tracing::info!(
        "{}: {} pages in {:.3}s",
        strategy,
        result.pages_crawled,
        result.elapsed_seconds
    );

    Ok(result)
}
