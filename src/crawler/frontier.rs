//! Crawl frontier and per-run crawl state
//!
//! The frontier is a FIFO queue of pending URLs plus the set of every URL it
//! has ever accepted. A URL is marked seen at the moment it is pushed, so a
//! URL discovered by several pages (or several workers) is queued once and
//! popped once per run.

use std::collections::{HashSet, VecDeque};

/// Returns true if the URL carries an `http://` or `https://` prefix
pub fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pending URLs plus the seen-set for a single crawl run
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    pending: VecDeque<String>,

    /// Every URL ever enqueued (grows monotonically)
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Enqueues a URL unless it lacks an HTTP(S) scheme or was already seen
    ///
    /// # Returns
    ///
    /// `true` if the URL was added to the pending queue
    pub fn push(&mut self, url: &str) -> bool {
        if !has_http_scheme(url) || self.seen.contains(url) {
            return false;
        }

        self.seen.insert(url.to_string());
        self.pending.push_back(url.to_string());
        tracing::trace!("Queued {} ({} pending)", url, self.pending.len());
        true
    }

    /// Enqueues every URL in order, returning how many were accepted
    pub fn extend<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter()
            .filter(|url| self.push(url.as_ref()))
            .count()
    }

    /// Removes and returns the earliest pending URL
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// True when no URL is pending
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending URLs
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of distinct URLs this frontier has accepted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }
}

/// Mutable state shared by everything taking part in one crawl run
///
/// The frontier and the page counter always move together, so the concurrent
/// strategies guard them as one unit.
#[derive(Debug)]
pub struct CrawlState {
    pub frontier: Frontier,
    pub pages_crawled: usize,
    budget: usize,
}

impl CrawlState {
    pub fn new(seed: &str, budget: usize) -> Self {
        Self {
            frontier: Frontier::new(seed),
            pages_crawled: 0,
            budget,
        }
    }

    /// True once the page counter has reached the budget
    pub fn budget_reached(&self) -> bool {
        self.pages_crawled >= self.budget
    }

    /// True when the run has nothing left to do
    pub fn is_finished(&self) -> bool {
        self.budget_reached() || self.frontier.is_exhausted()
    }
}
