//! Worker-pool strategy: bounded parallel fetch+parse tasks
//!
//! At most `max_workers` tasks are in flight on the multi-threaded runtime.
//! The dispatcher waits for whichever task finishes first, counts it, and
//! refills the pool with one new task while the budget allows and the
//! frontier has work. Tasks still running when the budget is reached are
//! awaited but not counted and not replaced.

use crate::crawler::{CrawlContext, CrawlResult, CrawlState, Strategy};
use crate::BenchError;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::task::JoinSet;

type SharedState = Arc<Mutex<CrawlState>>;

/// Locks the shared state
///
/// Every critical section is a single frontier or counter update, so a
/// poisoned lock still holds consistent state. The panic itself surfaces
/// through the `JoinSet`.
fn lock(state: &SharedState) -> MutexGuard<'_, CrawlState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Crawls with a pool of up to `max_workers` concurrent tasks
///
/// Only tasks whose fetch returned content count toward the budget.
///
/// # Returns
///
/// * `Ok(CrawlResult)` - The run reached budget or exhausted the frontier
/// * `Err(BenchError::Worker)` - A crawl task panicked
pub async fn crawl_worker_pool(
    ctx: &CrawlContext,
    seed_url: &str,
    budget: usize,
    max_workers: usize,
) -> Result<CrawlResult, BenchError> {
    let start_time = Instant::now();
    let state: SharedState = Arc::new(Mutex::new(CrawlState::new(seed_url, budget)));
    let strategy = Strategy::WorkerPool { max_workers };
    let mut in_flight = JoinSet::new();

    // Kickoff: as many tasks as there are pending URLs, up to the pool size
    let initial: Vec<String> = {
        let mut guard = lock(&state);
        let count = if guard.budget_reached() {
            0
        } else {
            guard.frontier.len().min(max_workers.max(1))
        };
        (0..count).filter_map(|_| guard.frontier.pop()).collect()
    };
    for url in initial {
        in_flight.spawn(visit(ctx.clone(), state.clone(), url, strategy));
    }

    let mut pages_crawled = 0;
    while let Some(joined) = in_flight.join_next().await {
        let fetched = joined?;

        let next = {
            let mut guard = lock(&state);
            if fetched {
                guard.pages_crawled += 1;
            }
            pages_crawled = guard.pages_crawled;

            if guard.budget_reached() {
                None
            } else {
                Some(guard.frontier.pop())
            }
        };

        match next {
            None => break,
            Some(Some(url)) => {
                in_flight.spawn(visit(ctx.clone(), state.clone(), url, strategy));
            }
            Some(None) => {}
        }
    }

    if !in_flight.is_empty() {
        tracing::debug!(
            "Budget reached with {} tasks in flight; letting them finish",
            in_flight.len()
        );
    }
    while let Some(joined) = in_flight.join_next().await {
        joined?;
    }

    Ok(CrawlResult {
        pages_crawled,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

/// Fetches and parses one URL, pushing discovered links into the frontier
///
/// # Returns
///
/// `true` if the fetch produced content
async fn visit(ctx: CrawlContext, state: SharedState, url: String, strategy: Strategy) -> bool {
    let Some(body) = ctx.fetch_content(&url).await else {
        return false;
    };

    let links = ctx.process_page(&url, &body, strategy);
    lock(&state).frontier.extend(links);
    true
}
