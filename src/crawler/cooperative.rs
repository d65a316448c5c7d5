//! Cooperative strategy: many in-flight fetches on a single thread
//!
//! Workers are `spawn_local` tasks on a [`LocalSet`], so they interleave
//! but never run in parallel. The shared state lives in a `RefCell` and is
//! only borrowed between suspension points; the only `.await` inside a worker
//! is the admission permit plus the fetch itself.

use crate::crawler::{CrawlContext, CrawlResult, CrawlState, Strategy};
use crate::BenchError;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{self, LocalSet};

type SharedState = Rc<RefCell<CrawlState>>;

/// Crawls with `concurrency` cooperative workers behind an admission limiter
///
/// Every processed URL counts toward the budget, including URLs whose
/// fetch failed. Because workers check the budget before fetching and count
/// after, the final count can exceed the budget by up to `concurrency - 1`.
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Every worker stopped on its own
/// * `Err(BenchError::Worker)` - A worker panicked
pub async fn crawl_cooperative(
    ctx: &CrawlContext,
    seed_url: &str,
    budget: usize,
    concurrency: usize,
) -> Result<CrawlResult, BenchError> {
    let start_time = Instant::now();
    let concurrency = concurrency.max(1);
    let state: SharedState = Rc::new(RefCell::new(CrawlState::new(seed_url, budget)));
    let limiter = Rc::new(Semaphore::new(concurrency));
    let strategy = Strategy::Cooperative { concurrency };

    let local = LocalSet::new();
    local
        .run_until(async {
            let workers: Vec<_> = (0..concurrency)
                .map(|id| {
                    task::spawn_local(worker(
                        id,
                        ctx.clone(),
                        state.clone(),
                        limiter.clone(),
                        strategy,
                    ))
                })
                .collect();

            for handle in workers {
                handle.await?;
            }
            Ok::<_, BenchError>(())
        })
        .await?;

    let pages_crawled = state.borrow().pages_crawled;
    Ok(CrawlResult {
        pages_crawled,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

/// One cooperative worker; runs until the budget is hit or the queue is empty
async fn worker(
    id: usize,
    ctx: CrawlContext,
    state: SharedState,
    limiter: Rc<Semaphore>,
    strategy: Strategy,
) {
    let mut processed = 0usize;

    loop {
        let url = {
            let mut state = state.borrow_mut();
            if state.budget_reached() {
                break;
            }
            match state.frontier.pop() {
                Some(url) => url,
                None => break,
            }
        };

        let body = {
            // The limiter is never closed
            let Ok(_permit) = limiter.acquire().await else {
                break;
            };
            ctx.fetch_content(&url).await
        };

        if let Some(body) = body {
            let links = ctx.process_page(&url, &body, strategy);
            state.borrow_mut().frontier.extend(links);
        }
        state.borrow_mut().pages_crawled += 1;
        processed += 1;
    }

    tracing::trace!("Cooperative worker {} stopped after {} URLs", id, processed);
}
