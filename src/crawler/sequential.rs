//! Sequential strategy: one URL at a time, no concurrency

use crate::crawler::{CrawlContext, CrawlResult, CrawlState, Strategy};
use std::time::Instant;

/// Crawls until the budget is reached or the frontier runs dry
///
/// Only pages that returned content count toward the budget.
pub async fn crawl_sequential(ctx: &CrawlContext, seed_url: &str, budget: usize) -> CrawlResult {
    let start_time = Instant::now();
    let mut state = CrawlState::new(seed_url, budget);

    while !state.is_finished() {
        let Some(url) = state.frontier.pop() else {
            break;
        };

        if let Some(body) = ctx.fetch_content(&url).await {
            let links = ctx.process_page(&url, &body, Strategy::Sequential);
            state.frontier.extend(links);
            state.pages_crawled += 1;
        }
    }

    if state.frontier.is_exhausted() && !state.budget_reached() {
        tracing::debug!("Frontier exhausted after {} pages", state.pages_crawled);
    }

    CrawlResult {
        pages_crawled: state.pages_crawled,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    }
}
