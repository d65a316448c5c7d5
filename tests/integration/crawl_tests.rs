use crate::support::{complete_graph, context_for, fan_out, graph, GraphFetcher};
use crawl_bench::crawler::{crawl, CrawlContext, CrawlResult};
use crawl_bench::storage::{PageSink, SqliteSink};
use crawl_bench::Strategy;
use std::sync::Arc;
use std::time::Duration;

const WORKERS: usize = 4;

async fn run(ctx: &CrawlContext, strategy: Strategy, seed: &str, budget: usize) -> CrawlResult {
    crawl(ctx, strategy, seed, budget)
        .await
        .expect("crawl run failed")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fan_out_scenario_crawls_three_pages() {
    let g = graph(&[
        ("http://a", &["http://b", "http://c"]),
        ("http://b", &[]),
        ("http://c", &[]),
    ]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()));
        let result = run(&ctx, strategy, "http://a", 10).await;

        assert_eq!(result.pages_crawled, 3, "{}", strategy);
        assert_eq!(fetcher.total_fetches(), 3, "{}", strategy);
        assert!(result.elapsed_seconds >= 0.0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_self_loop_is_visited_once() {
    let g = graph(&[("http://a", &["http://a", "http://b"]), ("http://b", &[])]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()));
        let result = run(&ctx, strategy, "http://a", 10).await;

        assert_eq!(result.pages_crawled, 2, "{}", strategy);
        assert_eq!(fetcher.fetch_count("http://a"), 1, "{}", strategy);
        assert_eq!(fetcher.fetch_count("http://b"), 1, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_budget_bounds_pages_crawled() {
    let g = fan_out(50);

    let (ctx, _) = context_for(GraphFetcher::new(g.clone()));
    let sequential = run(&ctx, Strategy::Sequential, "http://hub", 10).await;
    assert_eq!(sequential.pages_crawled, 10);

    let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()).with_delay(Duration::from_millis(2)));
    let pool = run(
        &ctx,
        Strategy::WorkerPool {
            max_workers: WORKERS,
        },
        "http://hub",
        10,
    )
    .await;
    assert!(pool.pages_crawled <= 10);
    assert!(pool.pages_crawled > 0);
    assert!(fetcher.total_fetches() < 51);

    // Cooperative workers check the budget before fetching and count after,
    // so overshoot is bounded by the other workers' in-flight fetches
    let (ctx, _) = context_for(GraphFetcher::new(g).with_delay(Duration::from_millis(2)));
    let cooperative = run(
        &ctx,
        Strategy::Cooperative {
            concurrency: WORKERS,
        },
        "http://hub",
        10,
    )
    .await;
    assert!(cooperative.pages_crawled >= 10);
    assert!(cooperative.pages_crawled <= 10 + WORKERS - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_zero_budget_fetches_nothing() {
    let g = graph(&[("http://a", &["http://b"]), ("http://b", &[])]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()));
        let result = run(&ctx, strategy, "http://a", 0).await;

        assert_eq!(result.pages_crawled, 0, "{}", strategy);
        assert_eq!(fetcher.total_fetches(), 0, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_url_fetched_twice_with_overlapping_links() {
    let g = complete_graph(12);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) =
            context_for(GraphFetcher::new(g.clone()).with_delay(Duration::from_millis(3)));
        let result = run(&ctx, strategy, "http://node/0", 100).await;

        assert_eq!(result.pages_crawled, 12, "{}", strategy);
        assert_eq!(fetcher.max_fetch_count(), 1, "{}", strategy);
        assert_eq!(fetcher.total_fetches(), 12, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_small_graph_terminates_when_frontier_starves() {
    let g = graph(&[
        ("http://a", &["http://b", "http://c"]),
        ("http://b", &["http://d"]),
        ("http://c", &["http://d", "http://e"]),
        ("http://d", &["http://a"]),
        ("http://e", &[]),
    ]);

    for strategy in Strategy::all(8) {
        let (ctx, _) =
            context_for(GraphFetcher::new(g.clone()).with_delay(Duration::from_millis(1)));
        let result = tokio::time::timeout(
            Duration::from_secs(10),
            crawl(&ctx, strategy, "http://a", 100),
        )
        .await
        .expect("crawl stalled")
        .unwrap();

        assert_eq!(result.pages_crawled, 5, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fetch_failure_does_not_stop_crawl() {
    let g = graph(&[
        ("http://a", &["http://b", "http://c", "http://d"]),
        ("http://b", &["http://e"]),
        ("http://c", &[]),
        ("http://d", &[]),
        ("http://e", &[]),
    ]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()).failing("http://b"));
        let result = run(&ctx, strategy, "http://a", 10).await;

        assert_eq!(fetcher.fetch_count("http://b"), 1, "{}", strategy);
        assert_eq!(fetcher.fetch_count("http://c"), 1, "{}", strategy);
        assert_eq!(fetcher.fetch_count("http://d"), 1, "{}", strategy);
        // Links behind the failed page are never discovered
        assert_eq!(fetcher.fetch_count("http://e"), 0, "{}", strategy);

        let expected = match strategy {
            // Sequential and worker pool count successful fetches only
            Strategy::Sequential | Strategy::WorkerPool { .. } => 3,
            // Cooperative counts every processed URL
            Strategy::Cooperative { .. } => 4,
        };
        assert_eq!(result.pages_crawled, expected, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_seed() {
    let g = graph(&[("http://a", &["http://b"]), ("http://b", &[])]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()).failing("http://a"));
        let result = run(&ctx, strategy, "http://a", 10).await;

        assert_eq!(fetcher.total_fetches(), 1, "{}", strategy);
        let expected = match strategy {
            Strategy::Cooperative { .. } => 1,
            _ => 0,
        };
        assert_eq!(result.pages_crawled, expected, "{}", strategy);
    }
}

#[tokio::test]
async fn test_non_http_seed_crawls_nothing() {
    let g = graph(&[("ftp://a", &[])]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()));
        let result = run(&ctx, strategy, "ftp://a", 10).await;

        assert_eq!(result.pages_crawled, 0, "{}", strategy);
        assert_eq!(fetcher.total_fetches(), 0, "{}", strategy);
    }
}

#[tokio::test]
async fn test_non_http_links_are_not_followed() {
    let g = graph(&[
        ("http://a", &["mailto:x@y.z", "ftp://files", "http://b"]),
        ("http://b", &[]),
    ]);

    for strategy in Strategy::all(WORKERS) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(g.clone()));
        let result = run(&ctx, strategy, "http://a", 10).await;

        assert_eq!(result.pages_crawled, 2, "{}", strategy);
        assert_eq!(fetcher.total_fetches(), 2, "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawled_pages_reach_the_sink() {
    let g = graph(&[
        ("http://a", &["http://b", "http://c"]),
        ("http://b", &[]),
        ("http://c", &[]),
    ]);
    let sink = Arc::new(SqliteSink::open_in_memory().unwrap());

    for strategy in Strategy::all(WORKERS) {
        let (ctx, _) = context_for(GraphFetcher::new(g.clone()).failing("http://c"));
        let ctx = ctx.with_sink(sink.clone() as Arc<dyn PageSink>);
        run(&ctx, strategy, "http://a", 10).await;

        // Failed fetches are never persisted
        assert_eq!(sink.count_pages_for(strategy.key()).unwrap(), 2, "{}", strategy);
    }

    let pages = sink.load_pages().unwrap();
    assert_eq!(pages.len(), 6);
    assert!(pages.iter().all(|p| p.title == p.url));
}
