use crate::support::{context_for, graph, GraphFetcher, PanickingFetcher};
use crawl_bench::crawler::{CrawlContext, HtmlLinkExtractor};
use crawl_bench::output::ReportWriter;
use crawl_bench::{BenchError, BenchmarkRunner, Strategy};
use std::sync::Arc;

fn tree() -> Arc<crate::support::Graph> {
    graph(&[
        ("http://a", &["http://b", "http://c"]),
        ("http://b", &["http://a"]),
        ("http://c", &[]),
    ])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_collects_one_sample_per_repetition() {
    for strategy in Strategy::all(4) {
        let (ctx, _) = context_for(GraphFetcher::new(tree()));
        let runner = BenchmarkRunner::new(ctx, "http://a", 10);

        let samples = runner.run(strategy, 3).await.unwrap();

        assert_eq!(samples.len(), 3, "{}", strategy);
        assert!(samples.iter().all(|s| *s >= 0.0), "{}", strategy);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repetitions_start_from_fresh_state() {
    for strategy in Strategy::all(4) {
        let (ctx, fetcher) = context_for(GraphFetcher::new(tree()));
        let runner = BenchmarkRunner::new(ctx, "http://a", 10);

        let results = runner.run_crawls(strategy, 3).await.unwrap();

        // A leaked frontier would make the seed unvisitable after the first run
        assert_eq!(fetcher.fetch_count("http://a"), 3, "{}", strategy);
        assert_eq!(fetcher.fetch_count("http://c"), 3, "{}", strategy);
        assert!(
            results.iter().all(|r| r.pages_crawled == 3),
            "{}: {:?}",
            strategy,
            results
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_all_builds_report_in_strategy_order() {
    let (ctx, fetcher) = context_for(GraphFetcher::new(tree()));
    let runner = BenchmarkRunner::new(ctx, "http://a", 10);

    let report = runner.run_all(&Strategy::all(2), 2).await.unwrap();

    let keys: Vec<_> = report.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["single_thread", "thread_pool", "cooperative"]);
    assert!(report.iter().all(|(_, samples)| samples.len() == 2));
    assert_eq!(fetcher.fetch_count("http://a"), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_worker_panic_aborts_benchmark() {
    let ctx = CrawlContext::new(Arc::new(PanickingFetcher), Arc::new(HtmlLinkExtractor));
    let runner = BenchmarkRunner::new(ctx, "http://a", 10);

    let pool = runner
        .run_all(&[Strategy::WorkerPool { max_workers: 2 }], 3)
        .await;
    assert!(matches!(pool, Err(BenchError::Worker(_))));

    let cooperative = runner
        .run(Strategy::Cooperative { concurrency: 2 }, 3)
        .await;
    assert!(matches!(cooperative, Err(BenchError::Worker(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_report_round_trip_to_disk() {
    let (ctx, _) = context_for(GraphFetcher::new(tree()));
    let runner = BenchmarkRunner::new(ctx, "http://a", 10);
    let report = runner.run_all(&Strategy::all(3), 3).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let writer = ReportWriter::new(
        dir.path().join("raw_results.json"),
        dir.path().join("benchmark_plot.svg"),
    );
    writer.write_all(&report).unwrap();

    let raw = std::fs::read_to_string(writer.raw_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["single_thread", "thread_pool", "cooperative"] {
        assert_eq!(value[key].as_array().unwrap().len(), 3, "{}", key);
    }

    let svg = std::fs::read_to_string(writer.chart_path()).unwrap();
    assert!(svg.contains(">Threads<"));
}
