//! Crawl-Bench main entry point
//!
//! This is the command-line interface for the crawl strategy benchmark.

use anyhow::{Context, Result};
use clap::Parser;
use crawl_bench::config::{load_config, validate, Config};
use crawl_bench::output::{print_summary, ReportWriter};
use crawl_bench::{BenchmarkRunner, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawl-Bench: compare crawl scheduling strategies
///
/// Crawls the same workload sequentially, with a worker pool, and with
/// cooperative tasks, then writes the raw timings and a box-plot chart.
#[derive(Parser, Debug)]
#[command(name = "crawl-bench")]
#[command(version)]
#[command(about = "Benchmark sequential, worker-pool and cooperative crawling", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL every crawl run starts from
    #[arg(long)]
    seed: Option<String>,

    /// Page budget per crawl run
    #[arg(long)]
    max_pages: Option<usize>,

    /// Worker-pool size and cooperative concurrency
    #[arg(long)]
    workers: Option<usize>,

    /// Crawl runs per strategy
    #[arg(long)]
    repeats: Option<usize>,

    /// SQLite database receiving crawled pages
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.benchmark.seed_url = seed.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.benchmark.max_pages = max_pages;
        }
        if let Some(workers) = self.workers {
            config.benchmark.workers = workers;
        }
        if let Some(repeats) = self.repeats {
            config.benchmark.repeats = repeats;
        }
        if let Some(database) = &self.database {
            config.output.database_path = Some(database.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_benchmark(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_bench=info,warn"),
            1 => EnvFilter::new("crawl_bench=debug,info"),
            2 => EnvFilter::new("crawl_bench=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be benchmarked
fn handle_dry_run(config: &Config) {
    println!("=== Crawl-Bench Dry Run ===\n");

    println!("Workload:");
    println!("  Seed URL: {}", config.benchmark.seed_url);
    println!("  Page budget: {}", config.benchmark.max_pages);
    println!("  Workers: {}", config.benchmark.workers);
    println!("  Repeats: {}", config.benchmark.repeats);

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nStrategies:");
    for strategy in Strategy::all(config.benchmark.workers) {
        println!("  - {} [{}]", strategy, strategy.key());
    }

    println!("\nOutput:");
    println!("  Raw results: {}", config.output.raw_path().display());
    println!("  Chart: {}", config.output.chart_path().display());
    match &config.output.database_path {
        Some(path) => println!("  Pages database: {}", path.display()),
        None => println!("  Pages database: disabled"),
    }

    println!("\n✓ Configuration is valid");
}

/// Runs every strategy, then writes the raw results and the chart
///
/// Artifacts are only written once all strategies completed.
async fn handle_benchmark(config: &Config) -> Result<()> {
    let runner = BenchmarkRunner::from_config(config).context("Failed to set up crawler")?;
    let strategies = Strategy::all(config.benchmark.workers);

    println!("Running benchmarks, please wait…");
    let report = runner
        .run_all(&strategies, config.benchmark.repeats)
        .await
        .context("Benchmark aborted")?;

    let writer = ReportWriter::from_config(&config.output);
    let [raw_path, chart_path] = writer
        .write_all(&report)
        .context("Failed to write benchmark results")?;

    print_summary(&report);
    println!(
        "Done! See:\n • {}\n • {}",
        raw_path.display(),
        chart_path.display()
    );

    Ok(())
}
