use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Crawl-Bench
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Workload parameters shared by every strategy
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// URL every crawl run starts from
    #[serde(rename = "seed-url", default = "default_seed_url")]
    pub seed_url: String,

    /// Page budget for a single crawl run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Worker-pool size and cooperative concurrency
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Number of crawl runs per strategy
    #[serde(default = "default_repeats")]
    pub repeats: usize,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Per-fetch timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the raw results and the chart
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// File name of the raw JSON samples
    #[serde(rename = "raw-file", default = "default_raw_file")]
    pub raw_file: String,

    /// File name of the SVG chart
    #[serde(rename = "chart-file", default = "default_chart_file")]
    pub chart_file: String,

    /// SQLite database for crawled pages; persistence is off when unset
    #[serde(rename = "database-path", default)]
    pub database_path: Option<PathBuf>,
}

impl OutputConfig {
    pub fn raw_path(&self) -> PathBuf {
        self.results_dir.join(&self.raw_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.results_dir.join(&self.chart_file)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            seed_url: default_seed_url(),
            max_pages: default_max_pages(),
            workers: default_workers(),
            repeats: default_repeats(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            raw_file: default_raw_file(),
            chart_file: default_chart_file(),
            database_path: None,
        }
    }
}

fn default_seed_url() -> String {
    "https://wikipedia.org/".to_string()
}

fn default_max_pages() -> usize {
    100
}

fn default_workers() -> usize {
    20
}

fn default_repeats() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("crawl-bench/{}", env!("CARGO_PKG_VERSION"))
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_raw_file() -> String {
    "raw_results.json".to_string()
}

fn default_chart_file() -> String {
    "benchmark_plot.svg".to_string()
}
