//! Crawl-Bench: a crawl workload benchmark
//!
//! This crate crawls the web from a single seed URL under a page budget and
//! measures how long the same workload takes under three scheduling strategies:
//! a sequential loop, a bounded worker pool running on the multi-threaded
//! runtime, and cooperative single-threaded tasks behind an admission limiter.

pub mod benchmark;
pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Crawl-Bench operations
///
/// Any of these raised during a crawl run is fatal for the whole benchmark.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Crawl worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Reasons a single fetch produced no content
///
/// These never escape a crawl run: every strategy downgrades them to
/// "no content" for the URL in question.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Result type alias for Crawl-Bench operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use benchmark::{BenchmarkReport, BenchmarkRunner};
pub use config::Config;
pub use crawler::{CrawlContext, CrawlResult, Frontier, Strategy};
