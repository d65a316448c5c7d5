//! Configuration module for Crawl-Bench
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults of the
//! reference workload (Wikipedia seed, 100 pages, 20 workers, 5 repeats).
//!
//! # Example
//!
//! ```no_run
//! use crawl_bench::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bench.toml")).unwrap();
//! println!("Page budget: {}", config.benchmark.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BenchmarkConfig, Config, FetcherConfig, OutputConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
