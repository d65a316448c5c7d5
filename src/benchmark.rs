//! Benchmark runner
//!
//! Repeats crawl runs per strategy and collects elapsed-time samples. Each
//! repetition starts from a fresh frontier seeded with the same URL and
//! budget, and finishes before the next one starts.

use crate::config::Config;
use crate::crawler::{crawl, CrawlContext, CrawlResult, Strategy};
use crate::BenchError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Elapsed-time samples per strategy, in run order
///
/// Serializes as a JSON object whose keys are strategy identifiers in the
/// order they were recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkReport {
    entries: Vec<(String, Vec<f64>)>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the samples of one strategy, replacing earlier samples for the same key
    pub fn insert(&mut self, key: impl Into<String>, samples: Vec<f64>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => *existing = samples,
            None => self.entries.push((key, samples)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, samples)| samples.as_slice())
    }

    /// Iterates over `(strategy key, samples)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries
            .iter()
            .map(|(key, samples)| (key.as_str(), samples.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BenchmarkReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, samples) in &self.entries {
            map.serialize_entry(key, samples)?;
        }
        map.end()
    }
}

/// Runs crawl strategies repeatedly against one workload
pub struct BenchmarkRunner {
    ctx: CrawlContext,
    seed_url: String,
    budget: usize,
}

impl BenchmarkRunner {
    /// Creates a runner for the given collaborators and workload
    pub fn new(ctx: CrawlContext, seed_url: impl Into<String>, budget: usize) -> Self {
        Self {
            ctx,
            seed_url: seed_url.into(),
            budget,
        }
    }

    /// Creates a runner wired to real HTTP, HTML parsing and the configured sink
    pub fn from_config(config: &Config) -> Result<Self, BenchError> {
        let ctx = CrawlContext::from_config(config)?;
        Ok(Self::new(
            ctx,
            config.benchmark.seed_url.clone(),
            config.benchmark.max_pages,
        ))
    }

    /// Runs `repeats` crawls and returns their full results in order
    ///
    /// The first failing run aborts the whole sequence.
    pub async fn run_crawls(
        &self,
        strategy: Strategy,
        repeats: usize,
    ) -> Result<Vec<CrawlResult>, BenchError> {
        let mut results = Vec::with_capacity(repeats);

        for repetition in 1..=repeats {
            tracing::debug!("{}: repetition {}/{}", strategy, repetition, repeats);
            let result = crawl(&self.ctx, strategy, &self.seed_url, self.budget).await?;
            results.push(result);
        }

        Ok(results)
    }

    /// Runs `repeats` crawls and returns the elapsed seconds of each
    pub async fn run(&self, strategy: Strategy, repeats: usize) -> Result<Vec<f64>, BenchError> {
        let results = self.run_crawls(strategy, repeats).await?;
        Ok(results.iter().map(|r| r.elapsed_seconds).collect())
    }

    /// Runs every strategy in order and collects a report
    ///
    /// Nothing is returned unless every strategy completed.
    pub async fn run_all(
        &self,
        strategies: &[Strategy],
        repeats: usize,
    ) -> Result<BenchmarkReport, BenchError> {
        let mut report = BenchmarkReport::new();

        for strategy in strategies {
            tracing::info!("Benchmarking {} ({} repeats)", strategy, repeats);
            let samples = self.run(*strategy, repeats).await?;
            report.insert(strategy.key(), samples);
        }

        Ok(report)
    }
}
