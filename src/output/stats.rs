//! Summary statistics over benchmark samples
//!
//! Quartiles use linear interpolation between closest ranks, the same rule
//! box plots are usually drawn with.

use crate::benchmark::BenchmarkReport;

/// Distribution summary of one strategy's samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl SampleSummary {
    /// Summarizes a set of samples; `None` when there are none
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolated percentile of already sorted, non-empty samples
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Summarizes every strategy of a report, in report order
pub fn summarize(report: &BenchmarkReport) -> Vec<(String, Option<SampleSummary>)> {
    report
        .iter()
        .map(|(key, samples)| (key.to_string(), SampleSummary::from_samples(samples)))
        .collect()
}

/// Prints a per-strategy summary table to stdout
pub fn print_summary(report: &BenchmarkReport) {
    println!("=== Benchmark Summary ===\n");
    println!(
        "{:<15} {:>5} {:>9} {:>9} {:>9} {:>9}",
        "Strategy", "Runs", "Min (s)", "Median", "Mean", "Max"
    );

    for (key, summary) in summarize(report) {
        match summary {
            Some(s) => println!(
                "{:<15} {:>5} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
                key, s.count, s.min, s.median, s.mean, s.max
            ),
            None => println!("{:<15} {:>5}", key, 0),
        }
    }
    println!();
}
