//! Output module for benchmark artifacts
//!
//! This module handles:
//! - Writing the raw per-strategy samples as pretty-printed JSON, keyed by
//!   [`Strategy::key`](crate::Strategy::key) (`cooperative` replaces the
//!   Python script's `asyncio` key)
//! - Rendering a box-plot comparison chart as a standalone SVG
//! - Summary statistics for the console

mod chart;
pub mod stats;
mod traits;

pub use chart::render_svg;
pub use stats::{print_summary, summarize, SampleSummary};
pub use traits::{OutputError, OutputResult};

use crate::benchmark::BenchmarkReport;
use crate::config::OutputConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the raw results file and the comparison chart
#[derive(Debug, Clone)]
pub struct ReportWriter {
    raw_path: PathBuf,
    chart_path: PathBuf,
}

impl ReportWriter {
    pub fn new(raw_path: impl Into<PathBuf>, chart_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            chart_path: chart_path.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.raw_path(), config.chart_path())
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn chart_path(&self) -> &Path {
        &self.chart_path
    }

    /// Persists the samples as a JSON object keyed by strategy identifier
    pub fn write_raw(&self, report: &BenchmarkReport) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        write_file(&self.raw_path, &json)
    }

    /// Renders the box-plot comparison chart
    pub fn render_chart(&self, report: &BenchmarkReport) -> OutputResult<()> {
        write_file(&self.chart_path, &render_svg(report))
    }

    /// Writes both artifacts and returns their paths
    pub fn write_all(&self, report: &BenchmarkReport) -> OutputResult<[&Path; 2]> {
        self.write_raw(report)?;
        self.render_chart(report)?;
        Ok([self.raw_path(), self.chart_path()])
    }
}

fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
