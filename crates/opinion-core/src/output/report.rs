//! Run Report
//!
//! Configuration, network statistics, metrics history and final population of
//! a finished run, written as pretty-printed JSON.

use opinion_events::{generate_run_id, MetricsHistory, NetworkSummary, PopulationSnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::SimConfig;
use crate::error::Result;

/// Default report output path
pub const DEFAULT_REPORT_PATH: &str = "output/run_report.json";

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub config: SimConfig,
    pub network: NetworkSummary,
    pub metrics: MetricsHistory,
    pub final_population: PopulationSnapshot,
}

impl RunReport {
    pub fn new(
        config: SimConfig,
        network: NetworkSummary,
        metrics: MetricsHistory,
        final_population: PopulationSnapshot,
    ) -> Self {
        Self {
            run_id: generate_run_id(),
            config,
            network,
            metrics,
            final_population,
        }
    }
}

/// Write a report to `path`, creating parent directories as needed
pub fn write_report(path: impl AsRef<Path>, report: &RunReport) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a report written by [`write_report`]
pub fn read_report(path: impl AsRef<Path>) -> Result<RunReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
