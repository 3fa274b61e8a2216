//! Report export
//!
//! Bundles the raw records with the engine outputs into a `WellnessReport`
//! and renders it as JSON, CSV (records only), or a human-readable text
//! document. The text layout follows the section order of the insight
//! report: summary, risk, patterns, recommendations, projection, warnings,
//! baseline, disclaimer.

pub mod csv;
pub mod json;
pub mod text;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::baseline::BaselineComparison;
use crate::insight::{Insight, InsightEngine};
use crate::models::HealthRecord;
use crate::warning::Warning;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Everything one export run needs, computed once
#[derive(Debug, Clone, Serialize)]
pub struct WellnessReport {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub insight: Option<Insight>,
    pub warnings: Vec<Warning>,
    pub baseline: Option<BaselineComparison>,
    pub records: Vec<HealthRecord>,
}

impl WellnessReport {
    /// Run the engine over the history and collect every output
    pub fn build(records: &[HealthRecord], engine: &InsightEngine) -> Self {
        WellnessReport {
            generated_at: Utc::now(),
            record_count: records.len(),
            insight: engine.generate_insight(records),
            warnings: engine.detect_warnings(records),
            baseline: engine.compare_to_baseline(records),
            records: records.to_vec(),
        }
    }
}

/// Render the report to the given path in the requested format
pub fn export_report<P: AsRef<Path>>(
    report: &WellnessReport,
    output_path: P,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => json::export_report(report, output_path),
        ExportFormat::Csv => csv::export_records(&report.records, output_path),
        ExportFormat::Text => text::export_report(report, output_path),
    }
}
