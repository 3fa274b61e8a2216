//! Record import
//!
//! CSV is the only supported exchange format for daily records. Import is
//! tolerant: structurally broken files fail, but individual bad rows are
//! collected as per-row errors and the rest of the batch goes through.

pub mod csv;
pub mod validation;

use thiserror::Error;

use crate::models::HealthRecord;

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File extension or requested format we do not handle
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Structural parse failure (bad header, unreadable file)
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// One rejected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the source file
    pub line: usize,
    pub reason: String,
}

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Successfully parsed and validated records
    pub records: Vec<HealthRecord>,

    /// Rows rejected by parsing or validation
    pub row_errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.row_errors.len()
    }
}
