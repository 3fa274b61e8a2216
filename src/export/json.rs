use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::{ExportError, WellnessReport};

/// Export the full report as pretty-printed JSON
pub fn export_report<P: AsRef<Path>>(
    report: &WellnessReport,
    output_path: P,
) -> Result<(), ExportError> {
    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    Ok(())
}
