use csv::Writer;
use std::path::Path;

use super::ExportError;
use crate::models::HealthRecord;

/// Export raw records as CSV, oldest first, one row per day
pub fn export_records<P: AsRef<Path>>(
    records: &[HealthRecord],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = Writer::from_path(output_path)?;

    writer.write_record([
        "date",
        "heart_rate",
        "sleep_duration",
        "water_intake",
        "stress_level",
        "activity_level",
        "mood",
    ])?;

    let mut chronological: Vec<&HealthRecord> = records.iter().collect();
    chronological.sort_by_key(|r| r.recorded_at);

    for record in chronological {
        writer.write_record([
            record.recorded_at.format("%Y-%m-%d").to_string(),
            optional(record.heart_rate.map(|v| format!("{}", v))),
            optional(record.sleep_duration.map(|v| format!("{}", v))),
            optional(record.water_intake.map(|v| v.to_string())),
            optional(record.stress_level.map(|v| v.to_string())),
            optional(record.activity_level.map(|v| v.to_string())),
            optional(record.mood.map(|m| m.to_string())),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_default()
}
