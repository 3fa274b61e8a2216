//! CSV importer with flexible column mapping
//!
//! Accepts the column-name variations that health exports and spreadsheets
//! commonly use (English and Indonesian), in any order. The date column is
//! required; every metric column is optional.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::import::validation::RecordValidator;
use crate::import::{ImportError, ImportSummary, RowError};
use crate::models::{HealthRecord, Mood};

/// CSV importer for daily health records
pub struct CsvImporter {
    column_mapping: HashMap<String, String>,
    validator: RecordValidator,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        // Common column name variations
        Self::add_mapping(
            &mut column_mapping,
            "recorded_at",
            &["recorded_at", "date", "tanggal", "day", "timestamp"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "heart_rate",
            &["heart_rate", "hr", "heartrate", "bpm", "detak_jantung"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "sleep_duration",
            &["sleep_duration", "sleep", "sleep_hours", "tidur", "durasi_tidur"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "water_intake",
            &["water_intake", "water", "glasses", "gelas", "asupan_air"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "stress_level",
            &["stress_level", "stress", "stres", "tingkat_stres"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "activity_level",
            &["activity_level", "activity", "activity_minutes", "aktivitas"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "mood",
            &["mood", "suasana_hati"],
        );

        Self {
            column_mapping,
            validator: RecordValidator::new(),
        }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    fn normalize_column_name(&self, name: &str) -> String {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");
        self.column_mapping
            .get(&normalized)
            .cloned()
            .unwrap_or(normalized)
    }

    fn parse_datetime(date_str: &str) -> Result<DateTime<Utc>, String> {
        let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"];
        for format in &datetime_formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(date_str, format) {
                return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
        }

        let date_formats = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];
        for format in &date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
                let naive = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
                return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
        }

        Err(format!("Unable to parse date: {}", date_str))
    }

    /// Import a CSV file, validating each row and collecting per-row errors
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportSummary, ImportError> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| self.normalize_column_name(h))
            .collect();

        if !headers.iter().any(|h| h == "recorded_at") {
            return Err(ImportError::ParseError {
                line: 1,
                reason: "missing a date column (expected one of: date, tanggal, recorded_at)"
                    .to_string(),
            });
        }

        let mut summary = ImportSummary::default();

        for (index, row) in reader.records().enumerate() {
            // Header is line 1, the first data row line 2
            let line = index + 2;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    summary.row_errors.push(RowError {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match self.parse_row(&headers, &row) {
                Ok(record) => match self.validator.validate(&record) {
                    Ok(()) => summary.records.push(record),
                    Err(reason) => {
                        warn!(line, %reason, "rejected implausible row");
                        summary.row_errors.push(RowError { line, reason });
                    }
                },
                Err(reason) => {
                    summary.row_errors.push(RowError { line, reason });
                }
            }
        }

        debug!(
            imported = summary.imported(),
            rejected = summary.rejected(),
            "csv import finished"
        );
        Ok(summary)
    }

    fn parse_row(
        &self,
        headers: &[String],
        row: &csv::StringRecord,
    ) -> Result<HealthRecord, String> {
        let field = |name: &str| -> Option<&str> {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let date_str = field("recorded_at").ok_or("missing date value")?;
        let recorded_at = Self::parse_datetime(date_str)?;

        let mut record = HealthRecord::new(recorded_at);

        if let Some(v) = field("heart_rate") {
            record.heart_rate = Some(v.parse::<f64>().map_err(|_| format!("bad heart_rate: {}", v))?);
        }
        if let Some(v) = field("sleep_duration") {
            record.sleep_duration =
                Some(v.parse::<f64>().map_err(|_| format!("bad sleep_duration: {}", v))?);
        }
        if let Some(v) = field("water_intake") {
            record.water_intake =
                Some(v.parse::<u8>().map_err(|_| format!("bad water_intake: {}", v))?);
        }
        if let Some(v) = field("stress_level") {
            record.stress_level =
                Some(v.parse::<u8>().map_err(|_| format!("bad stress_level: {}", v))?);
        }
        if let Some(v) = field("activity_level") {
            record.activity_level =
                Some(v.parse::<u16>().map_err(|_| format!("bad activity_level: {}", v))?);
        }
        if let Some(v) = field("mood") {
            record.mood = Some(Mood::from_str(v)?);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn import(content: &str) -> ImportSummary {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        CsvImporter::new().import_file(file.path()).unwrap()
    }

    #[test]
    fn test_import_standard_columns() {
        let summary = import(
            "date,heart_rate,sleep_duration,water_intake,stress_level,activity_level,mood\n\
             2026-08-01,72,7.5,8,3,35,happy\n\
             2026-08-02,75,6.0,6,5,20,tired\n",
        );

        assert_eq!(summary.imported(), 2);
        assert!(summary.row_errors.is_empty());
        assert_eq!(summary.records[0].heart_rate, Some(72.0));
        assert_eq!(summary.records[1].mood, Some(Mood::Tired));
    }

    #[test]
    fn test_import_mapped_indonesian_columns() {
        let summary = import(
            "tanggal,detak_jantung,tidur,gelas,stres,aktivitas,suasana_hati\n\
             01/08/2026,70,8.0,9,2,40,senang\n",
        );

        assert_eq!(summary.imported(), 1);
        assert_eq!(summary.records[0].mood, Some(Mood::Happy));
        assert_eq!(summary.records[0].water_intake, Some(9));
    }

    #[test]
    fn test_missing_optional_values_stay_none() {
        let summary = import(
            "date,heart_rate,sleep_duration\n\
             2026-08-01,,6.5\n",
        );

        assert_eq!(summary.imported(), 1);
        assert_eq!(summary.records[0].heart_rate, None);
        assert_eq!(summary.records[0].sleep_duration, Some(6.5));
    }

    #[test]
    fn test_bad_rows_are_collected_not_fatal() {
        let summary = import(
            "date,heart_rate\n\
             2026-08-01,72\n\
             not-a-date,80\n\
             2026-08-03,999\n",
        );

        assert_eq!(summary.imported(), 1);
        assert_eq!(summary.rejected(), 2);
        assert_eq!(summary.row_errors[0].line, 3);
        assert!(summary.row_errors[1].reason.contains("heart_rate"));
    }

    #[test]
    fn test_missing_date_column_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"heart_rate,sleep\n72,7.0\n").unwrap();

        let err = CsvImporter::new().import_file(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::ParseError { line: 1, .. }));
    }
}
