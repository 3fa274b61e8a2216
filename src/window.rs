//! Analysis window selection
//!
//! Storage returns records newest-first; every analysis stage works on a
//! bounded, chronologically ordered slice of that history. Three windows
//! exist:
//!
//! - the main analysis window: the most recent 7 records (or fewer),
//! - the acute window: the most recent 3 records, used only by the warning
//!   detector,
//! - the baseline window: records 7..14 back, used only by the baseline
//!   comparator.

use crate::models::{HealthRecord, MetricField, Mood};

/// Maximum number of records in the main analysis window
pub const ANALYSIS_WINDOW_DAYS: usize = 7;

/// Number of records scanned by the acute warning detector
pub const ACUTE_WINDOW_DAYS: usize = 3;

/// The most recent records in chronological (oldest to newest) order
#[derive(Debug, Clone)]
pub struct AnalysisWindow {
    records: Vec<HealthRecord>,
}

impl AnalysisWindow {
    /// Select the analysis window from a newest-first record sequence.
    ///
    /// Returns `None` when there is no data at all; callers must treat that
    /// as the "insufficient data" sentinel, not an error.
    pub fn select(newest_first: &[HealthRecord]) -> Option<Self> {
        if newest_first.is_empty() {
            return None;
        }

        let size = newest_first.len().min(ANALYSIS_WINDOW_DAYS);
        let mut records: Vec<HealthRecord> = newest_first[..size].to_vec();
        records.reverse();
        Some(AnalysisWindow { records })
    }

    /// Records in chronological order
    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Present values of one metric field, chronological, missing entries
    /// filtered out
    pub fn values(&self, field: MetricField) -> Vec<f64> {
        self.records.iter().filter_map(|r| field.value(r)).collect()
    }

    /// Reported moods in chronological order
    pub fn moods(&self) -> Vec<Mood> {
        self.records.iter().filter_map(|r| r.mood).collect()
    }
}

/// The most recent `ACUTE_WINDOW_DAYS` records in chronological order.
///
/// Returns an empty vector when fewer than 3 records exist; the acute rules
/// never fire on insufficient history.
pub fn acute_window(newest_first: &[HealthRecord]) -> Vec<HealthRecord> {
    if newest_first.len() < ACUTE_WINDOW_DAYS {
        return Vec::new();
    }

    let mut records: Vec<HealthRecord> = newest_first[..ACUTE_WINDOW_DAYS].to_vec();
    records.reverse();
    records
}

/// The baseline slice: the 7 records preceding the analysis window
/// (indices 7..14 of the newest-first history, clipped to its length).
pub fn baseline_slice(newest_first: &[HealthRecord]) -> &[HealthRecord] {
    if newest_first.len() <= ANALYSIS_WINDOW_DAYS {
        return &[];
    }

    let end = newest_first.len().min(ANALYSIS_WINDOW_DAYS * 2);
    &newest_first[ANALYSIS_WINDOW_DAYS..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record_series(count: usize) -> Vec<HealthRecord> {
        // Newest first, like storage returns them; heart rate encodes the
        // age so ordering is observable.
        (0..count)
            .map(|i| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.heart_rate = Some(60.0 + i as f64);
                r
            })
            .collect()
    }

    #[test]
    fn test_empty_history_is_sentinel() {
        assert!(AnalysisWindow::select(&[]).is_none());
    }

    #[test]
    fn test_window_is_chronological_and_bounded() {
        let records = record_series(10);
        let window = AnalysisWindow::select(&records).unwrap();

        assert_eq!(window.len(), ANALYSIS_WINDOW_DAYS);
        // Oldest selected record first (6 days back), newest last
        assert_eq!(window.records()[0].heart_rate, Some(66.0));
        assert_eq!(window.records()[6].heart_rate, Some(60.0));
    }

    #[test]
    fn test_short_history_uses_everything() {
        let records = record_series(4);
        let window = AnalysisWindow::select(&records).unwrap();
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn test_acute_window_requires_three_records() {
        assert!(acute_window(&record_series(2)).is_empty());

        let acute = acute_window(&record_series(5));
        assert_eq!(acute.len(), ACUTE_WINDOW_DAYS);
        assert_eq!(acute[0].heart_rate, Some(62.0));
        assert_eq!(acute[2].heart_rate, Some(60.0));
    }

    #[test]
    fn test_baseline_slice_bounds() {
        assert!(baseline_slice(&record_series(7)).is_empty());
        assert_eq!(baseline_slice(&record_series(10)).len(), 3);
        assert_eq!(baseline_slice(&record_series(14)).len(), 7);
        assert_eq!(baseline_slice(&record_series(30)).len(), 7);
    }

    #[test]
    fn test_values_filter_missing() {
        let mut records = record_series(3);
        records[1].heart_rate = None;
        let window = AnalysisWindow::select(&records).unwrap();
        assert_eq!(window.values(MetricField::HeartRate).len(), 2);
    }
}
