//! Baseline comparison
//!
//! Compares the current window averages against the 7 days preceding the
//! analysis window. Needs at least 10 total records; with less history the
//! comparison is reported as absent rather than failing.

use serde::{Deserialize, Serialize};

use crate::metrics::{mean, WindowMetrics};
use crate::models::{HealthRecord, MetricField};
use crate::window::baseline_slice;

/// Minimum total history before a baseline exists
pub const DEFAULT_BASELINE_MIN_RECORDS: usize = 10;

/// Baseline comparison for one metric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBaseline {
    /// Average over the baseline window
    pub baseline: f64,

    /// Current window average minus baseline average
    pub change: f64,

    /// Change as a percentage of the baseline; 0 when the baseline is 0
    pub percent_change: f64,

    /// Whether the change moves in the healthy direction for this field
    pub is_improvement: bool,
}

/// Per-field baseline comparison across the five tracked metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub heart_rate: FieldBaseline,
    pub sleep_duration: FieldBaseline,
    pub water_intake: FieldBaseline,
    pub stress_level: FieldBaseline,
    pub activity_level: FieldBaseline,
}

impl BaselineComparison {
    /// Comparison for one field
    pub fn get(&self, field: MetricField) -> &FieldBaseline {
        match field {
            MetricField::HeartRate => &self.heart_rate,
            MetricField::SleepDuration => &self.sleep_duration,
            MetricField::WaterIntake => &self.water_intake,
            MetricField::StressLevel => &self.stress_level,
            MetricField::ActivityLevel => &self.activity_level,
        }
    }
}

/// Compare current window averages against the older baseline window.
///
/// Returns `None` when fewer than `min_records` total records exist; callers
/// branch on the sentinel instead of handling an error.
pub fn compare_to_baseline(
    newest_first: &[HealthRecord],
    metrics: &WindowMetrics,
    min_records: usize,
) -> Option<BaselineComparison> {
    if newest_first.len() < min_records {
        return None;
    }

    let older = baseline_slice(newest_first);

    Some(BaselineComparison {
        heart_rate: field_baseline(older, metrics, MetricField::HeartRate),
        sleep_duration: field_baseline(older, metrics, MetricField::SleepDuration),
        water_intake: field_baseline(older, metrics, MetricField::WaterIntake),
        stress_level: field_baseline(older, metrics, MetricField::StressLevel),
        activity_level: field_baseline(older, metrics, MetricField::ActivityLevel),
    })
}

fn field_baseline(
    older: &[HealthRecord],
    metrics: &WindowMetrics,
    field: MetricField,
) -> FieldBaseline {
    let values: Vec<f64> = older.iter().filter_map(|r| field.value(r)).collect();
    let baseline = mean(&values);
    let change = metrics.get(field).average - baseline;
    let percent_change = if baseline == 0.0 {
        0.0
    } else {
        change / baseline * 100.0
    };

    let is_improvement = if field.lower_is_better() {
        change < 0.0
    } else {
        change > 0.0
    };

    FieldBaseline {
        baseline,
        change,
        percent_change,
        is_improvement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::AnalysisWindow;
    use chrono::{Duration, Utc};

    fn history(recent_sleep: f64, older_sleep: f64, total: usize) -> Vec<HealthRecord> {
        (0..total)
            .map(|i| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.sleep_duration = Some(if i < 7 { recent_sleep } else { older_sleep });
                r.stress_level = Some(if i < 7 { 3 } else { 6 });
                r.heart_rate = Some(70.0);
                r.water_intake = Some(8);
                r.activity_level = Some(30);
                r
            })
            .collect()
    }

    fn metrics_for(records: &[HealthRecord]) -> WindowMetrics {
        WindowMetrics::from_window(&AnalysisWindow::select(records).unwrap())
    }

    #[test]
    fn test_nine_records_is_no_baseline() {
        let records = history(7.0, 6.0, 9);
        let metrics = metrics_for(&records);
        assert!(
            compare_to_baseline(&records, &metrics, DEFAULT_BASELINE_MIN_RECORDS).is_none()
        );
    }

    #[test]
    fn test_ten_records_enables_baseline() {
        let records = history(7.0, 6.0, 10);
        let metrics = metrics_for(&records);
        let comparison =
            compare_to_baseline(&records, &metrics, DEFAULT_BASELINE_MIN_RECORDS).unwrap();

        assert_eq!(comparison.sleep_duration.baseline, 6.0);
        assert!((comparison.sleep_duration.change - 1.0).abs() < 1e-9);
        assert!(comparison.sleep_duration.is_improvement);
    }

    #[test]
    fn test_lower_is_better_fields() {
        let records = history(7.0, 6.0, 14);
        let metrics = metrics_for(&records);
        let comparison =
            compare_to_baseline(&records, &metrics, DEFAULT_BASELINE_MIN_RECORDS).unwrap();

        // Stress dropped from 6 to 3: an improvement even though change < 0
        assert!(comparison.stress_level.change < 0.0);
        assert!(comparison.stress_level.is_improvement);
        assert!((comparison.stress_level.percent_change - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_baseline_percent_guard() {
        let mut records = history(7.0, 6.0, 14);
        for r in records.iter_mut().skip(7) {
            r.activity_level = Some(0);
        }
        let metrics = metrics_for(&records);
        let comparison =
            compare_to_baseline(&records, &metrics, DEFAULT_BASELINE_MIN_RECORDS).unwrap();
        assert_eq!(comparison.activity_level.percent_change, 0.0);
    }
}
