//! Metric aggregation and trend analysis
//!
//! Summary statistics per tracked field over the analysis window, plus the
//! split-half trend classifier and the coefficient-of-variation consistency
//! measure that the concern and narrative stages build on.
//!
//! All arithmetic is defensively guarded: an empty value list yields zeroed
//! summaries and never divides by zero.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{MetricField, Mood};
use crate::window::AnalysisWindow;

/// Thresholds for trend classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// Absolute split-half delta below which a series counts as stable
    pub stability_margin: f64,

    /// Consistency above which a pattern counts as chronic rather than noisy
    pub chronic_consistency: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        TrendThresholds {
            stability_margin: 0.3,
            chronic_consistency: 0.7,
        }
    }
}

/// Direction of a metric over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Stable,
    Decreasing,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increasing => "meningkat",
            TrendDirection::Stable => "stabil",
            TrendDirection::Decreasing => "menurun",
        };
        write!(f, "{}", label)
    }
}

/// Summary statistics for one numeric field over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Most recent present value
    pub current: f64,

    /// Mean of present values
    pub average: f64,

    /// Minimum present value
    pub min: f64,

    /// Maximum present value
    pub max: f64,

    /// Split-half trend delta (second-half mean minus first-half mean)
    pub trend_delta: f64,

    /// Population standard deviation of present values
    ///
    /// Kept under the original engine's "variance" name; it is the square
    /// root, used directly and as the coefficient-of-variation input to
    /// consistency.
    pub variance: f64,
}

impl MetricSummary {
    /// Build a summary from chronological present values. Empty input
    /// yields an all-zero summary.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return MetricSummary {
                current: 0.0,
                average: 0.0,
                min: 0.0,
                max: 0.0,
                trend_delta: 0.0,
                variance: 0.0,
            };
        }

        MetricSummary {
            current: values[values.len() - 1],
            average: mean(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            trend_delta: trend_delta(values),
            variance: population_std_dev(values),
        }
    }
}

/// Mean of a value list; 0 for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::mean(values.iter())
}

/// Population standard deviation; 0 for empty input
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::population_std_dev(values.iter())
}

/// Split-half trend delta: mean of the second half minus mean of the first
/// half, splitting at the ceiling of half the length. Series shorter than 2
/// have no trend.
pub fn trend_delta(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let split = values.len().div_ceil(2);
    mean(&values[split..]) - mean(&values[..split])
}

/// Classify the split-half delta into a direction
pub fn trend_direction(values: &[f64], thresholds: &TrendThresholds) -> TrendDirection {
    let delta = trend_delta(values);
    if delta.abs() < thresholds.stability_margin {
        TrendDirection::Stable
    } else if delta > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

/// Consistency of a series: `1 - min(stddev / mean, 1)`, clamped to [0, 1].
/// A zero mean (or empty series) yields 0.
pub fn consistency(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg == 0.0 {
        return 0.0;
    }

    let cv = population_std_dev(values) / avg;
    1.0 - cv.min(1.0)
}

/// Mood trend over the last three reported moods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodTrend {
    Positive,
    Negative,
    Neutral,
    /// Fewer than three moods reported
    InsufficientData,
}

impl MoodTrend {
    /// Classify from chronological moods: compare positive vs negative
    /// counts among the last three entries.
    pub fn from_moods(moods: &[Mood]) -> Self {
        if moods.len() < 3 {
            return MoodTrend::InsufficientData;
        }

        let recent = &moods[moods.len() - 3..];
        let positive = recent.iter().filter(|m| m.is_positive()).count();
        let negative = recent.iter().filter(|m| m.is_negative()).count();

        if positive > negative {
            MoodTrend::Positive
        } else if negative > positive {
            MoodTrend::Negative
        } else {
            MoodTrend::Neutral
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoodTrend::Positive => "positif",
            MoodTrend::Negative => "negatif",
            MoodTrend::Neutral => "netral",
            MoodTrend::InsufficientData => "tidak cukup data",
        };
        write!(f, "{}", label)
    }
}

/// Mood frequency distribution and recency trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub distribution: BTreeMap<Mood, usize>,
    pub trend: MoodTrend,
}

impl MoodSummary {
    pub fn from_moods(moods: &[Mood]) -> Self {
        let mut distribution = BTreeMap::new();
        for mood in moods {
            *distribution.entry(*mood).or_insert(0) += 1;
        }

        MoodSummary {
            distribution,
            trend: MoodTrend::from_moods(moods),
        }
    }
}

/// Per-field summaries plus the mood summary for one analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    pub heart_rate: MetricSummary,
    pub sleep_duration: MetricSummary,
    pub water_intake: MetricSummary,
    pub stress_level: MetricSummary,
    pub activity_level: MetricSummary,
    pub mood: MoodSummary,
}

impl WindowMetrics {
    /// Aggregate every tracked field over the window
    pub fn from_window(window: &AnalysisWindow) -> Self {
        WindowMetrics {
            heart_rate: MetricSummary::from_values(&window.values(MetricField::HeartRate)),
            sleep_duration: MetricSummary::from_values(&window.values(MetricField::SleepDuration)),
            water_intake: MetricSummary::from_values(&window.values(MetricField::WaterIntake)),
            stress_level: MetricSummary::from_values(&window.values(MetricField::StressLevel)),
            activity_level: MetricSummary::from_values(&window.values(MetricField::ActivityLevel)),
            mood: MoodSummary::from_moods(&window.moods()),
        }
    }

    /// Summary for one field
    pub fn get(&self, field: MetricField) -> &MetricSummary {
        match field {
            MetricField::HeartRate => &self.heart_rate,
            MetricField::SleepDuration => &self.sleep_duration,
            MetricField::WaterIntake => &self.water_intake,
            MetricField::StressLevel => &self.stress_level,
            MetricField::ActivityLevel => &self.activity_level,
        }
    }
}

/// Direction and consistency for one tracked field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTrend {
    pub direction: TrendDirection,
    pub consistency: f64,
}

impl FieldTrend {
    fn from_values(values: &[f64], thresholds: &TrendThresholds) -> Self {
        FieldTrend {
            direction: trend_direction(values, thresholds),
            consistency: consistency(values),
        }
    }

    pub fn is_increasing(&self) -> bool {
        self.direction == TrendDirection::Increasing
    }

    pub fn is_decreasing(&self) -> bool {
        self.direction == TrendDirection::Decreasing
    }

    pub fn is_stable(&self) -> bool {
        self.direction == TrendDirection::Stable
    }
}

/// Trends for the fields the narrative and concern stages consult
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrends {
    pub sleep: FieldTrend,
    pub stress: FieldTrend,
    pub activity: FieldTrend,
    pub heart_rate: FieldTrend,
}

impl MetricTrends {
    pub fn from_window(window: &AnalysisWindow, thresholds: &TrendThresholds) -> Self {
        MetricTrends {
            sleep: FieldTrend::from_values(&window.values(MetricField::SleepDuration), thresholds),
            stress: FieldTrend::from_values(&window.values(MetricField::StressLevel), thresholds),
            activity: FieldTrend::from_values(
                &window.values(MetricField::ActivityLevel),
                thresholds,
            ),
            heart_rate: FieldTrend::from_values(&window.values(MetricField::HeartRate), thresholds),
        }
    }
}
