//! Primary concern identification
//!
//! Five independent threshold rules each propose at most one concern; the
//! highest severity wins. Ties keep the earlier rule, giving the fixed
//! priority order sleep > stress > heart rate > activity > hydration.
//!
//! This scale is deliberately separate from the risk scorer's finer-grained
//! point scale; the two overlap but are not interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::{MetricTrends, TrendThresholds, WindowMetrics};

/// Thresholds for the concern rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcernThresholds {
    /// Sleep average below this is a concern
    pub sleep_short: f64,

    /// Sleep average below this escalates the concern to severity 3
    pub sleep_severe: f64,

    /// Stress average at or above this (when consistent) is a concern
    pub stress_high: f64,

    /// Heart rate average above this is a concern
    pub heart_rate_elevated: f64,

    /// Activity average below this is a concern
    pub activity_low: f64,

    /// Water average below this is a concern
    pub water_low: f64,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        ConcernThresholds {
            sleep_short: 6.0,
            sleep_severe: 5.0,
            stress_high: 7.0,
            heart_rate_elevated: 95.0,
            activity_low: 15.0,
            water_low: 5.0,
        }
    }
}

/// Problem factor a concern points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernFactor {
    Sleep,
    Stress,
    HeartRate,
    Activity,
    Hydration,
}

impl fmt::Display for ConcernFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConcernFactor::Sleep => "sleep",
            ConcernFactor::Stress => "stress",
            ConcernFactor::HeartRate => "heart_rate",
            ConcernFactor::Activity => "activity",
            ConcernFactor::Hydration => "hydration",
        };
        write!(f, "{}", name)
    }
}

/// One identified problem factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concern {
    pub factor: ConcernFactor,

    /// Severity 1 (minor) to 3 (critical)
    pub severity: u8,

    /// Short Indonesian label for the concern
    pub reason: String,
}

/// Evaluate all concern rules and pick the most severe one.
///
/// Returns `None` when no rule fires. On severity ties the rule evaluated
/// first wins.
pub fn identify_primary_concern(
    metrics: &WindowMetrics,
    trends: &MetricTrends,
    thresholds: &ConcernThresholds,
    trend_thresholds: &TrendThresholds,
) -> Option<Concern> {
    let mut concerns = Vec::new();

    if metrics.sleep_duration.average < thresholds.sleep_short {
        let severity = if metrics.sleep_duration.average < thresholds.sleep_severe {
            3
        } else {
            2
        };
        concerns.push(Concern {
            factor: ConcernFactor::Sleep,
            severity,
            reason: "Kurang tidur kronis".to_string(),
        });
    }

    if metrics.stress_level.average >= thresholds.stress_high
        && trends.stress.consistency > trend_thresholds.chronic_consistency
    {
        concerns.push(Concern {
            factor: ConcernFactor::Stress,
            severity: 3,
            reason: "Stres tinggi konsisten".to_string(),
        });
    }

    if metrics.heart_rate.average > thresholds.heart_rate_elevated {
        concerns.push(Concern {
            factor: ConcernFactor::HeartRate,
            severity: 2,
            reason: "Detak jantung istirahat tinggi".to_string(),
        });
    }

    if metrics.activity_level.average < thresholds.activity_low {
        concerns.push(Concern {
            factor: ConcernFactor::Activity,
            severity: 2,
            reason: "Aktivitas fisik sangat rendah".to_string(),
        });
    }

    if metrics.water_intake.average < thresholds.water_low {
        concerns.push(Concern {
            factor: ConcernFactor::Hydration,
            severity: 1,
            reason: "Hidrasi tidak memadai".to_string(),
        });
    }

    concerns
        .into_iter()
        .fold(None, |best: Option<Concern>, candidate| match best {
            Some(b) if b.severity >= candidate.severity => Some(b),
            _ => Some(candidate),
        })
}
