//! Acute warning detection
//!
//! Scans only the last three chronological records, independently of the
//! 7-day insight window, for conditions that deserve immediate attention.
//! Each rule needs the breach on at least 2 of the 3 days; with fewer than
//! 3 records no rule fires at all.

use serde::{Deserialize, Serialize};

use crate::models::HealthRecord;
use crate::window::acute_window;

/// Cutoffs for the acute rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningThresholds {
    /// Stress level at or above which a day counts as acutely stressed
    pub acute_stress_level: u8,

    /// Sleep below which a day counts as acutely sleep deprived
    pub acute_sleep_hours: f64,

    /// Heart rate above which a day counts as tachycardic
    pub acute_heart_rate: f64,

    /// Minimum breach days (out of the 3 scanned) before a rule fires
    pub min_breach_days: usize,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        WarningThresholds {
            acute_stress_level: 8,
            acute_sleep_hours: 5.0,
            acute_heart_rate: 110.0,
            min_breach_days: 2,
        }
    }
}

/// Urgency of an acute warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Medium,
    High,
}

/// Which acute rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    AcuteStress,
    SleepDeprivation,
    ElevatedHeartRate,
}

/// One acute alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub severity: WarningSeverity,
    pub kind: WarningKind,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Scan the last three records for acute conditions.
///
/// Rules are independent; several warnings can co-occur. Fewer than three
/// records yields an empty list.
pub fn detect_warnings(
    newest_first: &[HealthRecord],
    thresholds: &WarningThresholds,
) -> Vec<Warning> {
    let recent = acute_window(newest_first);
    if recent.is_empty() {
        return Vec::new();
    }

    let mut warnings = Vec::new();

    let high_stress_count = recent
        .iter()
        .filter(|r| r.stress_level.is_some_and(|s| s >= thresholds.acute_stress_level))
        .count();
    if high_stress_count >= thresholds.min_breach_days {
        warnings.push(Warning {
            severity: WarningSeverity::High,
            kind: WarningKind::AcuteStress,
            title: "⚠️ Peringatan: Stres Sangat Tinggi".to_string(),
            description: format!(
                "Stres di level ≥{} terdeteksi pada {} dari 3 hari terakhir. Pola ini dapat \
                 berdampak pada sistem cardiovascular dan kualitas tidur Anda.",
                thresholds.acute_stress_level, high_stress_count
            ),
            action: "Segera terapkan teknik manajemen stres (pernapasan dalam, meditasi \
                     singkat)"
                .to_string(),
        });
    }

    let low_sleep_count = recent
        .iter()
        .filter(|r| r.sleep_duration.is_some_and(|s| s < thresholds.acute_sleep_hours))
        .count();
    if low_sleep_count >= thresholds.min_breach_days {
        warnings.push(Warning {
            severity: WarningSeverity::High,
            kind: WarningKind::SleepDeprivation,
            title: "⚠️ Peringatan: Kurang Tidur Parah".to_string(),
            description: format!(
                "Tidur <{} jam terjadi pada {} dari 3 hari terakhir. Sleep deprivation akut \
                 dapat mempengaruhi fungsi kognitif dan sistem imun.",
                thresholds.acute_sleep_hours, low_sleep_count
            ),
            action: "Prioritaskan tidur minimal 7 jam malam ini".to_string(),
        });
    }

    let high_hr_count = recent
        .iter()
        .filter(|r| r.heart_rate.is_some_and(|h| h > thresholds.acute_heart_rate))
        .count();
    if high_hr_count >= thresholds.min_breach_days {
        warnings.push(Warning {
            severity: WarningSeverity::Medium,
            kind: WarningKind::ElevatedHeartRate,
            title: "⚠️ Detak Jantung Istirahat Tinggi".to_string(),
            description: format!(
                "Detak jantung >{} BPM terdeteksi pada {} hari. Ini dapat mengindikasikan \
                 stres fisik/psikologis, dehidrasi, atau konsumsi stimulan berlebih.",
                thresholds.acute_heart_rate, high_hr_count
            ),
            action: "Monitor pola ini dan konsultasikan dengan profesional kesehatan jika \
                     berlanjut"
                .to_string(),
        });
    }

    warnings
}
