//! Composite risk scoring
//!
//! Accumulates integer points from per-field threshold breaches and maps the
//! total onto a three-level classification through a fixed step function.
//! The point scale intentionally overlaps with, but differs from, the
//! concern identifier's thresholds: risk grades each field on a finer
//! ladder, concerns pick a single dominant problem.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::concern::Concern;
use crate::correlation::Correlation;
use crate::metrics::{MetricTrends, WindowMetrics};

/// Point ladder and level boundaries for the risk scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Sleep below this scores 3 points
    pub sleep_severe: f64,
    /// Sleep below this scores 2 points
    pub sleep_short: f64,
    /// Sleep below this scores 1 point
    pub sleep_borderline: f64,

    /// Stress at or above this scores 3 points
    pub stress_severe: f64,
    /// Stress at or above this scores 2 points
    pub stress_high: f64,
    /// Stress at or above this scores 1 point
    pub stress_elevated: f64,

    /// Activity below this scores 2 points
    pub activity_sedentary: f64,
    /// Activity below this scores 1 point
    pub activity_low: f64,

    /// Heart rate above this scores 2 points
    pub heart_rate_high: f64,
    /// Heart rate above this scores 1 point
    pub heart_rate_elevated: f64,

    /// Water below this scores 1 point
    pub water_low: f64,

    /// Score at or above this maps to high risk
    pub high_score: u32,
    /// Score at or above this maps to moderate risk
    pub moderate_score: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            sleep_severe: 5.0,
            sleep_short: 6.5,
            sleep_borderline: 7.0,
            stress_severe: 8.0,
            stress_high: 7.0,
            stress_elevated: 6.0,
            activity_sedentary: 15.0,
            activity_low: 25.0,
            heart_rate_high: 100.0,
            heart_rate_elevated: 90.0,
            water_low: 5.0,
            high_score: 7,
            moderate_score: 4,
        }
    }
}

/// Three-level risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Step function from score to level
    pub fn from_score(score: u32, thresholds: &RiskThresholds) -> Self {
        if score >= thresholds.high_score {
            RiskLevel::High
        } else if score >= thresholds.moderate_score {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Rendah",
            RiskLevel::Moderate => "Sedang",
            RiskLevel::High => "Tinggi",
        };
        write!(f, "{}", label)
    }
}

/// The composite risk result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    pub justification: String,
}

/// Accumulate threshold-breach points across all fields
pub fn risk_score(metrics: &WindowMetrics, t: &RiskThresholds) -> u32 {
    let mut score = 0;

    let sleep = metrics.sleep_duration.average;
    if sleep < t.sleep_severe {
        score += 3;
    } else if sleep < t.sleep_short {
        score += 2;
    } else if sleep < t.sleep_borderline {
        score += 1;
    }

    let stress = metrics.stress_level.average;
    if stress >= t.stress_severe {
        score += 3;
    } else if stress >= t.stress_high {
        score += 2;
    } else if stress >= t.stress_elevated {
        score += 1;
    }

    let activity = metrics.activity_level.average;
    if activity < t.activity_sedentary {
        score += 2;
    } else if activity < t.activity_low {
        score += 1;
    }

    let heart_rate = metrics.heart_rate.average;
    if heart_rate > t.heart_rate_high {
        score += 2;
    } else if heart_rate > t.heart_rate_elevated {
        score += 1;
    }

    if metrics.water_intake.average < t.water_low {
        score += 1;
    }

    score
}

/// Score the window and build the level-specific justification
pub fn assess_risk(
    metrics: &WindowMetrics,
    trends: &MetricTrends,
    correlations: &[Correlation],
    primary_concern: Option<&Concern>,
    thresholds: &RiskThresholds,
) -> RiskAssessment {
    let score = risk_score(metrics, thresholds);
    let level = RiskLevel::from_score(score, thresholds);

    let justification = match level {
        RiskLevel::High => high_risk_justification(score, metrics, correlations),
        RiskLevel::Moderate => moderate_risk_justification(score, trends, primary_concern),
        RiskLevel::Low if score >= 1 => low_risk_justification(score, metrics),
        RiskLevel::Low => format!(
            "Level risiko rendah (skor {}) mencerminkan keseimbangan yang baik pada semua \
             metrik kesehatan utama. Pola tidur, manajemen stres, aktivitas fisik, dan \
             hidrasi berada dalam rentang yang mendukung kesehatan optimal. Fokus pada \
             pemeliharaan konsistensi pola positif ini.",
            score
        ),
    };

    RiskAssessment {
        level,
        score,
        justification,
    }
}

fn high_risk_justification(
    score: u32,
    metrics: &WindowMetrics,
    correlations: &[Correlation],
) -> String {
    let mut justification = format!(
        "Level risiko tinggi ditentukan berdasarkan akumulasi {} poin dari berbagai faktor. ",
        score
    );

    let mut factors = Vec::new();
    if metrics.sleep_duration.average < 6.5 {
        factors.push(format!(
            "kurang tidur kronis ({:.1} jam)",
            metrics.sleep_duration.average
        ));
    }
    if metrics.stress_level.average >= 7.0 {
        factors.push(format!(
            "stres berkelanjutan ({:.1}/10)",
            metrics.stress_level.average
        ));
    }
    if metrics.activity_level.average < 20.0 {
        factors.push(format!(
            "inaktivitas fisik ({:.0} menit/hari)",
            metrics.activity_level.average
        ));
    }
    if metrics.heart_rate.average > 95.0 {
        factors.push(format!(
            "detak jantung istirahat tinggi ({:.0} BPM)",
            metrics.heart_rate.average
        ));
    }

    justification.push_str(&format!(
        "Kombinasi kritisnya mencakup: {}. ",
        factors.join(", ")
    ));

    if let Some(first) = correlations.first() {
        justification.push_str(&format!(
            "Lebih signifikan lagi, terdeteksi pola saling mempengaruhi di mana {} Siklus \
             negatif ini dapat mempercepat penurunan kondisi jika tidak segera ditangani.",
            first.description.to_lowercase()
        ));
    } else {
        justification.push_str(
            "Meski faktor-faktor ini tampak independen, akumulasinya membentuk beban \
             signifikan terhadap sistem tubuh yang dapat meningkatkan risiko masalah \
             kesehatan lifestyle jangka panjang.",
        );
    }

    justification
}

fn moderate_risk_justification(
    score: u32,
    trends: &MetricTrends,
    primary_concern: Option<&Concern>,
) -> String {
    let mut justification = format!(
        "Level risiko sedang dengan skor {} poin mengindikasikan adanya ketidakseimbangan \
         pada beberapa aspek gaya hidup. ",
        score
    );

    if let Some(concern) = primary_concern {
        justification.push_str(&format!(
            "Area utama: {}, yang menjadi prioritas untuk diperbaiki. ",
            concern.reason.to_lowercase()
        ));
    }

    if trends.sleep.is_decreasing() || trends.stress.is_increasing() {
        justification.push_str(
            "Tren yang memburuk terdeteksi, sehingga risiko dapat meningkat jika pola saat \
             ini berlanjut. ",
        );
    }

    justification.push_str(
        "Pada level ini, intervensi dini melalui penyesuaian kebiasaan dapat efektif \
         mencegah eskalasi risiko.",
    );

    justification
}

fn low_risk_justification(score: u32, metrics: &WindowMetrics) -> String {
    let mut justification = format!(
        "Level risiko rendah dengan skor {} poin menunjukkan kondisi yang umumnya sehat \
         dengan ruang untuk optimalisasi minor. ",
        score
    );

    let mut minor_issues = Vec::new();
    let sleep = metrics.sleep_duration.average;
    if (6.5..7.0).contains(&sleep) {
        minor_issues.push("tidur mendekati batas minimal");
    }
    let stress = metrics.stress_level.average;
    if (5.0..6.0).contains(&stress) {
        minor_issues.push("stres di level menengah");
    }
    let activity = metrics.activity_level.average;
    if (25.0..30.0).contains(&activity) {
        minor_issues.push("aktivitas sedikit di bawah target");
    }

    if minor_issues.is_empty() {
        justification.push_str(
            "Profil kesehatan yang baik dengan fondasi kuat untuk kesejahteraan jangka \
             panjang.",
        );
    } else {
        justification.push_str(&format!(
            "Perhatian kecil pada: {}. Penyesuaian ringan dapat membawa metrik ke zona \
             optimal.",
            minor_issues.join(", ")
        ));
    }

    justification
}
