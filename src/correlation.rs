//! Cross-metric correlation detection
//!
//! A fixed rule set scans the analysis window for four known co-occurrence
//! patterns. Every rule is double-gated: a minimum number of qualifying days
//! (frequency) and a fixed margin on the difference of means (magnitude), so
//! a single odd day in a short window cannot fabricate a pattern. Rules are
//! independent; any subset can fire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::mean;
use crate::models::{MetricField, Mood};
use crate::window::AnalysisWindow;

/// Gates for the four correlation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationThresholds {
    /// Stress level at or above which a day counts as high-stress
    pub high_stress_level: u8,

    /// Minimum high-stress days before the stress-sleep rule applies
    pub min_high_stress_days: usize,

    /// Hours below the window average that sleep on high-stress days must
    /// fall to count as a stress-sleep correlation
    pub stress_sleep_deficit: f64,

    /// Sleep average below which tired/anxious days implicate sleep
    pub tired_sleep_limit: f64,

    /// Minimum tired/anxious days before the sleep-mood rule applies
    pub min_tired_days: usize,

    /// Activity minutes below which a day counts as inactive
    pub low_activity_minutes: u16,

    /// Minimum inactive days before the activity-mood rule applies
    pub min_low_activity_days: usize,

    /// Minimum negative-mood days among the inactive days
    pub min_negative_mood_days: usize,

    /// Water glasses below which a day counts as low-hydration
    pub low_water_glasses: u8,

    /// Minimum low-hydration days before the hydration rule applies
    pub min_low_water_days: usize,

    /// Minimum tired days among the low-hydration days
    pub min_tired_low_water_days: usize,
}

impl Default for CorrelationThresholds {
    fn default() -> Self {
        CorrelationThresholds {
            high_stress_level: 7,
            min_high_stress_days: 2,
            stress_sleep_deficit: 0.5,
            tired_sleep_limit: 6.5,
            min_tired_days: 2,
            low_activity_minutes: 20,
            min_low_activity_days: 3,
            min_negative_mood_days: 2,
            low_water_glasses: 6,
            min_low_water_days: 2,
            min_tired_low_water_days: 1,
        }
    }
}

/// The four known cross-metric patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationKind {
    StressAffectsSleep,
    SleepAffectsMood,
    ActivityAffectsMood,
    HydrationAffectsEnergy,
}

/// Qualitative strength attached to each detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Light,
    Moderate,
    Strong,
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CorrelationStrength::Light => "ringan",
            CorrelationStrength::Moderate => "sedang",
            CorrelationStrength::Strong => "tinggi",
        };
        write!(f, "{}", label)
    }
}

/// One detected cross-metric pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    #[serde(rename = "type")]
    pub kind: CorrelationKind,
    pub strength: CorrelationStrength,
    pub description: String,
}

/// Evaluate every correlation rule over the window
pub fn detect_correlations(
    window: &AnalysisWindow,
    thresholds: &CorrelationThresholds,
) -> Vec<Correlation> {
    let mut correlations = Vec::new();

    if let Some(c) = stress_affects_sleep(window, thresholds) {
        correlations.push(c);
    }
    if let Some(c) = sleep_affects_mood(window, thresholds) {
        correlations.push(c);
    }
    if let Some(c) = activity_affects_mood(window, thresholds) {
        correlations.push(c);
    }
    if let Some(c) = hydration_affects_energy(window, thresholds) {
        correlations.push(c);
    }

    correlations
}

/// High stress days show measurably shorter sleep than the window norm
fn stress_affects_sleep(
    window: &AnalysisWindow,
    t: &CorrelationThresholds,
) -> Option<Correlation> {
    let high_stress_days: Vec<_> = window
        .records()
        .iter()
        .filter(|r| r.stress_level.is_some_and(|s| s >= t.high_stress_level))
        .collect();

    if high_stress_days.len() < t.min_high_stress_days {
        return None;
    }

    let sleep_on_stress_days: Vec<f64> = high_stress_days
        .iter()
        .filter_map(|r| r.sleep_duration)
        .collect();
    if sleep_on_stress_days.is_empty() {
        return None;
    }

    let avg_sleep_on_stress_days = mean(&sleep_on_stress_days);
    let overall_avg_sleep = mean(&window.values(MetricField::SleepDuration));

    if avg_sleep_on_stress_days >= overall_avg_sleep - t.stress_sleep_deficit {
        return None;
    }

    Some(Correlation {
        kind: CorrelationKind::StressAffectsSleep,
        strength: CorrelationStrength::Strong,
        description: format!(
            "Pada {} hari dengan stres tinggi, Anda tidur rata-rata {:.1} jam, \
             lebih rendah {:.1} jam dari rata-rata normal Anda.",
            high_stress_days.len(),
            avg_sleep_on_stress_days,
            overall_avg_sleep - avg_sleep_on_stress_days
        ),
    })
}

/// Tired or anxious moods cluster on short-sleep days
fn sleep_affects_mood(window: &AnalysisWindow, t: &CorrelationThresholds) -> Option<Correlation> {
    let tired_days: Vec<_> = window
        .records()
        .iter()
        .filter(|r| matches!(r.mood, Some(Mood::Tired) | Some(Mood::Anxious)))
        .collect();

    if tired_days.len() < t.min_tired_days {
        return None;
    }

    let sleep_on_tired_days: Vec<f64> =
        tired_days.iter().filter_map(|r| r.sleep_duration).collect();
    if sleep_on_tired_days.is_empty() {
        return None;
    }

    let avg_sleep_on_tired_days = mean(&sleep_on_tired_days);
    if avg_sleep_on_tired_days >= t.tired_sleep_limit {
        return None;
    }

    Some(Correlation {
        kind: CorrelationKind::SleepAffectsMood,
        strength: CorrelationStrength::Moderate,
        description: format!(
            "Mood \"lelah\" atau \"cemas\" muncul pada {} hari, dan rata-rata tidur \
             saat itu hanya {:.1} jam.",
            tired_days.len(),
            avg_sleep_on_tired_days
        ),
    })
}

/// Negative moods cluster on inactive days
fn activity_affects_mood(
    window: &AnalysisWindow,
    t: &CorrelationThresholds,
) -> Option<Correlation> {
    let low_activity_days: Vec<_> = window
        .records()
        .iter()
        .filter(|r| r.activity_level.is_some_and(|a| a < t.low_activity_minutes))
        .collect();

    if low_activity_days.len() < t.min_low_activity_days {
        return None;
    }

    let negative_mood_count = low_activity_days
        .iter()
        .filter(|r| r.mood.is_some_and(|m| m.is_negative()))
        .count();

    if negative_mood_count < t.min_negative_mood_days {
        return None;
    }

    Some(Correlation {
        kind: CorrelationKind::ActivityAffectsMood,
        strength: CorrelationStrength::Moderate,
        description: format!(
            "Pada {} hari dengan aktivitas rendah (< {} menit), sebagian besar \
             suasana hati cenderung negatif.",
            low_activity_days.len(),
            t.low_activity_minutes
        ),
    })
}

/// Tired moods appear on low-hydration days
fn hydration_affects_energy(
    window: &AnalysisWindow,
    t: &CorrelationThresholds,
) -> Option<Correlation> {
    let low_water_days: Vec<_> = window
        .records()
        .iter()
        .filter(|r| r.water_intake.is_some_and(|w| w < t.low_water_glasses))
        .collect();

    if low_water_days.len() < t.min_low_water_days {
        return None;
    }

    let tired_count = low_water_days
        .iter()
        .filter(|r| r.mood == Some(Mood::Tired))
        .count();

    if tired_count < t.min_tired_low_water_days {
        return None;
    }

    Some(Correlation {
        kind: CorrelationKind::HydrationAffectsEnergy,
        strength: CorrelationStrength::Light,
        description: format!(
            "Hidrasi rendah (< {} gelas) terdeteksi pada {} hari, dan mood \"lelah\" \
             muncul di beberapa hari tersebut.",
            t.low_water_glasses,
            low_water_days.len()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthRecord;
    use chrono::{Duration, Utc};

    struct DayBuilder {
        sleep: f64,
        stress: u8,
        water: u8,
        activity: u16,
        mood: Mood,
    }

    impl Default for DayBuilder {
        fn default() -> Self {
            DayBuilder {
                sleep: 8.0,
                stress: 2,
                water: 9,
                activity: 40,
                mood: Mood::Happy,
            }
        }
    }

    fn build_window(days: Vec<DayBuilder>) -> AnalysisWindow {
        let newest_first: Vec<HealthRecord> = days
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, d)| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.sleep_duration = Some(d.sleep);
                r.stress_level = Some(d.stress);
                r.water_intake = Some(d.water);
                r.activity_level = Some(d.activity);
                r.mood = Some(d.mood);
                r.heart_rate = Some(70.0);
                r
            })
            .collect();
        AnalysisWindow::select(&newest_first).unwrap()
    }

    #[test]
    fn test_stress_sleep_correlation_fires() {
        // 3 high-stress days at 5h sleep, 4 calm days at 8h: overall mean
        // ~6.86h, stress-day mean 5.0h, deficit > 0.5h
        let mut days: Vec<DayBuilder> = Vec::new();
        for _ in 0..3 {
            days.push(DayBuilder {
                stress: 9,
                sleep: 5.0,
                ..DayBuilder::default()
            });
        }
        for _ in 0..4 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        let stress_sleep = found
            .iter()
            .find(|c| c.kind == CorrelationKind::StressAffectsSleep)
            .expect("stress-sleep correlation should fire");
        assert_eq!(stress_sleep.strength, CorrelationStrength::Strong);
        assert!(stress_sleep.description.contains("3 hari"));
    }

    #[test]
    fn test_stress_sleep_needs_two_qualifying_days() {
        let mut days = vec![DayBuilder {
            stress: 9,
            sleep: 4.0,
            ..DayBuilder::default()
        }];
        for _ in 0..6 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        assert!(!found
            .iter()
            .any(|c| c.kind == CorrelationKind::StressAffectsSleep));
    }

    #[test]
    fn test_stress_sleep_needs_magnitude() {
        // Frequency gate passes but sleep on stress days is barely lower
        let mut days: Vec<DayBuilder> = Vec::new();
        for _ in 0..3 {
            days.push(DayBuilder {
                stress: 8,
                sleep: 7.8,
                ..DayBuilder::default()
            });
        }
        for _ in 0..4 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        assert!(!found
            .iter()
            .any(|c| c.kind == CorrelationKind::StressAffectsSleep));
    }

    #[test]
    fn test_sleep_mood_correlation() {
        let mut days = vec![
            DayBuilder {
                mood: Mood::Tired,
                sleep: 5.5,
                ..DayBuilder::default()
            },
            DayBuilder {
                mood: Mood::Anxious,
                sleep: 6.0,
                ..DayBuilder::default()
            },
        ];
        for _ in 0..5 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        let sleep_mood = found
            .iter()
            .find(|c| c.kind == CorrelationKind::SleepAffectsMood)
            .expect("sleep-mood correlation should fire");
        assert_eq!(sleep_mood.strength, CorrelationStrength::Moderate);
    }

    #[test]
    fn test_activity_mood_correlation() {
        let mut days = vec![
            DayBuilder {
                activity: 10,
                mood: Mood::Sad,
                ..DayBuilder::default()
            },
            DayBuilder {
                activity: 5,
                mood: Mood::Tired,
                ..DayBuilder::default()
            },
            DayBuilder {
                activity: 15,
                mood: Mood::Happy,
                ..DayBuilder::default()
            },
        ];
        for _ in 0..4 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        assert!(found
            .iter()
            .any(|c| c.kind == CorrelationKind::ActivityAffectsMood));
    }

    #[test]
    fn test_hydration_correlation() {
        let mut days = vec![
            DayBuilder {
                water: 3,
                mood: Mood::Tired,
                ..DayBuilder::default()
            },
            DayBuilder {
                water: 4,
                ..DayBuilder::default()
            },
        ];
        for _ in 0..5 {
            days.push(DayBuilder::default());
        }

        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        let hydration = found
            .iter()
            .find(|c| c.kind == CorrelationKind::HydrationAffectsEnergy)
            .expect("hydration correlation should fire");
        assert_eq!(hydration.strength, CorrelationStrength::Light);
    }

    #[test]
    fn test_healthy_window_has_no_correlations() {
        let days: Vec<DayBuilder> = (0..7).map(|_| DayBuilder::default()).collect();
        let found = detect_correlations(&build_window(days), &CorrelationThresholds::default());
        assert!(found.is_empty());
    }
}
