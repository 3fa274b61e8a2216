//! Narrative composition
//!
//! The summary is selected from an ordered list of (predicate, template)
//! rules evaluated top to bottom; the first matching rule wins and the last
//! rule always matches. The order is part of the contract: concern-backed
//! narratives outrank the healthy and mixed fallbacks.
//!
//! Also builds the pattern breakdown: the per-window observation strings
//! reported alongside the summary.

use crate::concern::{Concern, ConcernFactor};
use crate::correlation::{Correlation, CorrelationKind};
use crate::metrics::{mean, population_std_dev, MetricTrends, WindowMetrics};
use crate::models::MetricField;
use crate::window::AnalysisWindow;

/// Everything the summary rules are allowed to look at
pub struct SummaryInputs<'a> {
    pub metrics: &'a WindowMetrics,
    pub trends: &'a MetricTrends,
    pub correlations: &'a [Correlation],
    pub concern: Option<&'a Concern>,
    pub days: usize,
}

/// One (predicate, template) entry of the selection table
pub struct SummaryRule {
    pub name: &'static str,
    pub applies: fn(&SummaryInputs) -> bool,
    pub compose: fn(&SummaryInputs) -> String,
}

/// The selection table, in priority order. The final rule always applies.
pub const SUMMARY_RULES: &[SummaryRule] = &[
    SummaryRule {
        name: "declining-sleep",
        applies: declining_sleep_applies,
        compose: declining_sleep_summary,
    },
    SummaryRule {
        name: "stress-sleep-cycle",
        applies: stress_cycle_applies,
        compose: stress_cycle_summary,
    },
    SummaryRule {
        name: "inactivity-mood",
        applies: inactivity_applies,
        compose: inactivity_summary,
    },
    SummaryRule {
        name: "fully-healthy",
        applies: healthy_applies,
        compose: healthy_summary,
    },
    SummaryRule {
        name: "multiple-issues",
        applies: multi_issue_applies,
        compose: multi_issue_summary,
    },
    SummaryRule {
        name: "single-issue",
        applies: single_issue_applies,
        compose: single_issue_summary,
    },
    SummaryRule {
        name: "balanced",
        applies: always_applies,
        compose: balanced_summary,
    },
];

fn declining_sleep_applies(i: &SummaryInputs) -> bool {
    matches!(i.concern, Some(c) if c.factor == ConcernFactor::Sleep)
        && i.trends.sleep.is_decreasing()
}

fn stress_cycle_applies(i: &SummaryInputs) -> bool {
    matches!(i.concern, Some(c) if c.factor == ConcernFactor::Stress)
        && i.correlations
            .iter()
            .any(|c| c.kind == CorrelationKind::StressAffectsSleep)
}

fn inactivity_applies(i: &SummaryInputs) -> bool {
    i.metrics.activity_level.average < 20.0
        && i.correlations
            .iter()
            .any(|c| c.kind == CorrelationKind::ActivityAffectsMood)
}

fn healthy_applies(i: &SummaryInputs) -> bool {
    i.metrics.sleep_duration.average >= 7.0
        && i.metrics.stress_level.average <= 5.0
        && i.metrics.activity_level.average >= 30.0
}

fn multi_issue_applies(i: &SummaryInputs) -> bool {
    open_issues(i).len() > 1
}

fn single_issue_applies(i: &SummaryInputs) -> bool {
    open_issues(i).len() == 1
}

fn always_applies(_: &SummaryInputs) -> bool {
    true
}

/// Select and render the narrative summary
pub fn compose_summary(inputs: &SummaryInputs) -> String {
    let rule = SUMMARY_RULES
        .iter()
        .find(|r| (r.applies)(inputs))
        .expect("selection table ends with a catch-all rule");
    (rule.compose)(inputs)
}

/// Borderline metrics listed by the mixed fallback templates
fn open_issues(inputs: &SummaryInputs) -> Vec<String> {
    let mut issues = Vec::new();
    let sleep = inputs.metrics.sleep_duration.average;
    if sleep < 7.0 {
        issues.push(format!("tidur yang kurang memadai ({:.1} jam)", sleep));
    }
    let stress = inputs.metrics.stress_level.average;
    if stress >= 6.0 {
        issues.push(format!("stres yang perlu dikelola ({:.1}/10)", stress));
    }
    let activity = inputs.metrics.activity_level.average;
    if activity < 30.0 {
        issues.push(format!("aktivitas fisik rendah ({:.0} menit)", activity));
    }
    issues
}

fn declining_sleep_summary(i: &SummaryInputs) -> String {
    let linkage = match i.correlations.first() {
        Some(c) => {
            let first_clause = c.description.split(',').next().unwrap_or_default();
            format!("tampak berkaitan dengan {}", first_clause.to_lowercase())
        }
        None => "dapat berdampak pada kesehatan jangka panjang".to_string(),
    };

    format!(
        "Analisis {} hari terakhir menunjukkan pola tidur yang menurun dengan rata-rata \
         {:.1} jam per malam, berada di bawah standar minimal 7 jam. Tren penurunan ini \
         {}. Data menunjukkan konsistensi rendah dalam durasi tidur, yang mengindikasikan \
         pola istirahat yang tidak teratur.",
        i.days, i.metrics.sleep_duration.average, linkage
    )
}

fn stress_cycle_summary(i: &SummaryInputs) -> String {
    let trend_clause = if i.trends.stress.is_increasing() {
        "cenderung meningkat"
    } else {
        "relatif stabil di level tinggi"
    };

    format!(
        "Tingkat stres Anda menunjukkan rata-rata {:.1}/10 dalam periode observasi, dengan \
         tren yang {}. Analisis korelasi mengidentifikasi dampak langsung: hari-hari dengan \
         stres tinggi secara konsisten diikuti oleh penurunan kualitas tidur. Pola ini \
         membentuk siklus negatif di mana stres mengganggu istirahat, yang kemudian dapat \
         memperburuk kemampuan mengelola stres keesokan harinya.",
        i.metrics.stress_level.average, trend_clause
    )
}

fn inactivity_summary(i: &SummaryInputs) -> String {
    let correlation_clause = i
        .correlations
        .iter()
        .find(|c| c.kind == CorrelationKind::ActivityAffectsMood)
        .map(|c| c.description.clone())
        .unwrap_or_default();

    format!(
        "Aktivitas fisik Anda tercatat rata-rata {:.0} menit per hari, jauh di bawah \
         rekomendasi minimal 30 menit. Pola inaktivitas ini menunjukkan korelasi dengan \
         suasana hati: {} Kurangnya gerakan fisik dapat mengurangi produksi endorfin alami \
         tubuh, yang berperan dalam regulasi mood dan energi.",
        i.metrics.activity_level.average, correlation_clause
    )
}

fn healthy_summary(i: &SummaryInputs) -> String {
    format!(
        "Berdasarkan analisis {} hari terakhir, metrik kesehatan Anda menunjukkan \
         keseimbangan yang baik: tidur rata-rata {:.1} jam (memenuhi standar 7-9 jam), \
         stres terkendali di level {:.1}/10, dan aktivitas fisik {:.0} menit per hari. \
         Konsistensi pola ini mengindikasikan kebiasaan yang mendukung kesehatan holistik. \
         Namun, tetap penting untuk mempertahankan rutinitas ini dan waspada terhadap \
         perubahan pola yang mungkin muncul.",
        i.days,
        i.metrics.sleep_duration.average,
        i.metrics.stress_level.average,
        i.metrics.activity_level.average
    )
}

fn multi_issue_summary(i: &SummaryInputs) -> String {
    let issues = open_issues(i);
    let correlation_clause = if i.correlations.is_empty() {
        "Meskipun tidak terdeteksi korelasi kuat antar-faktor, perbaikan pada satu area \
         dapat memberikan efek positif keseluruhan."
    } else {
        "Terdeteksi adanya hubungan antar-metrik, di mana satu faktor tampak mempengaruhi \
         yang lain."
    };

    format!(
        "Analisis data menunjukkan beberapa area yang memerlukan perhatian: {}. Kombinasi \
         faktor-faktor ini dapat saling mempengaruhi dan membentuk pola yang kurang optimal \
         untuk kesejahteraan jangka panjang. {}",
        issues.join(", "),
        correlation_clause
    )
}

fn single_issue_summary(i: &SummaryInputs) -> String {
    let issues = open_issues(i);
    let trend_clause = if i.trends.sleep.is_increasing() || i.trends.stress.is_decreasing() {
        "Tren terbaru menunjukkan arah yang positif."
    } else {
        "Konsistensi dalam area yang sudah baik perlu dipertahankan sambil meningkatkan \
         area prioritas."
    };

    format!(
        "Secara keseluruhan, metrik kesehatan Anda menunjukkan performa yang cukup baik \
         dengan satu area yang memerlukan perhatian: {}. Faktor lainnya berada dalam \
         rentang sehat, yang merupakan fondasi baik untuk melakukan perbaikan terfokus. {}",
        issues[0], trend_clause
    )
}

fn balanced_summary(i: &SummaryInputs) -> String {
    format!(
        "Data dari {} hari terakhir menunjukkan profil kesehatan yang seimbang dengan semua \
         metrik utama berada dalam rentang yang mendukung kesejahteraan. Tidur, stres, dan \
         aktivitas fisik menunjukkan pola yang sehat dan konsisten. Penting untuk \
         mempertahankan kebiasaan positif ini sebagai investasi jangka panjang untuk \
         kesehatan.",
        i.days
    )
}

/// Build the ordered observation list reported as the pattern breakdown
pub fn pattern_observations(
    window: &AnalysisWindow,
    trends: &MetricTrends,
    correlations: &[Correlation],
) -> Vec<String> {
    let mut observations = Vec::new();
    let days = window.len();

    // Sleep patterns
    let sleep_values = window.values(MetricField::SleepDuration);
    let poor_sleep_days = sleep_values.iter().filter(|s| **s < 6.0).count();
    if poor_sleep_days >= 2 {
        observations.push(format!(
            "Tidur kurang dari 6 jam terjadi pada {} dari {} hari ({:.0}% periode)",
            poor_sleep_days,
            days,
            poor_sleep_days as f64 / days as f64 * 100.0
        ));
    }

    if trends.sleep.is_decreasing() {
        if let (Some(first), Some(last)) = (sleep_values.first(), sleep_values.last()) {
            observations.push(format!(
                "Durasi tidur menunjukkan tren menurun: dari {:.1} jam di awal periode \
                 menjadi {:.1} jam di hari terakhir",
                first, last
            ));
        }
    }

    let sleep_variation = population_std_dev(&sleep_values);
    if sleep_variation > 1.5 {
        observations.push(format!(
            "Pola tidur tidak konsisten dengan variasi {:.1} jam, menunjukkan jadwal yang \
             tidak teratur",
            sleep_variation
        ));
    }

    // Stress patterns
    let stress_values = window.values(MetricField::StressLevel);
    let high_stress_days = stress_values.iter().filter(|s| **s >= 7.0).count();
    if high_stress_days >= 2 {
        let peak = stress_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        observations.push(format!(
            "Stres level tinggi (≥7) terdeteksi pada {} hari, dengan puncak di {:.0}/10",
            high_stress_days, peak
        ));
    }

    if trends.stress.is_increasing() && stress_values.len() >= 3 {
        let early = mean(&stress_values[..3]);
        let late = mean(&stress_values[stress_values.len() - 3..]);
        observations.push(format!(
            "Tingkat stres menunjukkan eskalasi: rata-rata {:.1} di 3 hari pertama \
             meningkat menjadi {:.1} di 3 hari terakhir",
            early, late
        ));
    }

    // Activity
    let activity_values = window.values(MetricField::ActivityLevel);
    let inactive_days = activity_values.iter().filter(|a| **a < 20.0).count();
    if inactive_days >= 3 {
        observations.push(format!(
            "Aktivitas fisik minimal (<20 menit) terjadi pada {} hari, rata-rata hanya \
             {:.0} menit/hari",
            inactive_days,
            mean(&activity_values)
        ));
    }

    // Hydration
    let water_values = window.values(MetricField::WaterIntake);
    let dehydrated_days = water_values.iter().filter(|w| **w < 6.0).count();
    if dehydrated_days >= 2 {
        observations.push(format!(
            "Asupan air di bawah 6 gelas terjadi pada {} hari (target minimal 8 gelas)",
            dehydrated_days
        ));
    }

    // Heart rate
    let hr_values = window.values(MetricField::HeartRate);
    if !hr_values.is_empty() {
        let avg_hr = mean(&hr_values);
        if avg_hr > 90.0 {
            let range_clause = if avg_hr > 100.0 {
                "berada di atas rentang normal (60-100 BPM)"
            } else {
                "di ujung atas rentang normal"
            };
            observations.push(format!(
                "Detak jantung istirahat rata-rata {:.0} BPM, {}",
                avg_hr, range_clause
            ));
        }
    }

    // Detected correlations
    for correlation in correlations {
        observations.push(format!(
            "Korelasi {}: {}",
            correlation.strength, correlation.description
        ));
    }

    // Mood
    let moods = window.moods();
    let negative_moods = moods.iter().filter(|m| m.is_negative()).count();
    if negative_moods >= 2 {
        observations.push(format!(
            "Suasana hati negatif (lelah/sedih/cemas) muncul pada {} dari {} hari yang \
             tercatat",
            negative_moods,
            moods.len()
        ));
    }

    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concern::{identify_primary_concern, ConcernThresholds};
    use crate::correlation::{detect_correlations, CorrelationThresholds};
    use crate::metrics::TrendThresholds;
    use crate::models::{HealthRecord, Mood};
    use chrono::{Duration, Utc};

    struct Day {
        sleep: f64,
        stress: u8,
        activity: u16,
        water: u8,
        hr: f64,
        mood: Mood,
    }

    impl Default for Day {
        fn default() -> Self {
            Day {
                sleep: 8.0,
                stress: 2,
                activity: 40,
                water: 9,
                hr: 70.0,
                mood: Mood::Happy,
            }
        }
    }

    fn window(days: Vec<Day>) -> AnalysisWindow {
        let newest_first: Vec<HealthRecord> = days
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, d)| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.sleep_duration = Some(d.sleep);
                r.stress_level = Some(d.stress);
                r.activity_level = Some(d.activity);
                r.water_intake = Some(d.water);
                r.heart_rate = Some(d.hr);
                r.mood = Some(d.mood);
                r
            })
            .collect();
        AnalysisWindow::select(&newest_first).unwrap()
    }

    fn summarize(w: &AnalysisWindow) -> (String, &'static str) {
        let metrics = WindowMetrics::from_window(w);
        let trend_thresholds = TrendThresholds::default();
        let trends = MetricTrends::from_window(w, &trend_thresholds);
        let correlations = detect_correlations(w, &CorrelationThresholds::default());
        let concern = identify_primary_concern(
            &metrics,
            &trends,
            &ConcernThresholds::default(),
            &trend_thresholds,
        );

        let inputs = SummaryInputs {
            metrics: &metrics,
            trends: &trends,
            correlations: &correlations,
            concern: concern.as_ref(),
            days: w.len(),
        };
        let rule = SUMMARY_RULES.iter().find(|r| (r.applies)(&inputs)).unwrap();
        ((rule.compose)(&inputs), rule.name)
    }

    #[test]
    fn test_fully_healthy_selects_healthy_template() {
        let w = window((0..7).map(|_| Day::default()).collect());
        let (summary, rule) = summarize(&w);
        assert_eq!(rule, "fully-healthy");
        assert!(summary.contains("keseimbangan yang baik"));
        assert!(summary.contains("7 hari"));
    }

    #[test]
    fn test_declining_sleep_outranks_other_templates() {
        // Sleep concern with a clear downward split-half trend
        let days: Vec<Day> = [7.0, 7.0, 6.5, 5.0, 4.5, 4.5, 4.0]
            .iter()
            .map(|s| Day {
                sleep: *s,
                ..Day::default()
            })
            .collect();
        let (summary, rule) = summarize(&window(days));
        assert_eq!(rule, "declining-sleep");
        assert!(summary.contains("pola tidur yang menurun"));
    }

    #[test]
    fn test_multi_issue_fallback() {
        // Two borderline areas but no concern-backed template: sleep 6.8
        // (below 7) and activity 25 (below 30), stress low
        let days: Vec<Day> = (0..7)
            .map(|_| Day {
                sleep: 6.8,
                activity: 25,
                ..Day::default()
            })
            .collect();
        let (summary, rule) = summarize(&window(days));
        assert_eq!(rule, "multiple-issues");
        assert!(summary.contains("beberapa area yang memerlukan perhatian"));
        assert!(summary.contains("tidur yang kurang memadai"));
        assert!(summary.contains("aktivitas fisik rendah"));
    }

    #[test]
    fn test_single_issue_fallback() {
        let days: Vec<Day> = (0..7)
            .map(|_| Day {
                sleep: 6.8,
                ..Day::default()
            })
            .collect();
        let (summary, rule) = summarize(&window(days));
        assert_eq!(rule, "single-issue");
        assert!(summary.contains("satu area yang memerlukan perhatian"));
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<&str> = SUMMARY_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "declining-sleep",
                "stress-sleep-cycle",
                "inactivity-mood",
                "fully-healthy",
                "multiple-issues",
                "single-issue",
                "balanced",
            ]
        );
    }

    #[test]
    fn test_pattern_observations_for_poor_sleep() {
        let days: Vec<Day> = [5.0, 5.5, 5.0, 8.0, 8.0, 8.0, 8.0]
            .iter()
            .map(|s| Day {
                sleep: *s,
                ..Day::default()
            })
            .collect();
        let w = window(days);
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());
        let observations = pattern_observations(&w, &trends, &[]);

        assert!(observations
            .iter()
            .any(|o| o.contains("Tidur kurang dari 6 jam terjadi pada 3 dari 7 hari")));
    }

    #[test]
    fn test_pattern_observations_include_correlations() {
        let w = window((0..7).map(|_| Day::default()).collect());
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());
        let correlations = vec![Correlation {
            kind: CorrelationKind::StressAffectsSleep,
            strength: crate::correlation::CorrelationStrength::Strong,
            description: "contoh.".to_string(),
        }];
        let observations = pattern_observations(&w, &trends, &correlations);
        assert!(observations.iter().any(|o| o.starts_with("Korelasi tinggi:")));
    }

    #[test]
    fn test_healthy_window_has_few_observations() {
        let w = window((0..7).map(|_| Day::default()).collect());
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());
        assert!(pattern_observations(&w, &trends, &[]).is_empty());
    }
}
