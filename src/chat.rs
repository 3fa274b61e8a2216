//! Free-text question answering
//!
//! A dispatch table maps keyword groups to intents; the first group with a
//! matching keyword wins. Each intent recomputes the relevant aggregation
//! and trend primitives over the last 7 records and renders a short
//! templated answer; the pattern intent returns the full narrative summary.

use crate::correlation::{detect_correlations, CorrelationKind};
use crate::insight::{AnalysisThresholds, InsightEngine};
use crate::metrics::{mean, trend_direction, TrendDirection};
use crate::models::{HealthRecord, MetricField};
use crate::window::AnalysisWindow;

/// Question domains the resolver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Sleep,
    Stress,
    Activity,
    Pattern,
}

/// Keyword groups per intent, checked in order; the first group containing
/// a matched keyword decides the intent
pub const INTENT_KEYWORDS: &[(ChatIntent, &[&str])] = &[
    (ChatIntent::Sleep, &["tidur", "sleep"]),
    (ChatIntent::Stress, &["stres", "stress"]),
    (ChatIntent::Activity, &["aktivitas", "olahraga"]),
    (ChatIntent::Pattern, &["pola", "analisis"]),
];

/// Fallback answer when no keyword matches or no data exists
const DEFAULT_RESPONSE: &str =
    "Saya dapat menganalisis data kesehatan Anda untuk memberikan wawasan tentang pola \
     tidur, stres, aktivitas, dan korelasinya. Tanyakan tentang metrik spesifik atau minta \
     \"analisis pola\" untuk overview komprehensif. Ingat: ini informasi lifestyle, bukan \
     diagnosis medis.";

/// Case-insensitive substring match against the keyword table
pub fn resolve_intent(message: &str) -> Option<ChatIntent> {
    let message = message.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
        .map(|(intent, _)| *intent)
}

/// Answer a free-text question over the record history
pub fn answer_question(
    question: &str,
    newest_first: &[HealthRecord],
    thresholds: &AnalysisThresholds,
) -> String {
    let Some(intent) = resolve_intent(question) else {
        return DEFAULT_RESPONSE.to_string();
    };

    let Some(window) = AnalysisWindow::select(newest_first) else {
        return DEFAULT_RESPONSE.to_string();
    };

    match intent {
        ChatIntent::Sleep => sleep_answer(&window, thresholds),
        ChatIntent::Stress => stress_answer(&window, thresholds),
        ChatIntent::Activity => activity_answer(&window),
        ChatIntent::Pattern => InsightEngine::with_thresholds(thresholds.clone())
            .generate_insight(newest_first)
            .map(|insight| insight.summary)
            .unwrap_or_else(|| DEFAULT_RESPONSE.to_string()),
    }
}

fn sleep_answer(window: &AnalysisWindow, thresholds: &AnalysisThresholds) -> String {
    let values = window.values(MetricField::SleepDuration);
    let avg_sleep = mean(&values);
    let trend = trend_direction(&values, &thresholds.trend);

    let mut answer = format!(
        "Analisis tidur Anda ({} hari terakhir): rata-rata {:.1} jam dengan tren {}. ",
        window.len(),
        avg_sleep,
        trend
    );

    if avg_sleep < 7.0 {
        answer.push_str(
            "Ini di bawah rekomendasi 7-9 jam. Kurang tidur kronis dapat berdampak pada \
             memori, mood, dan fungsi imun.",
        );
    } else {
        answer.push_str("Durasi ini memenuhi standar sehat.");
    }

    if trend == TrendDirection::Decreasing {
        answer.push_str(
            " Perhatikan tren penurunan yang dapat mengindikasikan stressor baru atau \
             perubahan rutinitas.",
        );
    }

    answer
}

fn stress_answer(window: &AnalysisWindow, thresholds: &AnalysisThresholds) -> String {
    let avg_stress = mean(&window.values(MetricField::StressLevel));
    let correlations = detect_correlations(window, &thresholds.correlation);

    let mut answer = format!(
        "Tingkat stres rata-rata Anda {:.1}/10 dalam periode observasi. ",
        avg_stress
    );

    if avg_stress >= 7.0 {
        answer.push_str("Level ini tergolong tinggi dan memerlukan perhatian. ");
    }

    if correlations
        .iter()
        .any(|c| c.kind == CorrelationKind::StressAffectsSleep)
    {
        answer.push_str(
            "Data menunjukkan stres Anda berkorelasi dengan kualitas tidur: hari dengan \
             stres tinggi cenderung diikuti tidur yang lebih sedikit. ",
        );
    }

    answer.push_str(
        "Rekomendasikan teknik pernapasan box breathing (4-4-4-4) atau meditasi \
         mindfulness 10 menit setiap hari.",
    );

    answer
}

fn activity_answer(window: &AnalysisWindow) -> String {
    let avg_activity = mean(&window.values(MetricField::ActivityLevel));

    let mut answer = format!(
        "Aktivitas fisik rata-rata Anda {:.0} menit/hari. Target minimal WHO adalah 150 \
         menit/minggu atau ~22 menit/hari. ",
        avg_activity
    );

    if avg_activity < 20.0 {
        answer.push_str(
            "Anda berada di bawah target. Mulai dengan tambahan 10-15 menit jalan kaki \
             dapat memberikan manfaat signifikan.",
        );
    } else {
        answer.push_str(
            "Anda memenuhi atau mendekati target, yang mendukung kesehatan cardiovascular \
             dan mental.",
        );
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn history(sleep: f64, stress: u8, activity: u16) -> Vec<HealthRecord> {
        (0..7)
            .map(|i| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i));
                r.sleep_duration = Some(sleep);
                r.stress_level = Some(stress);
                r.activity_level = Some(activity);
                r.water_intake = Some(8);
                r.heart_rate = Some(70.0);
                r
            })
            .collect()
    }

    #[test]
    fn test_intent_resolution() {
        assert_eq!(
            resolve_intent("Bagaimana kualitas tidur saya?"),
            Some(ChatIntent::Sleep)
        );
        assert_eq!(resolve_intent("my SLEEP is bad"), Some(ChatIntent::Sleep));
        assert_eq!(resolve_intent("apakah saya stres?"), Some(ChatIntent::Stress));
        assert_eq!(
            resolve_intent("berapa olahraga saya minggu ini"),
            Some(ChatIntent::Activity)
        );
        assert_eq!(
            resolve_intent("tolong analisis pola saya"),
            Some(ChatIntent::Pattern)
        );
        assert_eq!(resolve_intent("halo"), None);
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        // Both sleep and stress keywords appear; the sleep group is checked
        // first
        assert_eq!(
            resolve_intent("tidur saya buruk karena stres"),
            Some(ChatIntent::Sleep)
        );
    }

    #[test]
    fn test_unknown_question_gets_default_answer() {
        let answer = answer_question("halo apa kabar", &history(8.0, 2, 40), &Default::default());
        assert!(answer.contains("analisis pola"));
    }

    #[test]
    fn test_empty_history_gets_default_answer() {
        let answer = answer_question("tidur saya gimana?", &[], &Default::default());
        assert!(answer.contains("analisis pola"));
    }

    #[test]
    fn test_short_sleep_answer() {
        let answer = answer_question("tidur saya gimana?", &history(5.5, 2, 40), &Default::default());
        assert!(answer.contains("rata-rata 5.5 jam"));
        assert!(answer.contains("di bawah rekomendasi"));
    }

    #[test]
    fn test_healthy_sleep_answer() {
        let answer = answer_question("sleep?", &history(8.0, 2, 40), &Default::default());
        assert!(answer.contains("memenuhi standar sehat"));
    }

    #[test]
    fn test_high_stress_answer_flags_level() {
        let answer = answer_question("stress saya?", &history(7.0, 8, 40), &Default::default());
        assert!(answer.contains("tergolong tinggi"));
        assert!(answer.contains("box breathing"));
    }

    #[test]
    fn test_low_activity_answer() {
        let answer = answer_question("olahraga cukup?", &history(8.0, 2, 10), &Default::default());
        assert!(answer.contains("di bawah target"));
    }

    #[test]
    fn test_pattern_answer_is_narrative_summary() {
        let answer = answer_question("analisis pola dong", &history(8.0, 2, 40), &Default::default());
        assert!(answer.contains("keseimbangan yang baik"));
    }
}
