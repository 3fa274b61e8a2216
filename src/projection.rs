//! Two-branch forward projection
//!
//! Templates keyed by the primary concern: the status-quo branch projects
//! the cost of inaction over a factor-specific horizon, the improved branch
//! projects the benefit of following the matching top recommendation. No new
//! computation happens here; everything interpolates window metrics.

use serde::{Deserialize, Serialize};

use crate::concern::{Concern, ConcernFactor};
use crate::metrics::{MetricTrends, WindowMetrics};

/// Status-quo and improved trajectory narratives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub current_trajectory: String,
    pub improved_trajectory: String,
}

/// Build both branches for the identified concern (or the generic pair)
pub fn build_projection(
    metrics: &WindowMetrics,
    trends: &MetricTrends,
    concern: Option<&Concern>,
) -> Projection {
    let (current, improved) = match concern.map(|c| c.factor) {
        Some(ConcernFactor::Sleep) => sleep_projection(metrics, trends),
        Some(ConcernFactor::Stress) => stress_projection(metrics),
        Some(ConcernFactor::Activity) => activity_projection(metrics),
        Some(_) => generic_concern_projection(),
        None => healthy_projection(),
    };

    Projection {
        current_trajectory: current.trim().to_string(),
        improved_trajectory: improved.trim().to_string(),
    }
}

fn sleep_projection(metrics: &WindowMetrics, trends: &MetricTrends) -> (String, String) {
    let mut current = format!(
        "Jika pola tidur {:.1} jam per malam berlanjut, Anda berisiko mengalami akumulasi \
         sleep debt yang dapat bermanifestasi sebagai penurunan konsentrasi, gangguan \
         metabolisme, dan peningkatan reaktivitas emosional dalam 2-4 minggu ke depan. ",
        metrics.sleep_duration.average
    );

    if trends.sleep.is_decreasing() {
        current.push_str(
            "Tren penurunan yang terdeteksi mengindikasikan risiko ini dapat terjadi lebih \
             cepat. ",
        );
    }

    let improved = "Dengan meningkatkan tidur menjadi 7-8 jam konsisten dalam 7 hari ke \
                    depan, Anda dapat mulai merasakan peningkatan energi dan kemampuan \
                    mengelola stres. Dalam 2-3 minggu, perbaikan tidur dapat berdampak pada \
                    normalisasi detak jantung istirahat dan peningkatan performa kognitif."
        .to_string();

    (current, improved)
}

fn stress_projection(metrics: &WindowMetrics) -> (String, String) {
    let mut current = format!(
        "Stres konsisten di level {:.1}/10 tanpa intervensi dapat menyebabkan kelelahan \
         kronis, gangguan tidur yang semakin memburuk, dan potensi burnout dalam 4-8 \
         minggu. ",
        metrics.stress_level.average
    );

    if metrics.sleep_duration.average < 7.0 {
        current.push_str(
            "Kombinasi dengan kurang tidur membentuk siklus yang mempercepat penurunan \
             kesejahteraan. ",
        );
    }

    let improved = "Penerapan teknik manajemen stres harian (meditasi, pernapasan, \
                    aktivitas fisik) dapat menurunkan level stres sebesar 1-2 poin dalam \
                    10-14 hari pertama. Penurunan stres membuka jalan untuk perbaikan \
                    kualitas tidur dan peningkatan energi secara beruntun."
        .to_string();

    (current, improved)
}

fn activity_projection(metrics: &WindowMetrics) -> (String, String) {
    let current = format!(
        "Aktivitas fisik {:.0} menit/hari berada jauh di bawah minimal. Jika pola ini \
         berlanjut, risiko penurunan massa otot, metabolisme yang lambat, dan mood yang \
         rendah akan meningkat seiring waktu. ",
        metrics.activity_level.average
    );

    let improved = "Meningkatkan aktivitas bertahap ke 20-30 menit per hari dalam 2 minggu \
                    dapat meningkatkan produksi endorfin, memperbaiki kualitas tidur, dan \
                    memberikan energi yang lebih stabil. Progres konsisten lebih penting \
                    daripada intensitas tinggi."
        .to_string();

    (current, improved)
}

fn generic_concern_projection() -> (String, String) {
    (
        "Pola saat ini menunjukkan area yang perlu perhatian. Tanpa penyesuaian, metrik \
         yang borderline dapat bergeser ke zona risiko lebih tinggi dalam beberapa minggu. "
            .to_string(),
        "Fokus pada 1-2 area prioritas dengan perubahan kecil dan konsisten dapat \
         menghasilkan perbaikan terukur dalam 2-3 minggu, membawa seluruh profil kesehatan \
         ke zona yang lebih optimal."
            .to_string(),
    )
}

fn healthy_projection() -> (String, String) {
    (
        "Mempertahankan pola saat ini akan menjaga Anda di zona kesehatan yang baik. Namun, \
         konsistensi jangka panjang memerlukan awareness terhadap perubahan kecil yang \
         mungkin menjadi tren negatif. "
            .to_string(),
        "Optimalisasi lebih lanjut pada tidur, aktivitas, atau manajemen stres dapat \
         meningkatkan resiliensi Anda terhadap stressor eksternal, memberikan buffer yang \
         lebih besar saat menghadapi periode menantang di masa depan."
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::TrendThresholds;
    use crate::models::HealthRecord;
    use crate::window::AnalysisWindow;
    use chrono::{Duration, Utc};

    fn window(sleep_series: &[f64], stress: u8) -> AnalysisWindow {
        let newest_first: Vec<HealthRecord> = sleep_series
            .iter()
            .rev()
            .enumerate()
            .map(|(i, s)| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.sleep_duration = Some(*s);
                r.stress_level = Some(stress);
                r.activity_level = Some(40);
                r.water_intake = Some(8);
                r.heart_rate = Some(70.0);
                r
            })
            .collect();
        AnalysisWindow::select(&newest_first).unwrap()
    }

    fn concern(factor: ConcernFactor) -> Concern {
        Concern {
            factor,
            severity: 2,
            reason: "test".to_string(),
        }
    }

    #[test]
    fn test_sleep_projection_mentions_average_and_decline() {
        let w = window(&[7.0, 7.0, 6.0, 5.0, 4.5, 4.0, 4.0], 3);
        let metrics = WindowMetrics::from_window(&w);
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());

        let projection = build_projection(&metrics, &trends, Some(&concern(ConcernFactor::Sleep)));
        assert!(projection.current_trajectory.contains("sleep debt"));
        assert!(projection
            .current_trajectory
            .contains("Tren penurunan yang terdeteksi"));
        assert!(projection.improved_trajectory.contains("7-8 jam"));
        // Trailing whitespace is trimmed
        assert_eq!(
            projection.current_trajectory,
            projection.current_trajectory.trim()
        );
    }

    #[test]
    fn test_stress_projection_compounds_with_short_sleep() {
        let w = window(&[6.0; 7], 8);
        let metrics = WindowMetrics::from_window(&w);
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());

        let projection = build_projection(&metrics, &trends, Some(&concern(ConcernFactor::Stress)));
        assert!(projection.current_trajectory.contains("burnout"));
        assert!(projection
            .current_trajectory
            .contains("Kombinasi dengan kurang tidur"));
    }

    #[test]
    fn test_heart_rate_concern_uses_generic_pair() {
        let w = window(&[8.0; 7], 2);
        let metrics = WindowMetrics::from_window(&w);
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());

        let projection =
            build_projection(&metrics, &trends, Some(&concern(ConcernFactor::HeartRate)));
        assert!(projection.current_trajectory.contains("zona risiko lebih tinggi"));
    }

    #[test]
    fn test_no_concern_uses_healthy_pair() {
        let w = window(&[8.0; 7], 2);
        let metrics = WindowMetrics::from_window(&w);
        let trends = MetricTrends::from_window(&w, &TrendThresholds::default());

        let projection = build_projection(&metrics, &trends, None);
        assert!(projection
            .current_trajectory
            .contains("zona kesehatan yang baik"));
        assert!(projection.improved_trajectory.contains("resiliensi"));
    }
}
