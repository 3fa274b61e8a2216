//! Action plan construction
//!
//! Recommendations are seeded by the primary concern's rule set, extended by
//! correlation-driven additions (skipped when an equivalent action is
//! already present), and padded by generic fallbacks. The final list always
//! holds between 1 and 5 items; priorities are kept as assigned and are not
//! re-numbered, so gaps are expected.

use serde::{Deserialize, Serialize};

use crate::concern::{Concern, ConcernFactor};
use crate::correlation::{Correlation, CorrelationKind};
use crate::metrics::WindowMetrics;

/// Maximum number of recommendations in a plan
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Stress average at which relaxation add-ons accompany sleep and heart
/// rate plans
const RELAXATION_STRESS_TRIGGER: f64 = 6.0;

/// Activity average below which the stress plan adds a daily walk
const WALK_ACTIVITY_TRIGGER: f64 = 25.0;

/// Water average below which the bottle-habit fallback applies
const BOTTLE_WATER_TRIGGER: f64 = 7.0;

/// One prioritized action with its rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1 (do first) to 5 (supporting habit)
    pub priority: u8,
    pub action: String,
    pub rationale: String,
}

/// Build the prioritized action plan
pub fn plan_recommendations(
    metrics: &WindowMetrics,
    correlations: &[Correlation],
    concern: Option<&Concern>,
) -> Vec<Recommendation> {
    let mut plan = Vec::new();

    if let Some(concern) = concern {
        match concern.factor {
            ConcernFactor::Sleep => sleep_plan(&mut plan, metrics),
            ConcernFactor::Stress => stress_plan(&mut plan, metrics),
            ConcernFactor::Activity => activity_plan(&mut plan, metrics, correlations),
            ConcernFactor::HeartRate => heart_rate_plan(&mut plan, metrics),
            // Hydration has no dedicated set; the fallbacks cover it
            ConcernFactor::Hydration => {}
        }
    }

    correlation_additions(&mut plan, correlations);
    fallback_padding(&mut plan, metrics);

    plan.truncate(MAX_RECOMMENDATIONS);
    plan
}

fn has_action_containing(plan: &[Recommendation], needle: &str) -> bool {
    plan.iter().any(|r| r.action.contains(needle))
}

fn sleep_plan(plan: &mut Vec<Recommendation>, metrics: &WindowMetrics) {
    plan.push(Recommendation {
        priority: 1,
        action: "Tetapkan waktu tidur konsisten".to_string(),
        rationale: format!(
            "Data menunjukkan tidur Anda rata-rata {:.1} jam, di bawah kebutuhan minimal 7 \
             jam. Tidur pada jam yang sama setiap malam membantu mengatur ritme sirkadian.",
            metrics.sleep_duration.average
        ),
    });

    if metrics.stress_level.average >= RELAXATION_STRESS_TRIGGER {
        plan.push(Recommendation {
            priority: 2,
            action: "Lakukan rutinitas relaksasi 30 menit sebelum tidur".to_string(),
            rationale: "Tingkat stres Anda yang tinggi dapat mengganggu onset tidur. Teknik \
                        relaksasi seperti pernapasan dalam atau meditasi ringan dapat \
                        menurunkan kortisol."
                .to_string(),
        });
    }

    plan.push(Recommendation {
        priority: 3,
        action: "Hentikan paparan layar (HP, laptop) minimal 1 jam sebelum tidur".to_string(),
        rationale: "Cahaya biru dari layar menekan produksi melatonin, hormon yang mengatur \
                    tidur, memperpanjang waktu yang dibutuhkan untuk tertidur."
            .to_string(),
    });
}

fn stress_plan(plan: &mut Vec<Recommendation>, metrics: &WindowMetrics) {
    plan.push(Recommendation {
        priority: 1,
        action: "Praktikkan teknik pernapasan box (4-4-4-4) 3x sehari".to_string(),
        rationale: format!(
            "Stres Anda konsisten di level {:.1}/10. Pernapasan terkontrol mengaktifkan \
             sistem saraf parasimpatik, menurunkan kortisol dan detak jantung.",
            metrics.stress_level.average
        ),
    });

    if metrics.activity_level.average < WALK_ACTIVITY_TRIGGER {
        plan.push(Recommendation {
            priority: 2,
            action: "Tambahkan 20 menit jalan kaki di pagi atau sore hari".to_string(),
            rationale: "Aktivitas fisik meningkatkan produksi endorfin yang berfungsi \
                        sebagai penstabil mood alami dan mengurangi hormon stres."
                .to_string(),
        });
    }

    plan.push(Recommendation {
        priority: 3,
        action: "Identifikasi dan catat 3 pemicu stres utama Anda".to_string(),
        rationale: "Memahami pola pemicu stres memungkinkan Anda mengembangkan strategi \
                    coping yang spesifik dan efektif."
            .to_string(),
    });
}

fn activity_plan(
    plan: &mut Vec<Recommendation>,
    metrics: &WindowMetrics,
    correlations: &[Correlation],
) {
    plan.push(Recommendation {
        priority: 1,
        action: "Mulai dengan target 15 menit aktivitas fisik setiap hari".to_string(),
        rationale: format!(
            "Aktivitas Anda saat ini {:.0} menit/hari jauh di bawah rekomendasi. Mulai dari \
             target kecil yang realistis meningkatkan konsistensi jangka panjang.",
            metrics.activity_level.average
        ),
    });

    plan.push(Recommendation {
        priority: 2,
        action: "Jadwalkan aktivitas di waktu yang sama setiap hari".to_string(),
        rationale: "Konsistensi waktu membantu membentuk habit loop yang kuat, membuat \
                    aktivitas fisik menjadi otomatis dan tidak bergantung pada motivasi \
                    sesaat."
            .to_string(),
    });

    if correlations
        .iter()
        .any(|c| c.kind == CorrelationKind::ActivityAffectsMood)
    {
        plan.push(Recommendation {
            priority: 3,
            action: "Pilih aktivitas yang Anda nikmati (jalan, bersepeda, tari)".to_string(),
            rationale: "Data menunjukkan aktivitas rendah berkorelasi dengan mood negatif. \
                        Aktivitas yang menyenangkan memberikan manfaat ganda: fisik dan \
                        psikologis."
                .to_string(),
        });
    }
}

fn heart_rate_plan(plan: &mut Vec<Recommendation>, metrics: &WindowMetrics) {
    plan.push(Recommendation {
        priority: 1,
        action: "Kurangi konsumsi kafein menjadi maksimal 1 cangkir sebelum jam 12 siang"
            .to_string(),
        rationale: format!(
            "Detak jantung istirahat Anda {:.0} BPM lebih tinggi dari ideal. Kafein \
             meningkatkan denyut jantung hingga 6-8 jam setelah konsumsi.",
            metrics.heart_rate.average
        ),
    });

    if metrics.stress_level.average >= RELAXATION_STRESS_TRIGGER {
        plan.push(Recommendation {
            priority: 2,
            action: "Praktikkan relaksasi progresif otot sebelum mengukur detak jantung"
                .to_string(),
            rationale: "Stres Anda yang tinggi dapat meningkatkan detak jantung istirahat. \
                        Teknik relaksasi otot menurunkan aktivasi sistem saraf simpatik."
                .to_string(),
        });
    }

    plan.push(Recommendation {
        priority: 3,
        action: "Pantau detak jantung pada waktu dan kondisi yang sama setiap hari".to_string(),
        rationale: "Konsistensi pengukuran (misalnya setiap pagi sebelum bangun tidur) \
                    memberikan data yang lebih akurat untuk mendeteksi pola."
            .to_string(),
    });
}

/// Correlation-driven additions, skipped when an equivalent action exists
fn correlation_additions(plan: &mut Vec<Recommendation>, correlations: &[Correlation]) {
    for correlation in correlations {
        match correlation.kind {
            CorrelationKind::StressAffectsSleep if !has_action_containing(plan, "relaksasi") => {
                plan.push(Recommendation {
                    priority: 2,
                    action: "Pisahkan waktu \"worry time\" di sore hari, jauhkan dari waktu \
                             tidur"
                        .to_string(),
                    rationale: "Terdeteksi korelasi kuat: stres mengganggu tidur Anda. \
                                Mengalokasikan waktu khusus untuk memikirkan kekhawatiran \
                                mencegah intrusi pikiran saat mencoba tidur."
                        .to_string(),
                });
            }
            CorrelationKind::HydrationAffectsEnergy if !has_action_containing(plan, "air") => {
                plan.push(Recommendation {
                    priority: 3,
                    action: "Minum 2 gelas air saat bangun tidur dan sebelum setiap makan"
                        .to_string(),
                    rationale: "Data menunjukkan hidrasi rendah berkaitan dengan energi \
                                rendah. Jadwal terstruktur memastikan asupan minimal 6 gelas \
                                tanpa bergantung pada rasa haus."
                        .to_string(),
                });
            }
            _ => {}
        }
    }
}

/// Generic fallbacks, each applied at most once, until the plan holds 5
/// items or the rules are exhausted
fn fallback_padding(plan: &mut Vec<Recommendation>, metrics: &WindowMetrics) {
    if plan.len() < MAX_RECOMMENDATIONS
        && metrics.water_intake.average < BOTTLE_WATER_TRIGGER
        && !has_action_containing(plan, "air")
    {
        plan.push(Recommendation {
            priority: 4,
            action: "Bawa botol air 500ml dan isi ulang 3x sehari".to_string(),
            rationale: format!(
                "Asupan air Anda {:.1} gelas/hari. Target visual (botol yang harus \
                 dihabiskan) lebih efektif daripada menghitung gelas.",
                metrics.water_intake.average
            ),
        });
    }

    if plan.len() < MAX_RECOMMENDATIONS && !has_action_containing(plan, "Catat pola") {
        plan.push(Recommendation {
            priority: 5,
            action: "Catat pola tidur, stres, dan mood di aplikasi ini setiap hari".to_string(),
            rationale: "Konsistensi pencatatan menghasilkan data yang lebih kaya untuk \
                        analisis pola dan identifikasi pemicu spesifik terhadap kondisi \
                        Anda."
                .to_string(),
        });
    }

    if plan.len() < MAX_RECOMMENDATIONS {
        plan.push(Recommendation {
            priority: 5,
            action: "Evaluasi ulang metrik setelah 7 hari menerapkan 2 rekomendasi prioritas"
                .to_string(),
            rationale: "Perubahan kebiasaan memerlukan waktu. Evaluasi mingguan memungkinkan \
                        Anda melihat dampak nyata dan menyesuaikan strategi jika diperlukan."
                .to_string(),
        });
    }
}
