use std::io::Write;
use std::path::Path;

use super::{ExportError, WellnessReport};
use crate::models::MetricField;

/// Export the report as a human-readable text document
pub fn export_report<P: AsRef<Path>>(
    report: &WellnessReport,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;

    writeln!(file, "{:=<70}", "")?;
    writeln!(file, "WELLRS - LAPORAN WAWASAN KESEHATAN")?;
    writeln!(file, "{:=<70}", "")?;
    writeln!(file)?;
    writeln!(
        file,
        "Dibuat: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "Total catatan: {}", report.record_count)?;

    let Some(insight) = &report.insight else {
        writeln!(file)?;
        writeln!(
            file,
            "Belum ada data kesehatan yang cukup untuk dianalisis. Tambahkan catatan \
             harian terlebih dahulu."
        )?;
        return Ok(());
    };

    writeln!(file, "Periode analisis: {} hari terakhir", insight.analysed_days)?;
    writeln!(file)?;

    writeln!(file, "RINGKASAN ANALISIS")?;
    writeln!(file, "{:-<70}", "")?;
    writeln!(file, "{}", insight.summary)?;
    writeln!(file)?;

    writeln!(file, "ANALISIS RISIKO")?;
    writeln!(file, "{:-<70}", "")?;
    writeln!(
        file,
        "Level Risiko Gaya Hidup: {} (skor {})",
        insight.risk.level, insight.risk.score
    )?;
    writeln!(file, "{}", insight.risk.justification)?;
    writeln!(file)?;

    if !insight.pattern_breakdown.is_empty() {
        writeln!(file, "POLA YANG TERDETEKSI")?;
        writeln!(file, "{:-<70}", "")?;
        for observation in &insight.pattern_breakdown {
            writeln!(file, "- {}", observation)?;
        }
        writeln!(file)?;
    }

    writeln!(file, "REKOMENDASI")?;
    writeln!(file, "{:-<70}", "")?;
    for recommendation in &insight.recommendations {
        writeln!(
            file,
            "[{}] {}",
            recommendation.priority, recommendation.action
        )?;
        writeln!(file, "    {}", recommendation.rationale)?;
    }
    writeln!(file)?;

    writeln!(file, "PROYEKSI KE DEPAN")?;
    writeln!(file, "{:-<70}", "")?;
    writeln!(file, "Jika pola berlanjut:")?;
    writeln!(file, "{}", insight.future.current_trajectory)?;
    writeln!(file)?;
    writeln!(file, "Jika rekomendasi diterapkan:")?;
    writeln!(file, "{}", insight.future.improved_trajectory)?;
    writeln!(file)?;

    if !report.warnings.is_empty() {
        writeln!(file, "PERINGATAN DINI")?;
        writeln!(file, "{:-<70}", "")?;
        for warning in &report.warnings {
            writeln!(file, "{}", warning.title)?;
            writeln!(file, "  {}", warning.description)?;
            writeln!(file, "  Tindakan: {}", warning.action)?;
        }
        writeln!(file)?;
    }

    if let Some(baseline) = &report.baseline {
        writeln!(file, "PERBANDINGAN DENGAN BASELINE (7 HARI SEBELUMNYA)")?;
        writeln!(file, "{:-<70}", "")?;
        for field in MetricField::ALL {
            let comparison = baseline.get(field);
            writeln!(
                file,
                "{:<16} baseline {:>6.1} {:<6} perubahan {:>+6.1} ({:>+5.1}%) {}",
                field.label(),
                comparison.baseline,
                field.unit(),
                comparison.change,
                comparison.percent_change,
                if comparison.is_improvement {
                    "membaik"
                } else {
                    "menurun"
                }
            )?;
        }
        writeln!(file)?;
    }

    writeln!(file, "{:-<70}", "")?;
    writeln!(file, "{}", insight.disclaimer)?;

    Ok(())
}
