//! Terminal rendering
//!
//! Table and styled-text rendering for the CLI. Everything returns plain
//! `String`s so the command layer decides where they go.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::baseline::BaselineComparison;
use crate::insight::Insight;
use crate::models::{HealthRecord, MetricField};
use crate::risk::RiskLevel;
use crate::warning::{Warning, WarningSeverity};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Tanggal")]
    date: String,
    #[tabled(rename = "Jantung (BPM)")]
    heart_rate: String,
    #[tabled(rename = "Tidur (jam)")]
    sleep: String,
    #[tabled(rename = "Air (gelas)")]
    water: String,
    #[tabled(rename = "Stres (1-10)")]
    stress: String,
    #[tabled(rename = "Aktivitas (menit)")]
    activity: String,
    #[tabled(rename = "Mood")]
    mood: String,
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Records as a terminal table, newest first as handed in
pub fn records_table(records: &[HealthRecord]) -> String {
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            date: r.recorded_at.format("%Y-%m-%d").to_string(),
            heart_rate: cell(r.heart_rate),
            sleep: cell(r.sleep_duration),
            water: cell(r.water_intake),
            stress: cell(r.stress_level),
            activity: cell(r.activity_level),
            mood: r.mood.map(|m| m.label().to_string()).unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

fn risk_label(level: RiskLevel) -> colored::ColoredString {
    match level {
        RiskLevel::Low => level.to_string().green().bold(),
        RiskLevel::Moderate => level.to_string().yellow().bold(),
        RiskLevel::High => level.to_string().red().bold(),
    }
}

/// Full insight rendered for the terminal
pub fn render_insight(insight: &Insight) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        format!("Wawasan Kesehatan ({} hari terakhir)", insight.analysed_days)
            .cyan()
            .bold()
    ));
    out.push_str(&format!("\n{}\n", insight.summary));

    out.push_str(&format!(
        "\n{} {} (skor {})\n",
        "Risiko:".bold(),
        risk_label(insight.risk.level),
        insight.risk.score
    ));
    out.push_str(&format!("{}\n", insight.risk.justification));

    if !insight.pattern_breakdown.is_empty() {
        out.push_str(&format!("\n{}\n", "Pola yang terdeteksi:".bold()));
        for observation in &insight.pattern_breakdown {
            out.push_str(&format!("  • {}\n", observation));
        }
    }

    out.push_str(&format!("\n{}\n", "Rekomendasi:".bold()));
    for recommendation in &insight.recommendations {
        out.push_str(&format!(
            "  {} {}\n",
            format!("[{}]", recommendation.priority).magenta(),
            recommendation.action.bold()
        ));
        out.push_str(&format!("      {}\n", recommendation.rationale.dimmed()));
    }

    out.push_str(&format!("\n{}\n", "Proyeksi:".bold()));
    out.push_str(&format!(
        "  {} {}\n",
        "Jika berlanjut:".yellow(),
        insight.future.current_trajectory
    ));
    out.push_str(&format!(
        "  {} {}\n",
        "Jika diperbaiki:".green(),
        insight.future.improved_trajectory
    ));

    out.push_str(&format!("\n{}\n", insight.disclaimer.italic().dimmed()));
    out
}

/// Acute warnings rendered for the terminal
pub fn render_warnings(warnings: &[Warning]) -> String {
    if warnings.is_empty() {
        return format!(
            "{}\n",
            "Tidak ada peringatan akut dalam 3 hari terakhir.".green()
        );
    }

    let mut out = String::new();
    for warning in warnings {
        let title = match warning.severity {
            WarningSeverity::High => warning.title.red().bold(),
            WarningSeverity::Medium => warning.title.yellow().bold(),
        };
        out.push_str(&format!("{}\n", title));
        out.push_str(&format!("  {}\n", warning.description));
        out.push_str(&format!("  {} {}\n", "Tindakan:".bold(), warning.action));
    }
    out
}

/// Baseline comparison rendered for the terminal
pub fn render_baseline(baseline: &BaselineComparison) -> String {
    let mut out = format!("{}\n", "Perbandingan dengan 7 hari sebelumnya:".bold());

    for field in MetricField::ALL {
        let comparison = baseline.get(field);
        let direction = if comparison.is_improvement {
            "membaik".green()
        } else {
            "menurun".red()
        };
        out.push_str(&format!(
            "  {:<16} baseline {:>6.1} {:<6} perubahan {:>+6.1} ({:>+5.1}%) {}\n",
            field.label(),
            comparison.baseline,
            field.unit(),
            comparison.change,
            comparison.percent_change,
            direction
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightEngine;
    use chrono::{Duration, Utc};

    fn history(days: usize) -> Vec<HealthRecord> {
        (0..days)
            .map(|i| {
                let mut r = HealthRecord::new(Utc::now() - Duration::days(i as i64));
                r.sleep_duration = Some(7.5);
                r.stress_level = Some(3);
                r.activity_level = Some(35);
                r.water_intake = Some(8);
                r.heart_rate = Some(70.0);
                r
            })
            .collect()
    }

    #[test]
    fn test_records_table_shows_missing_as_dash() {
        let record = HealthRecord::new(Utc::now());
        let table = records_table(&[record]);
        assert!(table.contains("Tanggal"));
        assert!(table.contains('-'));
    }

    #[test]
    fn test_render_insight_contains_sections() {
        let insight = InsightEngine::new().generate_insight(&history(7)).unwrap();
        let rendered = render_insight(&insight);
        assert!(rendered.contains("Rekomendasi"));
        assert!(rendered.contains("Proyeksi"));
        assert!(rendered.contains("bukan diagnosis medis"));
    }

    #[test]
    fn test_render_warnings_handles_empty() {
        let rendered = render_warnings(&[]);
        assert!(rendered.contains("Tidak ada peringatan"));
    }
}
