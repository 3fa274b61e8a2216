//! Insight engine facade
//!
//! Wires the pipeline stages together: window selection, aggregation,
//! trend analysis, correlation detection, concern identification, risk
//! scoring, and the narrative/recommendation/projection composers. The
//! engine holds only its threshold configuration; every operation is a pure
//! function of the record sequence it is handed, so repeated calls on
//! unchanged input produce identical output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::{compare_to_baseline, BaselineComparison, DEFAULT_BASELINE_MIN_RECORDS};
use crate::chat;
use crate::concern::{identify_primary_concern, ConcernThresholds};
use crate::correlation::{detect_correlations, CorrelationThresholds};
use crate::metrics::{MetricTrends, TrendThresholds, WindowMetrics};
use crate::models::HealthRecord;
use crate::narrative::{compose_summary, pattern_observations, SummaryInputs};
use crate::projection::{build_projection, Projection};
use crate::recommendation::{plan_recommendations, Recommendation};
use crate::risk::{assess_risk, RiskAssessment, RiskThresholds};
use crate::warning::{detect_warnings, Warning, WarningThresholds};
use crate::window::AnalysisWindow;

/// Disclaimer attached to every insight
pub const DISCLAIMER: &str =
    "Analisis ini bersifat informatif berdasarkan data Anda, bukan diagnosis medis.";

/// All engine thresholds in one overridable bundle
///
/// The values are fixed heuristics carried over from the rule system, not
/// clinically derived. The risk and concern groups intentionally keep their
/// separate, overlapping scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisThresholds {
    /// Total records required before baseline comparison is available
    pub baseline_min_records: usize,

    pub trend: TrendThresholds,
    pub concern: ConcernThresholds,
    pub risk: RiskThresholds,
    pub correlation: CorrelationThresholds,
    pub warning: WarningThresholds,
}

impl AnalysisThresholds {
    pub fn new() -> Self {
        AnalysisThresholds {
            baseline_min_records: DEFAULT_BASELINE_MIN_RECORDS,
            trend: TrendThresholds::default(),
            concern: ConcernThresholds::default(),
            risk: RiskThresholds::default(),
            correlation: CorrelationThresholds::default(),
            warning: WarningThresholds::default(),
        }
    }
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// The full result of one engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Narrative summary selected by the composer rules
    pub summary: String,

    /// Composite risk classification with justification
    pub risk: RiskAssessment,

    /// Ordered observation strings about the analysed window
    pub pattern_breakdown: Vec<String>,

    /// Prioritized action plan (1 to 5 items)
    pub recommendations: Vec<Recommendation>,

    /// Status-quo and improved forward projections
    pub future: Projection,

    /// Non-diagnosis disclaimer
    pub disclaimer: String,

    /// Number of records actually analysed
    pub analysed_days: usize,
}

/// Stateless analysis engine parameterized only by its thresholds
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    thresholds: AnalysisThresholds,
}

impl InsightEngine {
    /// Engine with the built-in thresholds
    pub fn new() -> Self {
        InsightEngine {
            thresholds: AnalysisThresholds::new(),
        }
    }

    /// Engine with custom thresholds (typically from the config file)
    pub fn with_thresholds(thresholds: AnalysisThresholds) -> Self {
        InsightEngine { thresholds }
    }

    pub fn thresholds(&self) -> &AnalysisThresholds {
        &self.thresholds
    }

    /// Run the full pipeline over a newest-first record sequence.
    ///
    /// Returns `None` for an empty sequence; that is the "insufficient
    /// data" sentinel, not an error.
    pub fn generate_insight(&self, newest_first: &[HealthRecord]) -> Option<Insight> {
        let window = AnalysisWindow::select(newest_first)?;
        debug!(records = newest_first.len(), window = window.len(), "generating insight");

        let t = &self.thresholds;
        let metrics = WindowMetrics::from_window(&window);
        let trends = MetricTrends::from_window(&window, &t.trend);
        let correlations = detect_correlations(&window, &t.correlation);
        let concern = identify_primary_concern(&metrics, &trends, &t.concern, &t.trend);

        let summary = compose_summary(&SummaryInputs {
            metrics: &metrics,
            trends: &trends,
            correlations: &correlations,
            concern: concern.as_ref(),
            days: window.len(),
        });
        let risk = assess_risk(&metrics, &trends, &correlations, concern.as_ref(), &t.risk);
        let pattern_breakdown = pattern_observations(&window, &trends, &correlations);
        let recommendations = plan_recommendations(&metrics, &correlations, concern.as_ref());
        let future = build_projection(&metrics, &trends, concern.as_ref());

        Some(Insight {
            summary,
            risk,
            pattern_breakdown,
            recommendations,
            future,
            disclaimer: DISCLAIMER.to_string(),
            analysed_days: window.len(),
        })
    }

    /// Scan the last three records for acute conditions
    pub fn detect_warnings(&self, newest_first: &[HealthRecord]) -> Vec<Warning> {
        detect_warnings(newest_first, &self.thresholds.warning)
    }

    /// Answer a free-text question from the same primitives
    pub fn answer_question(&self, question: &str, newest_first: &[HealthRecord]) -> String {
        chat::answer_question(question, newest_first, &self.thresholds)
    }

    /// Compare the current window against the older baseline window, when
    /// enough history exists
    pub fn compare_to_baseline(
        &self,
        newest_first: &[HealthRecord],
    ) -> Option<BaselineComparison> {
        let window = AnalysisWindow::select(newest_first)?;
        let metrics = WindowMetrics::from_window(&window);
        compare_to_baseline(newest_first, &metrics, self.thresholds.baseline_min_records)
    }
}
