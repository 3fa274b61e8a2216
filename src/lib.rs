// Library interface for the WellRS modules
// Keeps the insight engine usable as a plain library component, with the
// CLI binary as one consumer among the integration tests and benches.

pub mod baseline;
pub mod chat;
pub mod concern;
pub mod config;
pub mod correlation;
pub mod database;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod insight;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod narrative;
pub mod projection;
pub mod recommendation;
pub mod risk;
pub mod warning;
pub mod window;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{Result, WellnessError};
pub use insight::{AnalysisThresholds, Insight, InsightEngine, DISCLAIMER};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use models::{HealthRecord, MetricField, Mood};
pub use recommendation::Recommendation;
pub use risk::{RiskAssessment, RiskLevel};
pub use warning::{Warning, WarningKind, WarningSeverity};
