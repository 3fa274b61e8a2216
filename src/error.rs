//! Unified error hierarchy for WellRS
//!
//! The insight engine itself never errors: insufficient data is reported
//! through sentinel values (`Option`, empty lists) as the analytics contract
//! requires. This hierarchy covers the layers around it: storage, import,
//! export, and configuration.

use thiserror::Error;

use crate::database::DatabaseError;
use crate::export::ExportError;
use crate::import::ImportError;

/// Top-level error type for all WellRS operations
#[derive(Debug, Error)]
pub enum WellnessError {
    /// Record storage errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Record import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for WellRS operations
pub type Result<T> = std::result::Result<T, WellnessError>;

impl WellnessError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WellnessError::Database(DatabaseError::NotFound(_)) => ErrorSeverity::Warning,
            WellnessError::Validation(_) => ErrorSeverity::Warning,
            WellnessError::Import(_) => ErrorSeverity::Warning,
            WellnessError::Database(_) => ErrorSeverity::Error,
            WellnessError::Export(_) => ErrorSeverity::Error,
            WellnessError::Io(_) => ErrorSeverity::Error,
            WellnessError::Configuration(_) => ErrorSeverity::Error,
            WellnessError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WellnessError::Database(DatabaseError::NotFound(id)) => {
                format!("Could not find health record: {}", id)
            }
            WellnessError::Database(DatabaseError::DuplicateDay(date)) => {
                format!("An entry for {} already exists", date)
            }
            WellnessError::Import(ImportError::ParseError { line, reason }) => {
                format!("Could not read line {} of the import file: {}", line, reason)
            }
            WellnessError::Configuration(reason) => {
                format!("Configuration problem: {}. Run `wellrs config` to inspect.", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = WellnessError::Database(DatabaseError::NotFound("abc".to_string()));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = WellnessError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = WellnessError::Database(DatabaseError::NotFound("abc".to_string()));
        assert!(err.user_message().contains("Could not find"));

        let err = WellnessError::Configuration("missing data dir".to_string());
        assert!(err.user_message().contains("wellrs config"));
    }
}
