//! Error handling for NaviChat
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for NaviChat application
#[derive(Error, Debug)]
pub enum NaviChatError {
    #[error("Flow not found: {keyword}")]
    FlowNotFound { keyword: String },

    #[error("Invalid validation pattern in step {step}: {source}")]
    InvalidPattern {
        step: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid flow definition: {0}")]
    InvalidFlow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for NaviChat operations
pub type Result<T> = std::result::Result<T, NaviChatError>;

impl NaviChatError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            NaviChatError::FlowNotFound { .. } => true,
            NaviChatError::InvalidPattern { .. } => false,
            NaviChatError::InvalidFlow(_) => false,
            NaviChatError::Config(_) => false,
            NaviChatError::ConfigLoad(_) => false,
            NaviChatError::Http(_) => true,
            NaviChatError::UnexpectedStatus(_) => true,
            NaviChatError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NaviChatError::InvalidPattern { .. } => ErrorSeverity::Critical,
            NaviChatError::InvalidFlow(_) => ErrorSeverity::Critical,
            NaviChatError::Config(_) => ErrorSeverity::Critical,
            NaviChatError::ConfigLoad(_) => ErrorSeverity::Critical,
            NaviChatError::FlowNotFound { .. } => ErrorSeverity::Info,
            NaviChatError::InvalidInput(_) => ErrorSeverity::Info,
            NaviChatError::Http(_) => ErrorSeverity::Error,
            NaviChatError::UnexpectedStatus(_) => ErrorSeverity::Warning,
        }
    }

    /// Whether this error means the player typed a keyword no flow answers to
    pub fn is_not_found(&self) -> bool {
        matches!(self, NaviChatError::FlowNotFound { .. })
            || matches!(self, NaviChatError::UnexpectedStatus(404))
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = NaviChatError::FlowNotFound { keyword: "nope".to_string() };
        assert!(err.is_not_found());
        assert!(err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Info);

        assert!(NaviChatError::UnexpectedStatus(404).is_not_found());
        assert!(!NaviChatError::UnexpectedStatus(500).is_not_found());
    }

    #[test]
    fn test_startup_errors_are_critical() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = NaviChatError::InvalidPattern { step: "s1".to_string(), source };
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("s1"));

        let err = NaviChatError::Config("bad".to_string());
        assert_eq!(err.severity().to_string(), "CRITICAL");
    }
}
