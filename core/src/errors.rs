//! Error types for EchoAPI core operations

use crate::schema::FieldError;
use thiserror::Error;

/// Main error type for EchoAPI core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// One or more inputs failed schema validation. Every offending field
    /// is listed, not only the first.
    #[error("Request validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Rule(#[from] RuleViolation),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Business-rule failures. The display text is the exact message returned
/// to the client.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,

    #[error("Username can only contain letters, numbers, underscores, and hyphens")]
    UsernameCharset,

    #[error("Report ID must be positive")]
    NonPositiveReportId,
}

/// Errors related to presentation adapters
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Server startup failed: {0}")]
    StartupFailed(String),

    #[error("Server shutdown failed: {0}")]
    ShutdownFailed(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
