//! Unified application error types for DocShelf.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (invalid credentials, expired token, etc.).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed. Raised before any backend call is made.
    Validation,
    /// A conflict occurred (non-empty group, storage key collision, etc.).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A persistence backend call failed.
    Database,
    /// An object storage call failed.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The first step of a two-step sequence succeeded and the second failed.
    ///
    /// The backend is left in a detectable but unrepaired state: a half
    /// swapped `display_order` pair or an orphaned storage object.
    PartialFailure,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::PartialFailure => write!(f, "PARTIAL_FAILURE"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl ErrorKind {
    /// Whether this kind represents a failed call to a backend collaborator.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Database | Self::Storage | Self::PartialFailure)
    }
}

/// The unified application error used throughout DocShelf.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a partial-sequence failure, keeping the failed step as the cause.
    pub fn partial_failure(message: impl Into<String>, cause: AppError) -> Self {
        Self::with_source(ErrorKind::PartialFailure, message, cause)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The message followed by every cause in the source chain, joined by
    /// `": "`. A cause already quoted in the text so far is skipped.
    pub fn detail(&self) -> String {
        let mut detail = self.message.clone();
        let mut next = std::error::Error::source(self);
        while let Some(cause) = next {
            let text = match cause.downcast_ref::<AppError>() {
                Some(app) => app.message.clone(),
                None => cause.to_string(),
            };
            if !text.is_empty() && !detail.contains(&text) {
                detail.push_str(": ");
                detail.push_str(&text);
            }
            next = cause.source();
        }
        detail
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::validation("Group name cannot be empty");
        assert_eq!(err.to_string(), "VALIDATION: Group name cannot be empty");
    }

    #[test]
    fn test_partial_failure_keeps_cause() {
        let cause = AppError::database("connection reset");
        let err = AppError::partial_failure("swap left half applied", cause);
        assert!(err.is(ErrorKind::PartialFailure));
        let source = std::error::Error::source(&err).expect("cause");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn test_detail_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "Is a directory (os error 21)");
        let cause = AppError::with_source(ErrorKind::Database, "Failed to update group order", io);
        let err = AppError::partial_failure("group 1 now has display_order 2", cause);
        assert_eq!(
            err.detail(),
            "group 1 now has display_order 2: Failed to update group order: Is a directory (os error 21)"
        );
    }

    #[test]
    fn test_detail_skips_cause_already_in_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::from(io);
        assert_eq!(err.detail(), "I/O error: missing");
        assert_eq!(AppError::validation("bad").detail(), "bad");
    }

    #[test]
    fn test_clone_drops_source() {
        let err = AppError::partial_failure("x", AppError::storage("y"));
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::PartialFailure);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_backend_kinds() {
        assert!(ErrorKind::Database.is_backend());
        assert!(ErrorKind::PartialFailure.is_backend());
        assert!(!ErrorKind::Validation.is_backend());
    }
}
