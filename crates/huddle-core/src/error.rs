//! Error types for huddle

use crate::types::{PostId, UserId};
use thiserror::Error;

/// Main error type for huddle
#[derive(Debug, Error)]
pub enum HuddleError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Post not found
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Rejected write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login or password rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller may not modify the record
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HuddleError>,
    },
}

impl HuddleError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HuddleError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error means a requested record does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            HuddleError::PostNotFound(_) | HuddleError::UserNotFound(_) => true,
            HuddleError::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// HTTP-style status code a transport should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            HuddleError::PostNotFound(_) | HuddleError::UserNotFound(_) => 404,
            HuddleError::Validation(_) | HuddleError::Conflict(_) => 400,
            HuddleError::Unauthorized(_) => 401,
            HuddleError::Forbidden(_) => 403,
            HuddleError::WithContext { source, .. } => source.status_code(),
            _ => 500,
        }
    }
}

/// Result type alias for huddle
pub type Result<T> = std::result::Result<T, HuddleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HuddleError::PostNotFound(PostId(42));
        assert_eq!(err.to_string(), "Post not found: 42");
    }

    #[test]
    fn test_error_with_context() {
        let err = HuddleError::Validation("title is empty".to_string());
        let err = err.with_context("Failed to create post");
        assert!(err.to_string().contains("Failed to create post"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_not_found_through_context() {
        let err = HuddleError::UserNotFound(UserId(7)).with_context("loading author");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert!(!HuddleError::Store("disk gone".into()).is_not_found());
    }

    #[test]
    fn test_unauthorized_status() {
        let err = HuddleError::Unauthorized("bad password".into()).with_context("posting");
        assert_eq!(err.status_code(), 401);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HuddleError = io_err.into();
        assert!(matches!(err, HuddleError::Io(_)));
        assert_eq!(err.status_code(), 500);
    }
}
