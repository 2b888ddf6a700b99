//! Error types for the lifecycle manager.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::{auth::Action, models::ProjectStatus};

/// Comprehensive error type for all lifecycle operations.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The backing store failed to answer or to persist a change
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// Project not found for the given ID
    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },
    /// Module not found for the given ID
    #[error("Module with ID {id} not found")]
    ModuleNotFound { id: u64 },
    /// A status string outside the enumerated set
    #[error("Invalid {field} '{value}': expected one of {expected}")]
    InvalidStatus {
        field: &'static str,
        value: String,
        expected: String,
    },
    /// The requested status change is not an edge the workflow allows
    #[error("Cannot move project {id} from {from} to {to}: {reason}")]
    InvalidTransition {
        id: u64,
        from: ProjectStatus,
        to: ProjectStatus,
        reason: String,
    },
    /// A guarded transition found its preconditions unmet
    #[error("Precondition failed for project {id}: {reason}")]
    PreconditionFailed { id: u64, reason: String },
    /// The caller is not allowed to perform the action
    #[error("Actor '{actor}' is not allowed to {action}")]
    Unauthorized { actor: String, action: Action },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of a [`LifecycleError`].
///
/// Callers translate the kind into their own response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidStatus,
    InvalidTransition,
    PreconditionFailed,
    Unauthorized,
    InvalidInput,
    StoreUnavailable,
    Internal,
}

/// Builder for creating store errors with optional context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source, from any backend.
    pub fn with_source(
        self,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> LifecycleError {
        LifecycleError::StoreUnavailable {
            message: self.message,
            source: source.into(),
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> LifecycleError {
        LifecycleError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl LifecycleError {
    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Classifies the error for callers that translate it into a response.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            LifecycleError::ProjectNotFound { .. } | LifecycleError::ModuleNotFound { .. } => {
                ErrorKind::NotFound
            }
            LifecycleError::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            LifecycleError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            LifecycleError::PreconditionFailed { .. } => ErrorKind::PreconditionFailed,
            LifecycleError::Unauthorized { .. } => ErrorKind::Unauthorized,
            LifecycleError::InvalidInput { .. } => ErrorKind::InvalidInput,
            LifecycleError::FileSystem { .. }
            | LifecycleError::XdgDirectory(_)
            | LifecycleError::Configuration { .. } => ErrorKind::Internal,
        }
    }
}

/// Specialized extension trait for store-related Results.
pub trait StoreResultExt<T> {
    /// Map SQLite errors to [`LifecycleError::StoreUnavailable`] with a
    /// message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| LifecycleError::store(message).with_source(e))
    }
}

/// Extension trait for wrapping arbitrary errors as configuration errors.
pub trait ResultExt<T> {
    /// Add context to any error type, converting to LifecycleError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| LifecycleError::Configuration {
            message: format!("{context}: {e}"),
        })
    }
}

/// Result type alias for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_kind_classification() {
        let not_found = LifecycleError::ProjectNotFound { id: 7 };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let precondition = LifecycleError::PreconditionFailed {
            id: 7,
            reason: "payment not received".to_string(),
        };
        assert_eq!(precondition.kind(), ErrorKind::PreconditionFailed);

        let store = LifecycleError::store("boom").with_source(rusqlite::Error::InvalidQuery);
        assert_eq!(store.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn test_store_error_from_any_backend() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "replica did not answer");
        let err = LifecycleError::store("Failed to load project").with_source(io);
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
        assert_eq!(err.to_string(), "Store unavailable: Failed to load project");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("replica did not answer"));

        let err = LifecycleError::store("Failed to connect").with_source("connection refused");
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn test_messages_are_human_readable() {
        let err = LifecycleError::invalid_input("name").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );

        let err = LifecycleError::InvalidTransition {
            id: 3,
            from: ProjectStatus::Active,
            to: ProjectStatus::ClosedSuccessfully,
            reason: "use close".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot move project 3 from ACTIVE to CLOSED_SUCCESSFULLY: use close"
        );
    }
}
