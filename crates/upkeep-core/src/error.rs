//! Error types for the maintenance engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::TaskStatus;

/// Error type for all engine operations.
///
/// Skippable data problems (a plan without a start date, a work order with an
/// unreadable due date) are not represented here; they are logged and
/// reported in the operation's result instead.
#[derive(Error, Debug)]
pub enum UpkeepError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Maintenance plan not found for the given ID
    #[error("Maintenance plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Status change outside the pending → completed/skipped lifecycle
    #[error("Cannot move task {id} from {from} to {to}")]
    InvalidTransition {
        id: u64,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime plumbing errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> UpkeepError {
        UpkeepError::Database {
            message: self.message,
            source,
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
    pub fn with_reason(self, reason: impl Into<String>) -> UpkeepError {
        UpkeepError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl UpkeepError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed `spawn_blocking` join.
    pub(crate) fn join(source: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {source}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| UpkeepError::database(message).with_source(e))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, UpkeepError>;
