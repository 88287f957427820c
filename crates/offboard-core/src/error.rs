//! Error types for the offboarding library.
//!
//! Every failure kind a caller may need to message differently has its own
//! variant: validation, template integrity, duplicate processes, and the
//! persistence family (database, not-found, filesystem, configuration).

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all offboarding operations.
#[derive(Error, Debug)]
pub enum OffboardError {
    /// Required input missing or malformed
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Task dependency graph of a template is broken
    #[error("Template '{template}' failed integrity check: {reason}")]
    TemplateIntegrity { template: String, reason: String },

    /// A person already has a process that is not completed or cancelled
    #[error(
        "Person {person_id} already has open offboarding process {existing_process_id}"
    )]
    DuplicateProcess {
        person_id: u64,
        existing_process_id: u64,
    },

    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Template with ID {id} not found")]
    TemplateNotFound { id: u64 },

    #[error("Process with ID {id} not found")]
    ProcessNotFound { id: u64 },

    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },

    #[error("Person with ID {id} not found")]
    PersonNotFound { id: u64 },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> OffboardError {
        OffboardError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OffboardError {
        OffboardError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OffboardError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Creates a template integrity error for the named template.
    pub fn integrity(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TemplateIntegrity {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the persistence collaborator.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Database { .. }
                | Self::TemplateNotFound { .. }
                | Self::ProcessNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::PersonNotFound { .. }
                | Self::FileSystem { .. }
                | Self::XdgDirectory(_)
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| OffboardError::database(message).with_source(e))
    }
}

/// Result type alias for offboarding operations
pub type Result<T> = std::result::Result<T, OffboardError>;
