//! Error types for the GeoTodo core library.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Host capability named in capability and permission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Device position (one-shot query or continuous subscription)
    Geolocation,
}

impl Capability {
    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Geolocation => "geolocation",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comprehensive error type for all GeoTodo operations.
#[derive(Error, Debug)]
pub enum GeoTodoError {
    /// The host lacks the capability, or cannot produce a value right now
    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: Capability,
        reason: String,
    },
    /// The user or OS refused access
    #[error("Permission denied for {capability}")]
    PermissionDenied { capability: Capability },
    /// No response within the configured bound
    #[error("{capability} timed out after {}ms", after.as_millis())]
    Timeout {
        capability: Capability,
        after: Duration,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Todo not found for the given ID
    #[error("Todo with ID {id} not found")]
    TodoNotFound { id: String },
    /// Place not found for the given ID
    #[error("Place with ID {id} not found")]
    PlaceNotFound { id: String },
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
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> GeoTodoError {
        GeoTodoError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> GeoTodoError {
        GeoTodoError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl GeoTodoError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Shorthand for a missing or failing host capability.
    pub fn unavailable(capability: Capability, reason: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability,
            reason: reason.into(),
        }
    }

    /// Whether this error came from a host capability rather than storage.
    pub fn is_host_error(&self) -> bool {
        matches!(
            self,
            Self::CapabilityUnavailable { .. } | Self::PermissionDenied { .. } | Self::Timeout { .. }
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
        self.map_err(|e| GeoTodoError::database(message).with_source(e))
    }
}

/// Result type alias for GeoTodo operations
pub type Result<T> = std::result::Result<T, GeoTodoError>;
