//! Error types for DDL generation.

use std::path::PathBuf;

/// Errors that can occur while generating YugabyteDB DDL.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// The request would change a column's underlying type.
    #[error(
        "Changing the type of column '{column}' on table {table} is not supported \
         in the yugabyte dialect (requested: {requested})"
    )]
    UnsupportedTypeChange {
        /// Quoted table the change targets.
        table: String,
        /// Column name.
        column: String,
        /// Residual type clause that would have been applied.
        requested: String,
    },

    /// Deferred or immediate constraint checking was requested.
    #[error("Deferrable constraints are not supported in the yugabyte dialect (requested: {0})")]
    DeferrableConstraintsUnsupported(String),

    /// `CONCURRENTLY` was requested but the dialect does not allow it.
    #[error("Adding an index concurrently is not supported in the yugabyte dialect")]
    ConcurrentIndexUnsupported,

    /// The data type has no YugabyteDB rendering.
    #[error("Data type {0} is not supported in the yugabyte dialect")]
    UnsupportedDataType(String),

    /// An index field descriptor has neither a name nor an attribute.
    #[error("The following index field has no name: {0}")]
    UnnamedIndexField(String),

    /// An index definition without any field.
    #[error("Missing fields for index on {0}")]
    MissingIndexFields(String),

    /// A column definition string could not be interpreted.
    #[error("Malformed definition for column '{column}': {message}")]
    MalformedDefinition {
        /// Column name.
        column: String,
        /// What went wrong.
        message: String,
    },

    /// A WHERE clause descriptor cannot be rendered.
    #[error("Invalid index condition: {0}")]
    InvalidCondition(String),

    /// IO error (reading request or capability files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON file.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for DDL generation.
pub type Result<T> = std::result::Result<T, DdlError>;
