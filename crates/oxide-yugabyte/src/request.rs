//! Serializable DDL requests.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::ColumnChange;
use crate::constraints::ConstraintTarget;
use crate::error::{DdlError, Result};
use crate::index::IndexOptions;
use crate::table::TableRef;

/// One DDL request, tagged by `op` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DdlRequest {
    /// Alter columns of an existing table.
    ChangeColumn {
        /// Target table.
        table: TableRef,
        /// Columns to alter, in order.
        columns: Vec<ColumnChange>,
    },
    /// Add an index.
    AddIndex {
        /// Target table.
        table: TableRef,
        /// Unquoted model table name used for the index name prefix.
        #[serde(default)]
        raw_table_name: Option<String>,
        /// Index definition.
        #[serde(flatten)]
        options: IndexOptions,
    },
    /// Defer constraint checks.
    SetDeferred {
        /// Affected constraints.
        #[serde(default)]
        constraints: ConstraintTarget,
    },
    /// Check constraints immediately.
    SetImmediate {
        /// Affected constraints.
        #[serde(default)]
        constraints: ConstraintTarget,
    },
}

impl DdlRequest {
    /// Returns the operation name as it appears in JSON.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::ChangeColumn { .. } => "change_column",
            Self::AddIndex { .. } => "add_index",
            Self::SetDeferred { .. } => "set_deferred",
            Self::SetImmediate { .. } => "set_immediate",
        }
    }
}

/// Reads a JSON array of requests from a file.
///
/// # Errors
///
/// Returns [`DdlError::Io`] when the file cannot be read and
/// [`DdlError::Parse`] when it is not a request array.
pub fn load_requests(path: &Path) -> Result<Vec<DdlRequest>> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| DdlError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
