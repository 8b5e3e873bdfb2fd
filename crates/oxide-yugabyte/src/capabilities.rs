//! Dialect capability table.
//!
//! The flags decide which index clauses are legal to emit and where they
//! go. They are plain data so a host can load them from configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

/// Where `USING <method>` goes in a `CREATE INDEX` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsingPosition {
    /// Index methods are not supported.
    #[default]
    Unsupported,
    /// `CREATE INDEX name USING method ON table (...)`.
    BeforeTable,
    /// `CREATE INDEX name ON table USING method (...)`.
    AfterTable,
}

/// Index-related capability flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCapabilities {
    /// Per-field `COLLATE` clauses.
    pub collate: bool,
    /// Per-field operator classes.
    pub operator: bool,
    /// Per-field prefix lengths.
    pub length: bool,
    /// `CREATE INDEX CONCURRENTLY`.
    pub concurrently: bool,
    /// Placement of `USING <method>`.
    pub using: UsingPosition,
    /// `WITH PARSER` for full-text indexes.
    pub parser: bool,
    /// Partial indexes (`WHERE ...`).
    pub where_clause: bool,
    /// Index kinds such as `FULLTEXT` or `SPATIAL`.
    pub index_type: bool,
}

impl IndexCapabilities {
    /// Index capabilities of PostgreSQL.
    #[must_use]
    pub const fn postgres() -> Self {
        Self {
            collate: false,
            operator: true,
            length: false,
            concurrently: true,
            using: UsingPosition::AfterTable,
            parser: false,
            where_clause: true,
            index_type: false,
        }
    }

    /// Index capabilities of YugabyteDB: PostgreSQL without concurrent builds.
    #[must_use]
    pub const fn yugabyte() -> Self {
        Self {
            concurrently: false,
            ..Self::postgres()
        }
    }
}

impl Default for IndexCapabilities {
    fn default() -> Self {
        Self::yugabyte()
    }
}

/// The capability table consulted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Index flags.
    pub index: IndexCapabilities,
    /// Indexes are added with `ALTER TABLE ... ADD INDEX` instead of `CREATE INDEX`.
    pub index_via_alter: bool,
}

impl Capabilities {
    /// The PostgreSQL table the Yugabyte dialect derives from.
    #[must_use]
    pub const fn postgres() -> Self {
        Self {
            index: IndexCapabilities::postgres(),
            index_via_alter: false,
        }
    }

    /// The YugabyteDB table.
    #[must_use]
    pub const fn yugabyte() -> Self {
        Self {
            index: IndexCapabilities::yugabyte(),
            index_via_alter: false,
        }
    }

    /// Parses a capability table from JSON. Missing keys keep the Yugabyte defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Serialization`] when the JSON does not describe a
    /// capability table.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a capability table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Io`] when the file cannot be read and
    /// [`DdlError::Parse`] when it is not a capability table.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| DdlError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::yugabyte()
    }
}
