//! Table identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A table as the host ORM hands it over.
///
/// A plain name may itself contain dots (`"public.users"`); it is quoted
/// segment by segment. A qualified reference keeps schema and name apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRef {
    /// Unqualified or dotted table name.
    Name(String),
    /// Schema-qualified table.
    Qualified {
        /// Schema name.
        schema: String,
        /// Table name.
        #[serde(rename = "table")]
        name: String,
        /// Separator placed between the quoted schema and table.
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
}

fn default_delimiter() -> String {
    ".".to_string()
}

impl TableRef {
    /// Creates a schema-qualified table reference using `.` as delimiter.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            schema: schema.into(),
            name: name.into(),
            delimiter: default_delimiter(),
        }
    }

    /// The bare table name, without schema.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Qualified { name, .. } => name,
        }
    }

    /// The schema, if the reference carries one explicitly.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Qualified { schema, .. } => Some(schema),
        }
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Qualified {
                schema,
                name,
                delimiter,
            } => write!(f, "{schema}{delimiter}{name}"),
        }
    }
}

/// Turns a table name into an index-name prefix: dots become underscores,
/// quote characters are dropped.
#[must_use]
pub fn sanitize_prefix(prefix: &str) -> String {
    prefix
        .replace('.', "_")
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect()
}
