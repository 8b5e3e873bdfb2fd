//! Index options as the host ORM passes them to `add_index_query`.

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};
use crate::quote::underscore;
use crate::where_clause::WhereClause;

/// Sort direction of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Index kind keyword placed before `INDEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexKind {
    /// Folded into the uniqueness flag.
    Unique,
    /// Full-text index.
    Fulltext,
    /// Spatial index.
    Spatial,
}

impl IndexKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Unique => "UNIQUE",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
        }
    }
}

/// Descriptor of one indexed column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexColumn {
    /// Column name.
    pub name: Option<String>,
    /// Model attribute name; takes precedence over `name`.
    pub attribute: Option<String>,
    /// Collation.
    pub collate: Option<String>,
    /// Operator class.
    pub operator: Option<String>,
    /// Prefix length.
    pub length: Option<u32>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

impl IndexColumn {
    /// Creates a descriptor for the named column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the collation.
    #[must_use]
    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = Some(collate.into());
        self
    }

    /// Sets the operator class.
    #[must_use]
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Sets the prefix length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// The effective column name: the attribute if set, else the name.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        self.attribute.as_deref().or(self.name.as_deref())
    }
}

/// One entry of an index field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexField {
    /// Shorthand for a column descriptor with just a name.
    Name(String),
    /// SQL expression emitted verbatim (functional index).
    Raw {
        /// The expression.
        raw: String,
    },
    /// Full column descriptor.
    Column(IndexColumn),
}

impl IndexField {
    /// Creates a raw expression field.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw { raw: sql.into() }
    }

    /// The column name this field indexes, if any.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Raw { .. } => None,
            Self::Column(column) => column.column_name(),
        }
    }
}

impl From<&str> for IndexField {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<IndexColumn> for IndexField {
    fn from(column: IndexColumn) -> Self {
        Self::Column(column)
    }
}

/// Options for `add_index_query`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Indexed fields, in order.
    pub fields: Vec<IndexField>,
    /// Index name; derived from the prefix and fields when absent.
    pub name: Option<String>,
    /// Prefix for the derived name; the table name when absent.
    pub prefix: Option<String>,
    /// Unique index.
    pub unique: bool,
    /// Index kind.
    #[serde(rename = "type")]
    pub kind: Option<IndexKind>,
    /// Index method (`BTREE`, `GIN`, ...).
    pub using: Option<String>,
    /// Operator class applied to every field without its own.
    pub operator: Option<String>,
    /// Full-text parser.
    pub parser: Option<String>,
    /// Partial index condition.
    #[serde(rename = "where")]
    pub where_clause: Option<WhereClause>,
    /// Build the index without locking writes.
    pub concurrently: bool,
}

impl IndexOptions {
    /// Creates options for the given fields.
    #[must_use]
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<IndexField>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the index name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the name prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the index kind.
    #[must_use]
    pub const fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the index method.
    #[must_use]
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.using = Some(method.into());
        self
    }

    /// Sets the default operator class.
    #[must_use]
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Sets the full-text parser.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    /// Sets the partial index condition.
    #[must_use]
    pub fn where_clause(mut self, condition: WhereClause) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Requests a concurrent build.
    #[must_use]
    pub const fn concurrently(mut self) -> Self {
        self.concurrently = true;
        self
    }

    /// Validates the field list and folds a `UNIQUE` kind into the flag.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::MissingIndexFields`] when no field is given.
    pub fn conform(mut self, table: &str) -> Result<Self> {
        if self.fields.is_empty() {
            return Err(DdlError::MissingIndexFields(table.to_string()));
        }
        if self.kind == Some(IndexKind::Unique) {
            self.unique = true;
            self.kind = None;
        }
        Ok(self)
    }

    /// Returns the explicit name or derives `<prefix>_<field>_<field>` in snake case.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnnamedIndexField`] when no name is given and no
    /// field names a column.
    pub fn resolved_name(&self, prefix: &str) -> Result<String> {
        if let Some(ref name) = self.name {
            return Ok(name.clone());
        }
        let names: Vec<&str> = self
            .fields
            .iter()
            .filter_map(IndexField::column_name)
            .collect();
        if names.is_empty() {
            let field = self
                .fields
                .first()
                .map_or_else(|| "[]".to_string(), |f| format!("{f:?}"));
            return Err(DdlError::UnnamedIndexField(field));
        }
        Ok(underscore(&format!("{prefix}_{}", names.join("_"))))
    }
}
