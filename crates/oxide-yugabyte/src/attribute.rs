//! Structured column attributes.
//!
//! The column builder consumes definition strings. `AttributeDefinition`
//! produces those strings in the order the host ORM serializes them:
//! type, `NOT NULL`, `SERIAL`, `DEFAULT`, `UNIQUE`, `PRIMARY KEY`,
//! `REFERENCES`.

use serde::{Deserialize, Serialize};

use crate::data_type::DataType;
use crate::error::Result;
use crate::quote::{escape_string, quote_identifier, quote_table};
use crate::table::TableRef;

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of this default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => escape_string(s),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// Foreign key action (ON DELETE, ON UPDATE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForeignKeyAction {
    /// No action (error if referenced row is deleted/updated).
    #[default]
    NoAction,
    /// Restrict (same as `NoAction` but checked immediately).
    Restrict,
    /// Cascade the delete/update to referencing rows.
    Cascade,
    /// Set the foreign key column to NULL.
    SetNull,
    /// Set the foreign key column to its default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of this action.
    #[must_use]
    pub const fn to_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References {
    /// Referenced table.
    pub table: TableRef,
    /// Referenced column, `id` when not given.
    pub key: Option<String>,
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
}

impl References {
    /// References `table(id)`.
    #[must_use]
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            key: None,
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the referenced column.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!(
            "REFERENCES {} ({})",
            quote_table(&self.table),
            quote_identifier(self.key.as_deref().unwrap_or("id"))
        );
        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.to_sql());
        }
        if let Some(action) = self.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.to_sql());
        }
        sql
    }
}

/// Column attributes as the ORM describes them.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    /// Column type.
    pub data_type: DataType,
    /// Whether the column allows NULL values.
    pub allow_null: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Whether the column has a UNIQUE constraint.
    pub unique: bool,
    /// Whether the column is the primary key.
    pub primary_key: bool,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Foreign key target.
    pub references: Option<References>,
}

impl AttributeDefinition {
    /// Creates a nullable attribute of the given type.
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            allow_null: true,
            default: None,
            unique: false,
            primary_key: false,
            auto_increment: false,
            references: None,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the column as unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Adds a foreign key.
    #[must_use]
    pub fn references(mut self, references: References) -> Self {
        self.references = Some(references);
        self
    }

    /// Serializes the attribute into a definition string.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnsupportedDataType`](crate::error::DdlError::UnsupportedDataType)
    /// when the type has no YugabyteDB rendering.
    pub fn to_definition(&self) -> Result<String> {
        let mut sql = self.data_type.to_sql()?;

        if !self.allow_null {
            sql.push_str(" NOT NULL");
        }
        if self.auto_increment {
            sql.push_str(" SERIAL");
        }
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if let Some(ref references) = self.references {
            sql.push(' ');
            sql.push_str(&references.to_sql());
        }

        Ok(sql)
    }
}
