//! Partial index conditions.

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};
use crate::quote::{escape_string, quote_identifier};

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl SqlValue {
    /// Returns the inline SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) => "false".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => escape_string(s),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
}

impl ComparisonOp {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// Condition of a partial index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhereClause {
    /// Raw SQL, emitted verbatim.
    ///
    /// **Warning**: Only use this for SQL fragments that don't contain user input.
    Raw(String),
    /// `column <op> value`.
    Compare {
        /// Column name.
        column: String,
        /// Operator.
        op: ComparisonOp,
        /// Right-hand side.
        value: SqlValue,
    },
    /// `column IS NULL`.
    IsNull(String),
    /// `column IS NOT NULL`.
    IsNotNull(String),
    /// `column IN (...)`.
    In {
        /// Column name.
        column: String,
        /// Accepted values.
        values: Vec<SqlValue>,
    },
    /// All conditions hold.
    And(Vec<WhereClause>),
    /// Any condition holds.
    Or(Vec<WhereClause>),
    /// Negation.
    Not(Box<WhereClause>),
}

impl WhereClause {
    /// `column = value`.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::Compare {
            column: column.into(),
            op: ComparisonOp::Eq,
            value: value.into(),
        }
    }

    /// `column IS NULL`.
    #[must_use]
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull(column.into())
    }

    /// `column IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull(column.into())
    }

    /// Renders the condition without the `WHERE` keyword.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidCondition`] for an empty `IN` list or an
    /// empty `AND`/`OR` group.
    pub fn to_sql(&self) -> Result<String> {
        let sql = match self {
            Self::Raw(sql) => sql.clone(),
            // NULL comparisons become IS [NOT] NULL.
            Self::Compare {
                column,
                op: ComparisonOp::Eq,
                value: SqlValue::Null,
            }
            | Self::IsNull(column) => format!("{} IS NULL", quote_identifier(column)),
            Self::Compare {
                column,
                op: ComparisonOp::Ne,
                value: SqlValue::Null,
            }
            | Self::IsNotNull(column) => format!("{} IS NOT NULL", quote_identifier(column)),
            Self::Compare { column, op, value } => format!(
                "{} {} {}",
                quote_identifier(column),
                op.as_sql(),
                value.to_sql()
            ),
            Self::In { column, values } => {
                if values.is_empty() {
                    return Err(DdlError::InvalidCondition(format!(
                        "empty IN list for column '{column}'"
                    )));
                }
                let list: Vec<String> = values.iter().map(SqlValue::to_sql).collect();
                format!("{} IN ({})", quote_identifier(column), list.join(", "))
            }
            Self::And(parts) => Self::join(parts, " AND ")?,
            Self::Or(parts) => Self::join(parts, " OR ")?,
            Self::Not(inner) => format!("NOT ({})", inner.to_sql()?),
        };
        Ok(sql)
    }

    /// Renders the full `WHERE ...` clause.
    ///
    /// # Errors
    ///
    /// Same as [`WhereClause::to_sql`].
    pub fn where_query(&self) -> Result<String> {
        Ok(format!("WHERE {}", self.to_sql()?))
    }

    fn join(parts: &[Self], separator: &str) -> Result<String> {
        if parts.is_empty() {
            return Err(DdlError::InvalidCondition(
                "empty condition group".to_string(),
            ));
        }
        let rendered = parts
            .iter()
            .map(|part| {
                let sql = part.to_sql()?;
                Ok(match part {
                    Self::And(_) | Self::Or(_) => format!("({sql})"),
                    _ => sql,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_conditions() {
        assert_eq!(
            WhereClause::eq("status", "active").where_query().unwrap(),
            "WHERE \"status\" = 'active'"
        );
        assert_eq!(
            WhereClause::is_null("deleted_at").to_sql().unwrap(),
            "\"deleted_at\" IS NULL"
        );
        assert_eq!(
            WhereClause::eq("deleted_at", SqlValue::Null).to_sql().unwrap(),
            "\"deleted_at\" IS NULL"
        );
    }

    #[test]
    fn test_nested_groups() {
        let clause = WhereClause::And(vec![
            WhereClause::is_not_null("email"),
            WhereClause::Or(vec![
                WhereClause::eq("active", true),
                WhereClause::Compare {
                    column: "score".to_string(),
                    op: ComparisonOp::Gte,
                    value: SqlValue::Int(10),
                },
            ]),
        ]);
        assert_eq!(
            clause.to_sql().unwrap(),
            "\"email\" IS NOT NULL AND (\"active\" = true OR \"score\" >= 10)"
        );
    }

    #[test]
    fn test_in_list() {
        let clause = WhereClause::In {
            column: "kind".to_string(),
            values: vec!["a".into(), "b".into()],
        };
        assert_eq!(clause.to_sql().unwrap(), "\"kind\" IN ('a', 'b')");

        let empty = WhereClause::In {
            column: "kind".to_string(),
            values: vec![],
        };
        assert!(matches!(empty.to_sql(), Err(DdlError::InvalidCondition(_))));
    }

    #[test]
    fn test_empty_group_rejected() {
        assert!(WhereClause::And(vec![]).to_sql().is_err());
    }

    #[test]
    fn test_deserialize() {
        let clause: WhereClause = serde_json::from_str(
            r#"{"compare": {"column": "status", "op": "ne", "value": "archived"}}"#,
        )
        .unwrap();
        assert_eq!(clause.to_sql().unwrap(), "\"status\" != 'archived'");
    }
}
