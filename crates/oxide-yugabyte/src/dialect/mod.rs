//! Dialect query generators.
//!
//! A generator turns change requests into dialect SQL. The provided
//! methods of [`QueryGenerator`] carry the PostgreSQL-family behaviour
//! (quoting, enum naming, type mapping, capability-driven index DDL);
//! implementors supply the operations their database handles differently.

mod yugabyte;

pub use yugabyte::YugabyteQueryGenerator;

use tracing::{debug, warn};

use crate::capabilities::{Capabilities, UsingPosition};
use crate::column::{ColumnChange, enum_clause_len, remove_first};
use crate::constraints::ConstraintTarget;
use crate::error::{DdlError, Result};
use crate::index::{IndexColumn, IndexField, IndexOptions};
use crate::quote::{escape_string, quote_identifier, quote_identifiers, quote_table};
use crate::request::DdlRequest;
use crate::table::{TableRef, sanitize_prefix};
use crate::where_clause::WhereClause;

/// Trait for database-specific DDL generation.
pub trait QueryGenerator: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the capability table driving clause emission.
    fn capabilities(&self) -> &Capabilities;

    /// Schema assumed for tables that do not name one.
    #[must_use]
    fn default_schema(&self) -> &str {
        "public"
    }

    /// Generates the statements altering the given columns.
    ///
    /// # Errors
    ///
    /// Returns an error when a change asks for something the dialect cannot
    /// express, or when a definition carries a malformed `ENUM(...)` clause.
    fn change_column_query(
        &self,
        table: &TableRef,
        columns: &[ColumnChange],
    ) -> Result<Vec<String>>;

    /// Generates `SET CONSTRAINTS ... DEFERRED`.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::DeferrableConstraintsUnsupported`] when the
    /// dialect has no deferrable constraints.
    fn set_deferred_query(&self, target: &ConstraintTarget) -> Result<String>;

    /// Generates `SET CONSTRAINTS ... IMMEDIATE`.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::DeferrableConstraintsUnsupported`] when the
    /// dialect has no deferrable constraints.
    fn set_immediate_query(&self, target: &ConstraintTarget) -> Result<String>;

    /// Quote an identifier (column, index, type name).
    #[must_use]
    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name)
    }

    /// Quote a possibly dotted identifier segment by segment.
    #[must_use]
    fn quote_identifiers(&self, name: &str) -> String {
        quote_identifiers(name)
    }

    /// Quote a table reference.
    #[must_use]
    fn quote_table(&self, table: &TableRef) -> String {
        quote_table(table)
    }

    /// Name of the type backing an enum column: `"enum_<table>_<column>"`,
    /// prefixed with the quoted schema when `with_schema` is set.
    #[must_use]
    fn enum_name(&self, table: &TableRef, column: &str, with_schema: bool) -> String {
        let name = format!(
            "\"enum_{}_{column}\"",
            table.table_name().replace('"', "")
        );
        if !with_schema {
            return name;
        }
        let (schema, delimiter) = match table {
            TableRef::Name(_) => (self.default_schema(), "."),
            TableRef::Qualified {
                schema, delimiter, ..
            } => (schema.as_str(), delimiter.as_str()),
        };
        format!("{}{delimiter}{name}", self.quote_identifier(schema))
    }

    /// `DO` block creating the enum type, ignoring `duplicate_object`.
    ///
    /// `values` is the `ENUM(...)` clause of the definition.
    #[must_use]
    fn enum_type_query(&self, table: &TableRef, column: &str, values: &str) -> String {
        let body = format!(
            "BEGIN CREATE TYPE {} AS {values}; EXCEPTION WHEN duplicate_object THEN null; END",
            self.enum_name(table, column, true)
        );
        format!("DO {}", escape_string(&body))
    }

    /// Normalizes a definition before column surgery.
    ///
    /// Drops `PRIMARY KEY`, turns `SERIAL` into the serial type matching
    /// the integer width (dropping `NOT NULL`), and replaces a leading
    /// `ENUM(...)` with the qualified enum type name. Whitespace inside
    /// the definition, quoted literals included, is kept as written.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::MalformedDefinition`] when a leading `ENUM(`
    /// clause is never closed.
    fn data_type_mapping(
        &self,
        table: &TableRef,
        column: &str,
        definition: &str,
    ) -> Result<String> {
        let mut mapped = remove_first(definition, "PRIMARY KEY")
            .unwrap_or_else(|| definition.trim().to_string());

        if mapped.contains("SERIAL") {
            let (serial, width) = if mapped.contains("BIGINT") {
                ("BIGSERIAL", "BIGINT")
            } else if mapped.contains("SMALLINT") {
                ("SMALLSERIAL", "SMALLINT")
            } else {
                ("SERIAL", "INTEGER")
            };
            mapped = mapped.replacen("SERIAL", serial, 1);
            for token in [width, "NOT NULL"] {
                if let Some(stripped) = remove_first(&mapped, token) {
                    mapped = stripped;
                }
            }
        }

        Ok(match enum_clause_len(column, &mapped)? {
            Some(len) => format!(
                "{}{}",
                self.enum_name(table, column, true),
                &mapped[len..]
            ),
            None => mapped,
        })
    }

    /// Renders one index field according to the capability flags.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnnamedIndexField`] when a column descriptor has
    /// neither `name` nor `attribute`.
    fn index_field_sql(&self, field: &IndexField, options: &IndexOptions) -> Result<String> {
        let column = match field {
            IndexField::Raw { raw } => return Ok(raw.clone()),
            IndexField::Name(name) => IndexColumn::new(name.as_str()),
            IndexField::Column(column) => column.clone(),
        };
        let Some(name) = column.column_name() else {
            return Err(DdlError::UnnamedIndexField(format!("{column:?}")));
        };

        let caps = &self.capabilities().index;
        let mut sql = self.quote_identifier(name);
        if let Some(collate) = column.collate.as_ref().filter(|_| caps.collate) {
            sql.push_str(&format!(" COLLATE {}", self.quote_identifier(collate)));
        }
        if let Some(operator) = column
            .operator
            .as_ref()
            .or(options.operator.as_ref())
            .filter(|_| caps.operator)
        {
            sql.push(' ');
            sql.push_str(operator);
        }
        if let Some(length) = column.length.filter(|len| caps.length && *len > 0) {
            sql.push_str(&format!("({length})"));
        }
        if let Some(order) = column.order {
            sql.push(' ');
            sql.push_str(order.as_sql());
        }
        Ok(sql)
    }

    /// Generates the statement adding an index.
    ///
    /// `raw_table_name` is the unquoted table name the host knows the model
    /// by; it seeds the index name prefix when `options.prefix` is unset.
    /// Without either, the bare table name is used, never the schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the options have no fields, when a concurrent
    /// build is requested and unsupported, or when a field or the partial
    /// index condition cannot be rendered.
    fn add_index_query(
        &self,
        table: &TableRef,
        options: IndexOptions,
        raw_table_name: Option<&str>,
    ) -> Result<String> {
        let caps = self.capabilities();
        let table_label = table.to_string();
        let mut options = options.conform(&table_label)?;

        if options.concurrently && !caps.index.concurrently {
            warn!(
                dialect = self.name(),
                table = %table_label,
                "Rejected concurrent index build"
            );
            return Err(DdlError::ConcurrentIndexUnsupported);
        }
        if !caps.index.index_type {
            options.kind = None;
        }

        let fields = options
            .fields
            .iter()
            .map(|field| self.index_field_sql(field, &options))
            .collect::<Result<Vec<_>>>()?;

        let prefix = sanitize_prefix(
            options
                .prefix
                .as_deref()
                .or(raw_table_name)
                .unwrap_or(table.table_name()),
        );
        let name = options.resolved_name(&prefix)?;
        let where_sql = options
            .where_clause
            .as_ref()
            .filter(|_| caps.index.where_clause)
            .map(WhereClause::where_query)
            .transpose()?;

        let quoted_table = self.quote_table(table);
        let concurrently = options.concurrently.then_some("CONCURRENTLY".to_string());
        let using = options.using.as_ref().map(|method| format!("USING {method}"));

        let mut parts: Vec<Option<String>> = if caps.index_via_alter {
            vec![
                Some("ALTER TABLE".to_string()),
                Some(quoted_table.clone()),
                concurrently.clone(),
                Some("ADD".to_string()),
            ]
        } else {
            vec![Some("CREATE".to_string())]
        };
        parts.extend([
            options.unique.then_some("UNIQUE".to_string()),
            options.kind.map(|kind| kind.as_sql().to_string()),
            Some("INDEX".to_string()),
            concurrently.filter(|_| !caps.index_via_alter),
            Some(self.quote_identifiers(&name)),
            using
                .clone()
                .filter(|_| caps.index.using == UsingPosition::BeforeTable),
            (!caps.index_via_alter).then(|| format!("ON {quoted_table}")),
            using.filter(|_| caps.index.using == UsingPosition::AfterTable),
            Some(format!("({})", fields.join(", "))),
            options
                .parser
                .as_ref()
                .filter(|_| caps.index.parser)
                .map(|parser| format!("WITH PARSER {parser}")),
            where_sql,
        ]);

        let sql = parts
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(dialect = self.name(), index = %name, sql = %sql, "Generated index DDL");
        Ok(sql)
    }

    /// Dispatches a request to the matching builder.
    ///
    /// # Errors
    ///
    /// Returns whatever error the matching builder returns.
    fn generate(&self, request: &DdlRequest) -> Result<Vec<String>> {
        match request {
            DdlRequest::ChangeColumn { table, columns } => {
                self.change_column_query(table, columns)
            }
            DdlRequest::AddIndex {
                table,
                raw_table_name,
                options,
            } => Ok(vec![self.add_index_query(
                table,
                options.clone(),
                raw_table_name.as_deref(),
            )?]),
            DdlRequest::SetDeferred { constraints } => {
                Ok(vec![self.set_deferred_query(constraints)?])
            }
            DdlRequest::SetImmediate { constraints } => {
                Ok(vec![self.set_immediate_query(constraints)?])
            }
        }
    }

    /// Generates the statements for a batch of requests, in order.
    ///
    /// Nothing is returned unless every request succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any request.
    fn generate_all(&self, requests: &[DdlRequest]) -> Result<Vec<String>> {
        let batches = requests
            .iter()
            .map(|request| {
                debug!(dialect = self.name(), op = request.op(), "Generating request");
                self.generate(request)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(batches.into_iter().flatten().collect())
    }
}
