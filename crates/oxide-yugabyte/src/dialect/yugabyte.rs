//! YugabyteDB generator.
//!
//! YugabyteDB speaks the PostgreSQL dialect but cannot rewrite a column's
//! type in place, cannot defer constraint checks and builds indexes online
//! on its own. Those requests fail here instead of producing SQL the
//! server would reject.

use tracing::{debug, warn};

use super::QueryGenerator;
use crate::capabilities::Capabilities;
use crate::column::{
    ColumnChange, enum_clause_len, is_current_type, references_clause, split_default,
    strip_not_null, strip_unique,
};
use crate::constraints::{ConstraintMode, ConstraintTarget};
use crate::error::{DdlError, Result};
use crate::table::TableRef;

/// Query generator for YugabyteDB.
#[derive(Debug, Clone, Copy, Default)]
pub struct YugabyteQueryGenerator {
    capabilities: Capabilities,
}

impl YugabyteQueryGenerator {
    /// Creates a generator with the stock YugabyteDB capability table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capabilities: Capabilities::yugabyte(),
        }
    }

    /// Creates a generator driven by a custom capability table.
    #[must_use]
    pub const fn with_capabilities(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    fn alter_column(&self, table: &str, column: &str, action: &str) -> String {
        format!(
            "ALTER TABLE {table} ALTER COLUMN {} {action}",
            self.quote_identifier(column)
        )
    }

    fn change_column(&self, table: &TableRef, change: &ColumnChange) -> Result<Vec<String>> {
        let quoted_table = self.quote_table(table);
        let column = change.name.as_str();
        let mut statements = Vec::new();

        let mut definition = self.data_type_mapping(table, column, &change.definition)?;
        let references = definition.contains("REFERENCES");

        if let Some(residual) = strip_not_null(&definition) {
            statements.push(self.alter_column(&quoted_table, column, "SET NOT NULL"));
            definition = residual;
        } else if !references {
            statements.push(self.alter_column(&quoted_table, column, "DROP NOT NULL"));
        }

        if let Some((value, residual)) = split_default(&definition) {
            statements.push(self.alter_column(
                &quoted_table,
                column,
                &format!("SET DEFAULT {value}"),
            ));
            definition = residual;
        } else if !references {
            statements.push(self.alter_column(&quoted_table, column, "DROP DEFAULT"));
        }

        let original = change.definition.trim();
        let enum_len = enum_clause_len(column, original)?;
        let cast = enum_len.map(|len| {
            statements.push(self.enum_type_query(table, column, &original[..len]));
            let qualified = self.enum_name(table, column, true);
            if let Some(rest) = definition.strip_prefix(qualified.as_str()) {
                definition = format!("{}{rest}", self.enum_name(table, column, false));
            }
            format!("USING ({}::{qualified})", self.quote_identifier(column))
        });

        if let Some(residual) = strip_unique(&definition) {
            statements.push(format!(
                "ALTER TABLE {quoted_table} ADD UNIQUE ({})",
                self.quote_identifier(column)
            ));
            definition = residual;
        }

        if let Some(foreign_key) = references_clause(&definition) {
            statements.push(format!(
                "ALTER TABLE {quoted_table} ADD FOREIGN KEY ({}) {foreign_key}",
                self.quote_identifier(column)
            ));
        } else if !is_current_type(
            &definition,
            change.current_type.as_deref(),
            table.schema().unwrap_or_else(|| self.default_schema()),
        ) {
            let mut requested = definition;
            if let Some(cast) = cast {
                requested.push(' ');
                requested.push_str(&cast);
            }
            warn!(
                dialect = self.name(),
                table = %quoted_table,
                column,
                requested = %requested,
                "Rejected column type change"
            );
            return Err(DdlError::UnsupportedTypeChange {
                table: quoted_table,
                column: column.to_string(),
                requested,
            });
        }

        Ok(statements)
    }

    fn reject_constraint_mode(&self, mode: ConstraintMode, target: &ConstraintTarget) -> DdlError {
        let statement = mode.statement(target);
        warn!(dialect = self.name(), statement = %statement, "Rejected constraint mode change");
        DdlError::DeferrableConstraintsUnsupported(statement)
    }
}

impl QueryGenerator for YugabyteQueryGenerator {
    fn name(&self) -> &'static str {
        "yugabyte"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn change_column_query(
        &self,
        table: &TableRef,
        columns: &[ColumnChange],
    ) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for change in columns {
            let generated = self.change_column(table, change)?;
            debug!(
                dialect = self.name(),
                column = %change.name,
                statements = generated.len(),
                "Generated column DDL"
            );
            statements.extend(generated);
        }
        Ok(statements)
    }

    fn set_deferred_query(&self, target: &ConstraintTarget) -> Result<String> {
        Err(self.reject_constraint_mode(ConstraintMode::Deferred, target))
    }

    fn set_immediate_query(&self, target: &ConstraintTarget) -> Result<String> {
        Err(self.reject_constraint_mode(ConstraintMode::Immediate, target))
    }
}
