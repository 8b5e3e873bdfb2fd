//! YugabyteDB DDL generation.
//!
//! `oxide-yugabyte` turns "change these columns", "add this index" and
//! constraint-mode requests into YugabyteDB SQL. YugabyteDB speaks the
//! PostgreSQL dialect with a few gaps, and the generator refuses what the
//! server cannot do instead of emitting statements it would reject:
//! - column type changes (`ALTER COLUMN ... TYPE`)
//! - `SET CONSTRAINTS ... DEFERRED | IMMEDIATE`
//! - `CREATE INDEX CONCURRENTLY`
//!
//! # Architecture
//!
//! - **Dialect** - The [`QueryGenerator`](dialect::QueryGenerator) trait and
//!   the [`YugabyteQueryGenerator`](dialect::YugabyteQueryGenerator)
//! - **Column** - Change requests and the text surgery on definition strings
//! - **Index** - Index options, field descriptors and partial-index conditions
//! - **Capabilities** - The flag table that decides which index clauses are emitted
//! - **Attribute / Data type** - Build definition strings from typed attributes
//! - **Request** - JSON-serializable requests for the `oxide-yugabyte` CLI
//!
//! # Example
//!
//! ```rust
//! use oxide_yugabyte::prelude::*;
//!
//! let generator = YugabyteQueryGenerator::new();
//! let table = TableRef::from("users");
//!
//! let attribute = AttributeDefinition::new(DataType::integer())
//!     .not_null()
//!     .default_value(DefaultValue::Integer(0));
//! let change = ColumnChange::from_attribute("age", &attribute)?.current_type("INTEGER");
//! let sql = generator.change_column_query(&table, &[change])?;
//! assert_eq!(
//!     sql,
//!     vec![
//!         "ALTER TABLE \"users\" ALTER COLUMN \"age\" SET NOT NULL",
//!         "ALTER TABLE \"users\" ALTER COLUMN \"age\" SET DEFAULT 0",
//!     ]
//! );
//!
//! let index = generator.add_index_query(&table, IndexOptions::new(["userId"]), None)?;
//! assert_eq!(index, "CREATE INDEX \"users_user_id\" ON \"users\" (\"userId\")");
//! # Ok::<(), DdlError>(())
//! ```

pub mod attribute;
pub mod capabilities;
pub mod column;
pub mod constraints;
pub mod data_type;
pub mod dialect;
pub mod error;
pub mod index;
pub mod quote;
pub mod request;
pub mod table;
pub mod where_clause;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::attribute::{AttributeDefinition, DefaultValue, ForeignKeyAction, References};
    pub use crate::capabilities::{Capabilities, IndexCapabilities, UsingPosition};
    pub use crate::column::ColumnChange;
    pub use crate::constraints::{ConstraintMode, ConstraintTarget};
    pub use crate::data_type::{DataType, FloatOptions, IntegerOptions, SizeClass};
    pub use crate::dialect::{QueryGenerator, YugabyteQueryGenerator};
    pub use crate::error::{DdlError, Result};
    pub use crate::index::{IndexColumn, IndexField, IndexKind, IndexOptions, SortOrder};
    pub use crate::request::{DdlRequest, load_requests};
    pub use crate::table::TableRef;
    pub use crate::where_clause::{ComparisonOp, SqlValue, WhereClause};
}
