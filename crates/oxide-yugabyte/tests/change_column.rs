//! Integration tests for `change_column_query`.

use oxide_yugabyte::prelude::*;

fn users() -> TableRef {
    TableRef::from("users")
}

fn change(columns: &[ColumnChange]) -> Result<Vec<String>> {
    YugabyteQueryGenerator::new().change_column_query(&users(), columns)
}

// =============================================================================
// Nullability and defaults
// =============================================================================

#[test]
fn not_null_is_set_and_stripped() {
    let sql = change(&[ColumnChange::new("name", "VARCHAR(255) NOT NULL").current_type("VARCHAR(255)")])
        .unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"name\" SET NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"name\" DROP DEFAULT",
        ]
    );
}

#[test]
fn nullable_column_drops_constraints() {
    let sql = change(&[ColumnChange::new("bio", "TEXT").current_type("TEXT")]).unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"bio\" DROP NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"bio\" DROP DEFAULT",
        ]
    );
}

#[test]
fn default_value_keeps_quoted_text() {
    let sql = change(&[
        ColumnChange::new("motto", "VARCHAR(255) DEFAULT 'be UNIQUE'").current_type("VARCHAR(255)"),
    ])
    .unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"motto\" DROP NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"motto\" SET DEFAULT 'be UNIQUE'",
        ]
    );
}

#[test]
fn serial_columns_map_to_serial_types() {
    let attribute = AttributeDefinition::new(DataType::bigint())
        .not_null()
        .auto_increment()
        .primary_key();
    let column = ColumnChange::from_attribute("id", &attribute)
        .unwrap()
        .current_type("BIGSERIAL");
    let sql = change(&[column]).unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"id\" DROP NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"id\" DROP DEFAULT",
        ]
    );
}

// =============================================================================
// Type changes
// =============================================================================

#[test]
fn type_change_fails() {
    let err = change(&[ColumnChange::new("age", "BIGINT NOT NULL")]).unwrap_err();
    assert!(matches!(
        err,
        DdlError::UnsupportedTypeChange { ref table, ref column, ref requested }
            if table == "\"users\"" && column == "age" && requested == "BIGINT"
    ));
}

#[test]
fn type_change_against_current_type_fails() {
    let err = change(&[ColumnChange::new("age", "BIGINT").current_type("INTEGER")]).unwrap_err();
    assert!(matches!(err, DdlError::UnsupportedTypeChange { .. }));
}

#[test]
fn failure_discards_earlier_columns() {
    let result = change(&[
        ColumnChange::new("bio", "TEXT").current_type("TEXT"),
        ColumnChange::new("age", "BIGINT"),
    ]);
    assert!(result.is_err());
}

#[test]
fn columns_are_processed_in_order() {
    let sql = change(&[
        ColumnChange::new("b", "TEXT NOT NULL").current_type("TEXT"),
        ColumnChange::new("a", "TEXT NOT NULL").current_type("TEXT"),
    ])
    .unwrap();
    assert_eq!(sql.len(), 4);
    assert!(sql[0].contains("\"b\" SET NOT NULL"));
    assert!(sql[2].contains("\"a\" SET NOT NULL"));
}

// =============================================================================
// Enums
// =============================================================================

#[test]
fn enum_column_creates_type() {
    let sql = change(&[
        ColumnChange::new("status", "ENUM('active', 'it''s') NOT NULL DEFAULT 'active'")
            .current_type("enum_users_status"),
    ])
    .unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"status\" SET NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"status\" SET DEFAULT 'active'",
            "DO 'BEGIN CREATE TYPE \"public\".\"enum_users_status\" AS \
             ENUM(''active'', ''it''''s''); \
             EXCEPTION WHEN duplicate_object THEN null; END'",
        ]
    );
}

#[test]
fn enum_type_uses_table_schema() {
    let generator = YugabyteQueryGenerator::new();
    let table = TableRef::qualified("app", "users");
    let sql = generator
        .change_column_query(
            &table,
            &[ColumnChange::new("status", "ENUM('a')").current_type("enum_users_status")],
        )
        .unwrap();
    assert_eq!(
        sql[2],
        "DO 'BEGIN CREATE TYPE \"app\".\"enum_users_status\" AS ENUM(''a''); \
         EXCEPTION WHEN duplicate_object THEN null; END'"
    );
    assert!(sql[0].starts_with("ALTER TABLE \"app\".\"users\" ALTER COLUMN"));
}

#[test]
fn enum_change_without_current_type_reports_cast() {
    let err = change(&[ColumnChange::new("status", "ENUM('a', 'b')")]).unwrap_err();
    let DdlError::UnsupportedTypeChange { requested, .. } = err else {
        panic!("expected a type change error, got {err:?}");
    };
    assert_eq!(
        requested,
        "\"enum_users_status\" USING (\"status\"::\"public\".\"enum_users_status\")"
    );
}

#[test]
fn unterminated_enum_is_malformed() {
    let err = change(&[ColumnChange::new("status", "ENUM('a'")]).unwrap_err();
    assert!(matches!(err, DdlError::MalformedDefinition { ref column, .. } if column == "status"));
}

// =============================================================================
// Unique and foreign keys
// =============================================================================

#[test]
fn trailing_unique_adds_constraint() {
    let sql = change(&[ColumnChange::new("email", "VARCHAR(255) UNIQUE;").current_type("VARCHAR(255)")])
        .unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"email\" DROP NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"email\" DROP DEFAULT",
            "ALTER TABLE \"users\" ADD UNIQUE (\"email\")",
        ]
    );
}

#[test]
fn references_add_foreign_key() {
    let attribute = AttributeDefinition::new(DataType::integer())
        .not_null()
        .default_value(DefaultValue::Integer(1))
        .references(References::table("accounts").on_delete(ForeignKeyAction::SetDefault));
    let column = ColumnChange::from_attribute("account_id", &attribute).unwrap();
    let sql = change(&[column]).unwrap();
    assert_eq!(
        sql,
        vec![
            "ALTER TABLE \"users\" ALTER COLUMN \"account_id\" SET NOT NULL",
            "ALTER TABLE \"users\" ALTER COLUMN \"account_id\" SET DEFAULT 1",
            "ALTER TABLE \"users\" ADD FOREIGN KEY (\"account_id\") \
             REFERENCES \"accounts\" (\"id\") ON DELETE SET DEFAULT",
        ]
    );
}

#[test]
fn references_skip_drop_statements() {
    let sql = change(&[ColumnChange::new(
        "team_id",
        "INTEGER REFERENCES \"teams\" (\"id\");",
    )])
    .unwrap();
    assert_eq!(
        sql,
        vec!["ALTER TABLE \"users\" ADD FOREIGN KEY (\"team_id\") REFERENCES \"teams\" (\"id\")"]
    );
}
