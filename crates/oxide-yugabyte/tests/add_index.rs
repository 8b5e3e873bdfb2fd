//! Integration tests for `add_index_query`.

use oxide_yugabyte::prelude::*;

fn add_index(table: &str, options: IndexOptions) -> Result<String> {
    YugabyteQueryGenerator::new().add_index_query(&TableRef::from(table), options, None)
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn name_is_derived_from_table_and_fields() {
    assert_eq!(
        add_index("users", IndexOptions::new(["email"])).unwrap(),
        "CREATE INDEX \"users_email\" ON \"users\" (\"email\")"
    );
}

#[test]
fn dotted_table_name_becomes_prefix() {
    assert_eq!(
        add_index("public.users", IndexOptions::new(["userId", "createdAt"])).unwrap(),
        "CREATE INDEX \"public_users_user_id_created_at\" ON \"public\".\"users\" \
         (\"userId\", \"createdAt\")"
    );
}

#[test]
fn raw_table_name_and_prefix_override() {
    let generator = YugabyteQueryGenerator::new();
    let table = TableRef::qualified("app", "users");

    let sql = generator
        .add_index_query(&table, IndexOptions::new(["email"]), Some("Users"))
        .unwrap();
    assert_eq!(sql, "CREATE INDEX \"users_email\" ON \"app\".\"users\" (\"email\")");

    let sql = generator
        .add_index_query(&table, IndexOptions::new(["email"]).prefix("acct"), Some("Users"))
        .unwrap();
    assert_eq!(sql, "CREATE INDEX \"acct_email\" ON \"app\".\"users\" (\"email\")");

    let sql = generator
        .add_index_query(&table, IndexOptions::new(["email"]), None)
        .unwrap();
    assert_eq!(sql, "CREATE INDEX \"users_email\" ON \"app\".\"users\" (\"email\")");
}

#[test]
fn explicit_name_is_quoted_per_segment() {
    assert_eq!(
        add_index("users", IndexOptions::new(["email"]).name("app.users_email")).unwrap(),
        "CREATE INDEX \"app\".\"users_email\" ON \"users\" (\"email\")"
    );
}

// =============================================================================
// Clauses
// =============================================================================

#[test]
fn unique_method_operator_and_where() {
    let options = IndexOptions::new(["tags"])
        .kind(IndexKind::Unique)
        .using("GIN")
        .operator("jsonb_path_ops")
        .where_clause(WhereClause::is_not_null("tags"));
    assert_eq!(
        add_index("users", options).unwrap(),
        "CREATE UNIQUE INDEX \"users_tags\" ON \"users\" USING GIN \
         (\"tags\" jsonb_path_ops) WHERE \"tags\" IS NOT NULL"
    );
}

#[test]
fn field_operator_overrides_default() {
    let options = IndexOptions::new([
        IndexField::from(IndexColumn::new("a").operator("text_pattern_ops")),
        IndexField::from("b"),
    ])
    .operator("varchar_ops");
    assert_eq!(
        add_index("t", options).unwrap(),
        "CREATE INDEX \"t_a_b\" ON \"t\" (\"a\" text_pattern_ops, \"b\" varchar_ops)"
    );
}

#[test]
fn unsupported_field_clauses_are_omitted() {
    let field = IndexColumn::new("name")
        .collate("C")
        .length(10)
        .order(SortOrder::Desc);
    assert_eq!(
        add_index("users", IndexOptions::new([field])).unwrap(),
        "CREATE INDEX \"users_name\" ON \"users\" (\"name\" DESC)"
    );
}

#[test]
fn collate_and_length_when_supported() {
    let caps = Capabilities {
        index: IndexCapabilities {
            collate: true,
            length: true,
            ..IndexCapabilities::yugabyte()
        },
        ..Capabilities::yugabyte()
    };
    let generator = YugabyteQueryGenerator::with_capabilities(caps);
    let field = IndexColumn::new("name")
        .collate("C")
        .length(10)
        .order(SortOrder::Desc);
    let sql = generator
        .add_index_query(&TableRef::from("users"), IndexOptions::new([field]), None)
        .unwrap();
    assert_eq!(
        sql,
        "CREATE INDEX \"users_name\" ON \"users\" (\"name\" COLLATE \"C\"(10) DESC)"
    );
}

#[test]
fn index_type_dropped_without_capability() {
    let options = IndexOptions::new(["body"]).kind(IndexKind::Fulltext).parser("ngram");
    assert_eq!(
        add_index("posts", options).unwrap(),
        "CREATE INDEX \"posts_body\" ON \"posts\" (\"body\")"
    );
}

#[test]
fn alter_form_with_method_before_table() {
    let caps = Capabilities {
        index: IndexCapabilities {
            using: UsingPosition::BeforeTable,
            index_type: true,
            parser: true,
            concurrently: true,
            ..IndexCapabilities::yugabyte()
        },
        index_via_alter: true,
    };
    let generator = YugabyteQueryGenerator::with_capabilities(caps);
    let options = IndexOptions::new(["body"])
        .kind(IndexKind::Fulltext)
        .using("BTREE")
        .parser("ngram")
        .concurrently();
    let sql = generator
        .add_index_query(&TableRef::from("posts"), options, None)
        .unwrap();
    assert_eq!(
        sql,
        "ALTER TABLE \"posts\" CONCURRENTLY ADD FULLTEXT INDEX \"posts_body\" \
         USING BTREE (\"body\") WITH PARSER ngram"
    );
}

#[test]
fn where_clause_dropped_without_capability() {
    let caps = Capabilities {
        index: IndexCapabilities {
            where_clause: false,
            using: UsingPosition::Unsupported,
            ..IndexCapabilities::yugabyte()
        },
        ..Capabilities::yugabyte()
    };
    let generator = YugabyteQueryGenerator::with_capabilities(caps);
    let options = IndexOptions::new(["email"])
        .using("HASH")
        .where_clause(WhereClause::eq("active", true));
    let sql = generator
        .add_index_query(&TableRef::from("users"), options, None)
        .unwrap();
    assert_eq!(sql, "CREATE INDEX \"users_email\" ON \"users\" (\"email\")");
}

#[test]
fn raw_expression_is_emitted_verbatim() {
    let options = IndexOptions::new([IndexField::raw("lower(email)")]).name("users_lower_email");
    assert_eq!(
        add_index("users", options).unwrap(),
        "CREATE INDEX \"users_lower_email\" ON \"users\" (lower(email))"
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrently_fails_on_yugabyte() {
    let err = add_index("users", IndexOptions::new(["email"]).concurrently()).unwrap_err();
    assert!(matches!(err, DdlError::ConcurrentIndexUnsupported));
}

#[test]
fn concurrently_with_postgres_capabilities() {
    let generator = YugabyteQueryGenerator::with_capabilities(Capabilities::postgres());
    let sql = generator
        .add_index_query(
            &TableRef::from("users"),
            IndexOptions::new(["email"]).concurrently(),
            None,
        )
        .unwrap();
    assert_eq!(sql, "CREATE INDEX CONCURRENTLY \"users_email\" ON \"users\" (\"email\")");
}

// =============================================================================
// Malformed options
// =============================================================================

#[test]
fn missing_fields_fail() {
    let err = add_index("users", IndexOptions::default()).unwrap_err();
    assert!(matches!(err, DdlError::MissingIndexFields(ref t) if t == "users"));
}

#[test]
fn unnamed_field_fails() {
    let err = add_index("users", IndexOptions::new([IndexColumn::default()])).unwrap_err();
    assert!(matches!(err, DdlError::UnnamedIndexField(_)));

    let err = add_index("users", IndexOptions::new([IndexField::raw("lower(email)")])).unwrap_err();
    assert!(matches!(err, DdlError::UnnamedIndexField(_)));
}

#[test]
fn empty_in_list_fails() {
    let options = IndexOptions::new(["kind"]).where_clause(WhereClause::In {
        column: "kind".to_string(),
        values: vec![],
    });
    let err = add_index("users", options).unwrap_err();
    assert!(matches!(err, DdlError::InvalidCondition(_)));
}
