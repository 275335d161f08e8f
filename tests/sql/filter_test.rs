use prism::model::{FilterOperator, SemanticType};
use prism::sql::{
    Dialect, DialectError, FilterCompiler, FilterCondition, MatchKind, MatchPredicate,
    ParamAllocator, SqlDialect,
};

fn condition(operator: FilterOperator, values: &[&str]) -> FilterCondition {
    FilterCondition::new("orders.status", SemanticType::String, operator, values.iter().copied())
}

fn placeholder_count(sql: &str, dialect: Dialect) -> usize {
    match dialect {
        Dialect::Vertica => sql.matches('?').count(),
        Dialect::Postgres => (1..=64)
            .filter(|n| {
                let placeholder = format!("${}", n);
                sql.match_indices(&placeholder).any(|(i, _)| {
                    !sql[i + placeholder.len()..].starts_with(|c: char| c.is_ascii_digit())
                })
            })
            .count(),
    }
}

#[test]
fn test_negated_starts_with() {
    let mut compiler = FilterCompiler::new(Dialect::Vertica.dialect());
    let predicate = MatchPredicate::new("name", MatchKind::StartsWith, "ab").negated();
    let sql = compiler.compile_match(&predicate);
    let compiled = compiler.build(&sql).unwrap();

    insta::assert_snapshot!(compiled.sql, @"name NOT ILIKE CONCAT(?, '%')");
    assert_eq!(compiled.params, vec!["ab"]);
}

#[test]
fn test_negated_starts_with_postgres() {
    let mut compiler = FilterCompiler::new(Dialect::Postgres.dialect());
    let predicate = MatchPredicate::new("name", MatchKind::StartsWith, "ab").negated();
    let sql = compiler.compile_match(&predicate);
    let compiled = compiler.build(&sql).unwrap();

    insta::assert_snapshot!(compiled.sql, @"name NOT ILIKE ($1 || '%')");
}

#[test]
fn test_wildcards_do_not_depend_on_negation() {
    for dialect in Dialect::all() {
        for kind in [
            MatchKind::Contains,
            MatchKind::StartsWith,
            MatchKind::EndsWith,
            MatchKind::Equals,
        ] {
            let positive = dialect.like_ignore_case("c", false, kind, "p");
            let negative = dialect.like_ignore_case("c", true, kind, "p");
            assert_eq!(negative, positive.replacen(" ILIKE ", " NOT ILIKE ", 1));
        }
    }
}

#[test]
fn test_params_follow_placeholder_order() {
    for dialect in Dialect::all() {
        let mut compiler = FilterCompiler::new(dialect.dialect());
        let status = compiler
            .compile_filter(&condition(FilterOperator::Equals, &["done", "new"]))
            .unwrap();
        let amount = compiler
            .compile_filter(&FilterCondition::new(
                "orders.amount",
                SemanticType::Number,
                FilterOperator::Gt,
                ["100"],
            ))
            .unwrap();
        let name =
            compiler.compile_match(&MatchPredicate::new("orders.name", MatchKind::Contains, "x"));

        // Fragments composed in a different order than compiled.
        let sql = format!("SELECT * FROM orders WHERE {} AND {} AND {}", name, amount, status);
        let compiled = compiler.build(&sql).unwrap();

        assert_eq!(compiled.params, vec!["x", "100", "done", "new"]);
        assert_eq!(placeholder_count(&compiled.sql, *dialect), compiled.params.len());
    }
}

#[test]
fn test_postgres_placeholders_numbered_by_appearance() {
    let mut params = ParamAllocator::new();
    let a = params.allocate("a");
    let b = params.allocate("b");
    let sql = format!("x = {} OR y = {} OR z = {}", b, a, b);
    let compiled = params
        .build_sql_and_params(&sql, Dialect::Postgres.dialect())
        .unwrap();

    assert_eq!(compiled.sql, "x = $1 OR y = $2 OR z = $3");
    assert_eq!(compiled.params, vec!["b", "a", "b"]);
}

#[test]
fn test_unknown_marker() {
    let params = ParamAllocator::new();
    assert_eq!(
        params.build_sql_and_params("x = $3$", Dialect::Vertica.dialect()),
        Err(DialectError::UnknownParam(3))
    );
}

#[test]
fn test_operator_set() {
    let mut compiler = FilterCompiler::new(Dialect::Postgres.dialect());
    let mut render = |operator: FilterOperator, values: &[&str]| {
        let sql = compiler.compile_filter(&condition(operator, values)).unwrap();
        compiler.build(&sql).unwrap().sql
    };

    assert_eq!(render(FilterOperator::Equals, &["a"]), "orders.status = $1");
    assert_eq!(render(FilterOperator::In, &["a", "b"]), "orders.status IN ($1, $2)");
    assert_eq!(
        render(FilterOperator::NotEquals, &["a"]),
        "(orders.status <> $1 OR orders.status IS NULL)"
    );
    assert_eq!(
        render(FilterOperator::NotIn, &["a", "b"]),
        "(orders.status NOT IN ($1, $2) OR orders.status IS NULL)"
    );
    assert_eq!(
        render(FilterOperator::Contains, &["a", "b"]),
        "(orders.status ILIKE ('%' || $1 || '%') OR orders.status ILIKE ('%' || $2 || '%'))"
    );
    assert_eq!(
        render(FilterOperator::NotEndsWith, &["a"]),
        "(orders.status NOT ILIKE ('%' || $1) OR orders.status IS NULL)"
    );
    assert_eq!(render(FilterOperator::Set, &[]), "orders.status IS NOT NULL");
    assert_eq!(render(FilterOperator::NotSet, &[]), "orders.status IS NULL");
}

#[test]
fn test_date_operators() {
    let mut compiler = FilterCompiler::new(Dialect::Vertica.dialect());
    let in_range = compiler
        .compile_filter(&FilterCondition::new(
            "orders.created_at",
            SemanticType::Time,
            FilterOperator::InDateRange,
            ["2021-01-01T00:00:00.000", "2021-01-31T23:59:59.999"],
        ))
        .unwrap();
    let before = compiler
        .compile_filter(&FilterCondition::new(
            "orders.created_at",
            SemanticType::Time,
            FilterOperator::BeforeDate,
            ["2021-02-01T00:00:00.000"],
        ))
        .unwrap();
    let compiled = compiler.build(&format!("{} AND {}", in_range, before)).unwrap();

    insta::assert_snapshot!(compiled.sql, @r#"(orders.created_at >= TO_TIMESTAMP(?, 'YYYY-MM-DD"T"HH24:MI:SS.MS') AND orders.created_at <= TO_TIMESTAMP(?, 'YYYY-MM-DD"T"HH24:MI:SS.MS')) AND orders.created_at < TO_TIMESTAMP(?, 'YYYY-MM-DD"T"HH24:MI:SS.MS')"#);
    assert_eq!(compiled.params.len(), 3);
}

#[test]
fn test_typed_comparison_casts() {
    let mut compiler = FilterCompiler::new(Dialect::Vertica.dialect());
    let sql = compiler
        .compile_filter(&FilterCondition::new(
            "orders.is_paid",
            SemanticType::Boolean,
            FilterOperator::Equals,
            ["true"],
        ))
        .unwrap();
    assert_eq!(sql, "orders.is_paid = CAST($0$ AS BOOLEAN)");
}

#[test]
fn test_value_count_checked() {
    let mut compiler = FilterCompiler::new(Dialect::Vertica.dialect());
    assert!(matches!(
        compiler.compile_filter(&condition(FilterOperator::Equals, &[])),
        Err(DialectError::InvalidFilter { operator: FilterOperator::Equals, .. })
    ));
    assert!(matches!(
        compiler.compile_filter(&condition(FilterOperator::InDateRange, &["2021-01-01"])),
        Err(DialectError::InvalidFilter { .. })
    ));
    assert!(matches!(
        compiler.compile_filter(&condition(FilterOperator::Gt, &["1", "2"])),
        Err(DialectError::InvalidFilter { .. })
    ));
}

#[test]
fn test_compile_filters_joins_in_order() {
    let mut compiler = FilterCompiler::new(Dialect::Vertica.dialect());
    assert_eq!(compiler.compile_filters(&[]).unwrap(), None);

    let sql = compiler
        .compile_filters(&[
            condition(FilterOperator::Set, &[]),
            condition(FilterOperator::Equals, &["a"]),
        ])
        .unwrap()
        .unwrap();
    assert_eq!(sql, "orders.status IS NOT NULL AND orders.status = $0$");
}

#[test]
fn test_hand_written_fragment_shares_parameters() {
    for dialect in Dialect::all() {
        let mut compiler = FilterCompiler::new(dialect.dialect());
        let column = compiler.dialect().escape_identifier("order status");
        let param = compiler.allocate_param("done");
        let compiled = compiler.build(&format!("{} = {}", column, param)).unwrap();

        assert!(compiled.sql.starts_with("\"order status\" = "));
        assert_eq!(compiled.params, vec!["done"]);
        assert_eq!(placeholder_count(&compiled.sql, *dialect), 1);
    }
}
