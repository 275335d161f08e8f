use prism::sql::{
    time_series, Dialect, DialectError, Granularity, MatchKind, ParamCast, SqlDialect,
};
use prism::model::TIME_WIRE_FORMAT;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

fn assert_postgres_parses(expr: &str) {
    let sql = format!("SELECT {} FROM orders", expr);
    if let Err(e) = Parser::parse_sql(&PostgreSqlDialect {}, &sql) {
        panic!("invalid SQL: {}\n{}", e, sql);
    }
}

#[test]
fn test_registry_lookup() {
    assert_eq!("vertica".parse::<Dialect>().unwrap(), Dialect::Vertica);
    assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
    assert!(matches!(
        "oracle".parse::<Dialect>(),
        Err(DialectError::UnknownDialect(_))
    ));
    assert_eq!(Dialect::default(), Dialect::Vertica);
}

#[test]
fn test_every_dialect_implements_every_primitive() {
    for dialect in Dialect::all() {
        for granularity in Granularity::ALL {
            let sql = dialect.truncate_to_granularity(granularity, "created_at");
            assert!(sql.contains(granularity.as_str()), "{dialect}: {sql}");
        }
        assert!(dialect.convert_timezone("created_at", "UTC").is_ok());
        assert!(!dialect.cast_timestamp_literal("'2021-01-01T00:00:00.000'").is_empty());
        assert!(!dialect.cast_date_time("created_at").is_empty());
        assert_eq!(dialect.timestamp_parse_format(), TIME_WIRE_FORMAT);
        assert!(!dialect.current_unix_timestamp().is_empty());
        assert_eq!(dialect.escape_identifier("name"), "\"name\"");
        assert!(dialect.boolean_indicator("x > 1").contains("x > 1"));
        assert!(!dialect.param_placeholder(1).is_empty());
    }
}

#[test]
fn test_unknown_granularity_fails_fast() {
    for dialect in Dialect::all() {
        assert_eq!(
            dialect.time_grouped_column("fortnight", "created_at"),
            Err(DialectError::UnknownGranularity("fortnight".into()))
        );
    }
}

#[test]
fn test_timezone_injection_rejected() {
    for dialect in Dialect::all() {
        assert!(matches!(
            dialect.convert_timezone("created_at", "UTC'; DROP TABLE orders; --"),
            Err(DialectError::InvalidTimezone(_))
        ));
    }
}

#[test]
fn test_vertica_time_primitives() {
    let v = Dialect::Vertica;
    insta::assert_snapshot!(
        v.time_grouped_column("month", "orders.created_at").unwrap(),
        @"DATE_TRUNC('month', orders.created_at)"
    );
    insta::assert_snapshot!(
        v.convert_timezone("orders.created_at", "America/Los_Angeles").unwrap(),
        @"orders.created_at AT TIMEZONE 'America/Los_Angeles'"
    );
    insta::assert_snapshot!(
        v.cast_timestamp_literal("?"),
        @r#"TO_TIMESTAMP(?, 'YYYY-MM-DD"T"HH24:MI:SS.MS')"#
    );
}

#[test]
fn test_vertica_date_series() {
    let ranges = time_series(Granularity::Day, "2021-01-01", "2021-01-02").unwrap();
    insta::assert_snapshot!(
        Dialect::Vertica.generate_date_series(&ranges).unwrap(),
        @"SELECT dates.f::TIMESTAMP date_from, dates.t::TIMESTAMP date_to FROM (SELECT '2021-01-01T00:00:00.000' f, '2021-01-01T23:59:59.999' t UNION ALL SELECT '2021-01-02T00:00:00.000' f, '2021-01-02T23:59:59.999' t) AS dates"
    );
}

#[test]
fn test_empty_date_series() {
    for dialect in Dialect::all() {
        assert_eq!(
            dialect.generate_date_series(&[]),
            Err(DialectError::EmptyDateSeries)
        );
    }
}

#[test]
fn test_vertica_concat_nests_pairs() {
    let parts = ["a".to_string(), "b".to_string(), "c".to_string()];
    insta::assert_snapshot!(
        Dialect::Vertica.concat_strings(&parts),
        @"CONCAT(CONCAT(a, b), c)"
    );
    assert_eq!(Dialect::Vertica.concat_strings(&[]), "''");
}

#[test]
fn test_postgres_output_parses() {
    let pg = Dialect::Postgres;
    for granularity in Granularity::ALL {
        assert_postgres_parses(&pg.truncate_to_granularity(granularity, "created_at"));
    }
    assert_postgres_parses(&pg.convert_timezone("created_at", "Europe/Berlin").unwrap());
    assert_postgres_parses(&pg.cast_timestamp_literal("$1"));
    assert_postgres_parses(&pg.cast_date_time("created_at"));
    assert_postgres_parses(&pg.current_unix_timestamp());
    assert_postgres_parses(&pg.concat_strings(&["name".into(), "'-'".into(), "code".into()]));
    assert_postgres_parses(&pg.boolean_indicator("amount > 10"));
    assert_postgres_parses(&pg.like_ignore_case("name", true, MatchKind::Contains, "$1"));
    assert_postgres_parses(&pg.cast_parameter("$1", ParamCast::Number));
    assert_postgres_parses(&pg.cast_parameter("$1", ParamCast::Boolean));
}

#[test]
fn test_postgres_date_series_parses() {
    let ranges = time_series(Granularity::Month, "2021-01-15", "2021-03-01").unwrap();
    let series = Dialect::Postgres.generate_date_series(&ranges).unwrap();
    let sql = format!("SELECT * FROM ({}) AS series", series);
    Parser::parse_sql(&PostgreSqlDialect {}, &sql).unwrap();
    assert_eq!(series.matches("('").count(), 3);
}

#[test]
fn test_placeholders() {
    assert_eq!(Dialect::Vertica.param_placeholder(3), "?");
    assert_eq!(Dialect::Postgres.param_placeholder(3), "$3");
}
