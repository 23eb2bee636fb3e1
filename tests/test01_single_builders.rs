use sql_integrated::prelude::*;

#[test]
fn bound_single_enforces_exact_arity() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = BoundSingleSqlBuilder::with_expected(3);
    builder
        .append_sql("INSERT INTO users (id, name, email) ")
        .append_sql_fragment("VALUES (?, ?, ?)", sql_values![1, "A", "a@x.com"]);

    let sql = builder.build()?;
    assert_eq!(sql.sql(), "INSERT INTO users (id, name, email) VALUES (?, ?, ?)");
    assert_eq!(sql.parameters(), sql_values![1, "A", "a@x.com"].as_slice());

    builder.append_sql_parameter("extra");
    let err = builder.build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "SQL build error: expectedParametersSize is 3 but actual is 4"
    );
    Ok(())
}

#[test]
fn build_is_repeatable() -> Result<(), BuildError> {
    let mut builder = BoundSingleSqlBuilder::new();
    builder
        .append_sql("SELECT * FROM t WHERE a = ?")
        .append_sql_parameter(5);
    let first = builder.build()?;
    let second = builder.build()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn unconstrained_and_zero_arity_differ() {
    let mut open = BoundSingleSqlBuilder::new();
    open.append_sql("SELECT ?").append_sql_parameter(1);
    assert!(open.build().is_ok());

    let mut none_allowed = BoundSingleSqlBuilder::with_expected(0);
    none_allowed.append_sql("SELECT ?").append_sql_parameter(1);
    assert!(none_allowed.build().is_err());

    let mut empty = BoundSingleSqlBuilder::with_expected(0);
    empty.append_sql("SELECT 1");
    assert!(empty.build().is_ok());
}

#[test]
fn empty_parameter_collection_is_a_no_op() -> Result<(), BuildError> {
    let mut builder = BoundSingleSqlBuilder::with_expected(1);
    builder
        .append_sql("DELETE FROM t WHERE id = ?")
        .append_sql_parameters(Option::<SqlValue>::None)
        .append_sql_parameters(Vec::<SqlValue>::new())
        .append_sql_parameter(9);
    assert_eq!(builder.build()?.parameters(), &[SqlValue::Int(9)]);
    Ok(())
}

#[test]
fn plain_builder_has_no_parameters() -> Result<(), BuildError> {
    let sql = SingleSqlBuilder::with_sql("SELECT 1")
        .append_sql(" UNION SELECT 2")
        .build()?;
    assert!(sql.parameters().is_empty());
    assert_eq!(sql.sql_info(), "sql:SELECT 1 UNION SELECT 2");
    Ok(())
}

#[test]
fn sql_info_lists_parameters() -> Result<(), BuildError> {
    let sql = BoundSingleSqlBuilder::with_expected(2)
        .append_sql("UPDATE t SET a = ? WHERE id = ?")
        .append_sql_parameters(sql_values!["x", 3])
        .build()?;
    let info = sql.sql_info();
    assert!(info.starts_with("sql:UPDATE t SET a = ? WHERE id = ?\nwith parameters: "));
    assert!(info.contains("Text(\"x\")"));
    assert!(info.contains("Int(3)"));
    assert_eq!(sql.to_string(), info);
    Ok(())
}
