use sql_integrated::prelude::*;
use sql_integrated::test_utils::{Call, Operation, RecordingConnection, RecordingPrepared};

fn scalar_call() -> Result<CallableSql, BuildError> {
    CallableSqlBuilder::from_sql("{ ? = CALL F(?) }")
        .append_out_parameter(SqlType::Integer)
        .append_in_parameter("v", SqlType::Varchar)
        .build()
}

#[test]
fn out_and_in_parameters_are_bound_by_direction() -> Result<(), StatementError> {
    let conn = RecordingConnection::new();
    conn.script_out_value(1, SqlValue::Int(7));
    let call = scalar_call()?;

    let mut stmt = CallableIntegratedStatement::new(&conn);
    assert!(!stmt.call(&call)?);

    assert_eq!(
        conn.calls(),
        vec![
            Call::PrepareCall {
                sql: "{ ? = CALL F(?) }".into(),
                shape: None,
            },
            Call::RegisterOut {
                index: 1,
                sql_type: SqlType::Integer,
            },
            Call::BindTyped {
                index: 2,
                value: SqlValue::Text("v".into()),
                sql_type: SqlType::Varchar,
            },
            Call::Execute {
                sql: "{ ? = CALL F(?) }".into(),
                parameters: vec![SqlValue::Null, SqlValue::Text("v".into())],
            },
        ]
    );

    let handle = stmt.handle().expect("created handle");
    assert_eq!(handle.out_parameter(1).map_err(|e| e.to_string()), Ok(SqlValue::Int(7)));
    assert!(handle.out_parameter(2).is_err());
    Ok(())
}

#[test]
fn in_out_parameter_is_bound_then_registered() -> Result<(), StatementError> {
    let conn = RecordingConnection::new();
    let call = CallableSqlBuilder::from_sql("{ CALL bump(?) }")
        .append_in_out_parameter(10, SqlType::BigInt)
        .build()?;

    let mut stmt = CallableIntegratedStatement::new(&conn);
    stmt.create_statement(call.sql())?
        .parameterize(&BindCallableSql, &call)?;

    assert_eq!(
        conn.calls()[1..],
        [
            Call::BindTyped {
                index: 1,
                value: SqlValue::Int(10),
                sql_type: SqlType::BigInt,
            },
            Call::RegisterOut {
                index: 1,
                sql_type: SqlType::BigInt,
            },
        ]
    );
    Ok(())
}

#[test]
fn configuration_shape_reaches_the_factory() -> Result<(), StatementError> {
    let conn = RecordingConnection::new();
    let cfg = Configuration::builder()
        .result_set_type(ResultSetType::ScrollInsensitive)
        .result_set_concurrency(ResultSetConcurrency::ReadOnly)
        .finish();

    let mut stmt = CallableIntegratedStatement::new(&conn);
    stmt.set_configuration(cfg);
    stmt.create_statement("{ CALL p() }")?;

    assert_eq!(
        conn.calls()[0],
        Call::PrepareCall {
            sql: "{ CALL p() }".into(),
            shape: Some(ResultSetShape {
                result_set_type: Some(ResultSetType::ScrollInsensitive),
                concurrency: Some(ResultSetConcurrency::ReadOnly),
                holdability: None,
            }),
        }
    );
    Ok(())
}

#[test]
fn call_with_reads_out_values_in_the_parser() -> Result<(), StatementError> {
    let conn = RecordingConnection::new();
    conn.script_out_value(1, SqlValue::Int(99));
    let call = scalar_call()?;

    let read_out = |handle: &mut RecordingPrepared, produced_rows: Option<bool>| {
        assert_eq!(produced_rows, Some(false));
        handle.out_parameter(1).map_err(ParseError::from)
    };
    let mut stmt = CallableIntegratedStatement::new(&conn);
    assert_eq!(stmt.call_with(&call, &read_out)?, SqlValue::Int(99));
    Ok(())
}

#[test]
fn failed_registration_is_a_lifecycle_error() -> Result<(), StatementError> {
    let conn = RecordingConnection::new();
    let call = scalar_call()?;
    conn.fail_on(Operation::Bind);

    let mut stmt = CallableIntegratedStatement::new(&conn);
    let err = stmt.call(&call).unwrap_err();
    assert!(err.is_lifecycle());
    assert_eq!(err.sql(), Some("{ ? = CALL F(?) }"));
    Ok(())
}
