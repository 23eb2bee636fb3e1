use sql_integrated::prelude::*;

#[test]
fn out_then_in_parameters_keep_positions() -> Result<(), BuildError> {
    let call = CallableSqlBuilder::from_sql("{ ? = CALL F(?) }")
        .append_out_parameter(SqlType::Integer)
        .append_in_parameter("v", SqlType::Varchar)
        .build()?;

    assert_eq!(call.sql(), "{ ? = CALL F(?) }");
    assert_eq!(
        call.parameters(),
        &[
            CallableParameter::output(SqlType::Integer),
            CallableParameter::input("v", SqlType::Varchar),
        ]
    );
    assert_eq!(call.parameters()[0].value, None);
    assert_eq!(call.output_indices().collect::<Vec<_>>(), vec![1]);
    Ok(())
}

#[test]
fn in_out_parameter_is_both() -> Result<(), BuildError> {
    let call = CallableSqlBuilder::new()
        .append_sql("{ CALL bump(?) }")
        .append_in_out_parameter(10, SqlType::BigInt)
        .build()?;
    let p = &call.parameters()[0];
    assert!(p.is_input());
    assert!(p.is_output());
    assert_eq!(p.direction, ParameterDirection::InOut);
    assert_eq!(p.value, Some(SqlValue::Int(10)));
    Ok(())
}

#[test]
fn empty_text_is_rejected() {
    let err = CallableSqlBuilder::new()
        .append_out_parameter(SqlType::Integer)
        .build()
        .unwrap_err();
    assert_eq!(err.0, "SQL string cannot be empty");
}

#[test]
fn null_input_value_is_kept() -> Result<(), BuildError> {
    let call = CallableSqlBuilder::from_sql("{ CALL p(?) }")
        .append_in_parameter(Option::<i64>::None, SqlType::Integer)
        .build()?;
    assert_eq!(call.parameters()[0].value, Some(SqlValue::Null));
    Ok(())
}
