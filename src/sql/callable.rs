use crate::error::BuildError;
use crate::types::{SqlType, SqlValue};

use super::{Sql, SqlBuilder, describe};

/// How a callable parameter takes part in the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterDirection {
    /// Bound as a typed input value.
    In,
    /// Registered as an output, no value bound.
    Out,
    /// Bound and registered.
    InOut,
}

/// One positional parameter of a stored-procedure call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableParameter {
    pub value: Option<SqlValue>,
    pub sql_type: SqlType,
    pub direction: ParameterDirection,
}

impl CallableParameter {
    #[must_use]
    pub fn input(value: impl Into<SqlValue>, sql_type: SqlType) -> Self {
        Self {
            value: Some(value.into()),
            sql_type,
            direction: ParameterDirection::In,
        }
    }

    #[must_use]
    pub fn output(sql_type: SqlType) -> Self {
        Self {
            value: None,
            sql_type,
            direction: ParameterDirection::Out,
        }
    }

    #[must_use]
    pub fn input_output(value: impl Into<SqlValue>, sql_type: SqlType) -> Self {
        Self {
            value: Some(value.into()),
            sql_type,
            direction: ParameterDirection::InOut,
        }
    }

    /// Whether a value is bound before execution.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(
            self.direction,
            ParameterDirection::In | ParameterDirection::InOut
        )
    }

    /// Whether an output type is registered before execution.
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(
            self.direction,
            ParameterDirection::Out | ParameterDirection::InOut
        )
    }
}

/// A stored-procedure call. Parameter `i` binds at index `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableSql {
    sql: String,
    parameters: Vec<CallableParameter>,
}

impl CallableSql {
    #[must_use]
    pub fn new(sql: impl Into<String>, parameters: Vec<CallableParameter>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &[CallableParameter] {
        &self.parameters
    }

    /// 1-based indices of parameters registered for output.
    pub fn output_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_output())
            .map(|(i, _)| i + 1)
    }
}

impl Sql for CallableSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn sql_info(&self) -> String {
        describe(&self.sql, &self.parameters)
    }
}

/// Builder for [`CallableSql`].
///
/// ```rust
/// use sql_integrated::prelude::*;
///
/// let call = CallableSqlBuilder::from_sql("{ ? = CALL F(?) }")
///     .append_out_parameter(SqlType::Integer)
///     .append_in_parameter("v", SqlType::Varchar)
///     .build()?;
/// assert_eq!(call.parameters()[0].direction, ParameterDirection::Out);
/// assert_eq!(call.parameters()[1].value, Some(SqlValue::from("v")));
/// # Ok::<(), BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallableSqlBuilder {
    sql: String,
    parameters: Vec<CallableParameter>,
}

impl CallableSqlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_sql(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    pub fn append_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub fn append_in_parameter(
        &mut self,
        parameter: impl Into<SqlValue>,
        sql_type: SqlType,
    ) -> &mut Self {
        self.parameters
            .push(CallableParameter::input(parameter, sql_type));
        self
    }

    pub fn append_out_parameter(&mut self, sql_type: SqlType) -> &mut Self {
        self.parameters.push(CallableParameter::output(sql_type));
        self
    }

    pub fn append_in_out_parameter(
        &mut self,
        parameter: impl Into<SqlValue>,
        sql_type: SqlType,
    ) -> &mut Self {
        self.parameters
            .push(CallableParameter::input_output(parameter, sql_type));
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl SqlBuilder for CallableSqlBuilder {
    type Output = CallableSql;

    fn build(&self) -> Result<CallableSql, BuildError> {
        if self.sql.is_empty() {
            return Err(BuildError::new("SQL string cannot be empty"));
        }
        Ok(CallableSql::new(self.sql.clone(), self.parameters.clone()))
    }
}
