use crate::error::BuildError;
use crate::types::SqlValue;

use super::{Sql, SqlBuilder, describe};

/// One statement with one row of positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSql {
    sql: String,
    parameters: Vec<SqlValue>,
}

impl SingleSql {
    #[must_use]
    pub fn new(sql: impl Into<String>, parameters: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    /// Parameters in placeholder order.
    #[must_use]
    pub fn parameters(&self) -> &[SqlValue] {
        &self.parameters
    }
}

impl Sql for SingleSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn sql_info(&self) -> String {
        describe(&self.sql, &self.parameters)
    }
}

/// Text-only accumulator for a single statement.
#[derive(Debug, Clone, Default)]
pub struct SingleSqlBuilder {
    sql: String,
}

impl SingleSqlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text.
    #[must_use]
    pub fn with_sql(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    pub fn append_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl SqlBuilder for SingleSqlBuilder {
    type Output = SingleSql;

    fn build(&self) -> Result<SingleSql, BuildError> {
        Ok(SingleSql::new(self.sql.clone(), Vec::new()))
    }
}

/// Expected parameter count for a [`BoundSingleSqlBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterArity {
    /// Skip the count check.
    #[default]
    Unconstrained,
    /// Exactly this many parameters; `Exactly(0)` demands none.
    Exactly(usize),
}

impl ParameterArity {
    fn check(self, actual: usize) -> Result<(), BuildError> {
        match self {
            ParameterArity::Exactly(expected) if expected != actual => Err(BuildError::new(
                format!("expectedParametersSize is {expected} but actual is {actual}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Single-statement builder that also tracks parameters and, optionally,
/// enforces how many there must be.
///
/// Parameters and text are appended independently; the builder does not
/// count placeholders, so callers interleave the two in placeholder order.
///
/// ```rust
/// use sql_integrated::prelude::*;
///
/// let sql = BoundSingleSqlBuilder::with_expected(2)
///     .append_sql("UPDATE users SET name = ? ")
///     .append_sql_parameter("bob")
///     .append_sql_fragment("WHERE id = ?", [7])
///     .build()?;
/// assert_eq!(sql.parameters(), &[SqlValue::from("bob"), SqlValue::Int(7)]);
/// # Ok::<(), BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundSingleSqlBuilder {
    text: SingleSqlBuilder,
    parameters: Vec<SqlValue>,
    arity: ParameterArity,
}

impl BoundSingleSqlBuilder {
    /// Builder with no count check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose `build` requires exactly `expected` parameters.
    #[must_use]
    pub fn with_expected(expected: usize) -> Self {
        Self::with_arity(SingleSqlBuilder::new(), ParameterArity::Exactly(expected))
    }

    #[must_use]
    pub fn with_arity(text: SingleSqlBuilder, arity: ParameterArity) -> Self {
        let capacity = match arity {
            ParameterArity::Exactly(n) => n,
            ParameterArity::Unconstrained => 0,
        };
        Self {
            text,
            parameters: Vec::with_capacity(capacity),
            arity,
        }
    }

    #[must_use]
    pub fn arity(&self) -> ParameterArity {
        self.arity
    }

    pub fn append_sql(&mut self, sql: &str) -> &mut Self {
        self.text.append_sql(sql);
        self
    }

    pub fn append_sql_parameter(&mut self, parameter: impl Into<SqlValue>) -> &mut Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Append several parameters in order. Passing `None` appends nothing.
    pub fn append_sql_parameters<I>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.parameters
            .extend(parameters.into_iter().map(Into::into));
        self
    }

    /// Append `parameters`, then `sql_fragment`.
    pub fn append_sql_fragment<I>(&mut self, sql_fragment: &str, parameters: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.append_sql_parameters(parameters);
        self.text.append_sql(sql_fragment);
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        self.text.sql()
    }

    #[must_use]
    pub fn parameters(&self) -> &[SqlValue] {
        &self.parameters
    }
}

impl SqlBuilder for BoundSingleSqlBuilder {
    type Output = SingleSql;

    fn build(&self) -> Result<SingleSql, BuildError> {
        self.arity.check(self.parameters.len())?;
        Ok(SingleSql::new(self.text.sql(), self.parameters.clone()))
    }
}
