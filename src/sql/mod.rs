//! SQL value objects and the fluent builders that produce them.
//!
//! A builder accumulates text fragments and parameters, validates its
//! invariants in [`SqlBuilder::build`], and emits an immutable value object
//! the statement pipeline can bind and execute.

pub mod batch;
pub mod callable;
pub mod single;

use std::fmt::{self, Display};

use crate::error::BuildError;

pub use batch::{BatchSql, BatchSqlBuilder, BoundBatchSqlBuilder};
pub use callable::{CallableParameter, CallableSql, CallableSqlBuilder, ParameterDirection};
pub use single::{BoundSingleSqlBuilder, ParameterArity, SingleSql, SingleSqlBuilder};

/// SQL text plus whatever parameter data travels with it.
pub trait Sql {
    /// The SQL text to hand to the native client.
    fn sql(&self) -> &str;

    /// Human-readable description of the text and its parameters.
    fn sql_info(&self) -> String;
}

/// Emits a [`Sql`] value object from accumulated builder state.
///
/// `build` borrows the builder, so calling it twice yields two equal values.
pub trait SqlBuilder {
    type Output: Sql;

    /// # Errors
    /// Returns [`BuildError`] when an accumulated invariant is violated.
    fn build(&self) -> Result<Self::Output, BuildError>;
}

pub(crate) fn describe<P: fmt::Debug>(sql: &str, parameters: &[P]) -> String {
    if parameters.is_empty() {
        format!("sql:{sql}")
    } else {
        format!("sql:{sql}\nwith parameters: {parameters:?}")
    }
}

macro_rules! impl_display_via_sql_info {
    ($($ty:ty),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.sql_info())
                }
            }
        )*
    };
}

impl_display_via_sql_info!(SingleSql, BatchSql, CallableSql);
