//! Fluent SQL builders and one statement pipeline for plain, prepared and
//! callable statements over a blocking database client.
//!
//! Builders ([`SingleSqlBuilder`], [`BoundSingleSqlBuilder`],
//! [`BatchSqlBuilder`], [`BoundBatchSqlBuilder`], [`CallableSqlBuilder`])
//! assemble immutable SQL value objects. An [`IntegratedStatement`] then
//! drives a native handle through create, configure, parameterize, execute,
//! parse and close, reporting failures as a [`StatementError`].
//!
//! The client itself sits behind the traits in [`native`]; the `sqlite`
//! feature (on by default) provides an adapter over `rusqlite`.

pub mod error;
pub mod native;
pub mod prelude;
pub mod results;
pub mod sql;
pub mod statement;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{BuildError, DriverError, ParseError, StatementError};
pub use results::{ResultSet, Row};
pub use sql::{
    BatchSql, BatchSqlBuilder, BoundBatchSqlBuilder, BoundSingleSqlBuilder, CallableParameter,
    CallableSql, CallableSqlBuilder, ParameterArity, ParameterDirection, SingleSql,
    SingleSqlBuilder, Sql, SqlBuilder,
};
pub use statement::{
    CallableIntegratedStatement, Configuration, Executed, IntegratedStatement,
    PlainIntegratedStatement, PreparedIntegratedStatement,
};
pub use types::{SqlType, SqlValue};
