//! Convenient imports for common functionality.
//!
//! This module re-exports the builders, the statement pipeline and the
//! native client traits most callers need.

pub use crate::error::{BuildError, DriverError, ParseError, StatementError};
pub use crate::native::{
    CallableConnection, CallableStatement, NativeConnection, NativeStatement, PlainStatement,
    PreparedStatement,
};
pub use crate::results::{ResultSet, Row};
pub use crate::sql::{
    BatchSql, BatchSqlBuilder, BoundBatchSqlBuilder, BoundSingleSqlBuilder, CallableParameter,
    CallableSql, CallableSqlBuilder, ParameterArity, ParameterDirection, SingleSql,
    SingleSqlBuilder, Sql, SqlBuilder,
};
pub use crate::statement::defaults::{
    BindBatchSql, BindCallableSql, BindSingleSql, CollectResultSet, ExecutePlain,
    ExecutePrepared, ExecuteUpdate, FirstValue, PlainBatch, PreparedBatch,
};
pub use crate::statement::{
    Callable, CallableIntegratedStatement, Configuration, ConfigurationBuilder, Executed,
    Executor, IntegratedStatement, ParametersHandler, Plain, PlainIntegratedStatement, Prepared,
    PreparedIntegratedStatement, ResultParser, ResultSetConcurrency, ResultSetHoldability,
    ResultSetShape, ResultSetType, StatementHandler, StatementKind,
};
pub use crate::types::{SqlType, SqlValue};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConnection, SqlitePreparedStatement, SqliteStatement};

pub use crate::sql_values;
