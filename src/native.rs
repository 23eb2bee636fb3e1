//! The boundary to the underlying database client.
//!
//! A client adapter implements these traits; the statement pipeline only ever
//! talks to them. Parameter indices are 1-based throughout.

use crate::error::DriverError;
use crate::results::ResultSet;
use crate::statement::config::ResultSetShape;
use crate::types::{SqlType, SqlValue};

/// Operations every native statement handle supports.
pub trait NativeStatement {
    fn set_query_timeout(&mut self, seconds: u32) -> Result<(), DriverError>;

    fn set_fetch_size(&mut self, rows: u32) -> Result<(), DriverError>;

    /// Take the rows produced by the last execution, if it produced any.
    fn result_set(&mut self) -> Result<Option<ResultSet>, DriverError>;

    /// Rows changed by the last execution.
    fn update_count(&self) -> Result<Option<u64>, DriverError>;

    fn is_closed(&self) -> Result<bool, DriverError>;

    fn close(&mut self) -> Result<(), DriverError>;
}

/// A handle that receives its SQL text at execution time.
pub trait PlainStatement: NativeStatement {
    /// Execute `sql`; `true` when it produced a result set.
    fn execute(&mut self, sql: &str) -> Result<bool, DriverError>;

    fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError>;

    /// Queue `sql` for the next [`execute_batch`](Self::execute_batch).
    fn add_batch(&mut self, sql: &str) -> Result<(), DriverError>;

    /// Run every queued statement in order and clear the queue.
    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError>;
}

/// A handle prepared from fixed SQL text with positional parameters.
pub trait PreparedStatement: NativeStatement {
    fn bind(&mut self, index: usize, value: &SqlValue) -> Result<(), DriverError>;

    fn clear_parameters(&mut self) -> Result<(), DriverError>;

    /// Queue the currently bound parameters as one batch row.
    fn add_batch(&mut self) -> Result<(), DriverError>;

    /// Execute with the bound parameters; `true` when it produced a result set.
    fn execute(&mut self) -> Result<bool, DriverError>;

    fn execute_update(&mut self) -> Result<u64, DriverError>;

    /// Run every queued row in order and clear the queue.
    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError>;
}

/// A prepared handle for stored-procedure calls.
pub trait CallableStatement: PreparedStatement {
    fn bind_typed(
        &mut self,
        index: usize,
        value: &SqlValue,
        sql_type: SqlType,
    ) -> Result<(), DriverError>;

    fn register_out_parameter(&mut self, index: usize, sql_type: SqlType)
    -> Result<(), DriverError>;

    /// Value of a registered output parameter after execution.
    fn out_parameter(&self, index: usize) -> Result<SqlValue, DriverError>;
}

/// A connection able to create plain and prepared handles.
///
/// The pipeline only borrows the connection; it never closes it.
pub trait NativeConnection {
    type Statement: PlainStatement;
    type Prepared: PreparedStatement;

    fn create_statement(&self) -> Result<Self::Statement, DriverError>;

    fn prepare_statement(&self, sql: &str) -> Result<Self::Prepared, DriverError>;
}

/// A connection that can also prepare stored-procedure calls.
pub trait CallableConnection: NativeConnection {
    type Callable: CallableStatement;

    /// Prepare a call; `shape` is `None` when the handle's defaults apply.
    fn prepare_call(
        &self,
        sql: &str,
        shape: Option<&ResultSetShape>,
    ) -> Result<Self::Callable, DriverError>;
}
