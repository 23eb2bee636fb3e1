//! Named default strategies, picked by the convenience methods of each
//! statement variant.

use tracing::trace;

use crate::error::{DriverError, ParseError};
use crate::native::{CallableStatement, NativeStatement, PlainStatement, PreparedStatement};
use crate::results::ResultSet;
use crate::sql::{BatchSql, CallableSql, ParameterDirection, SingleSql};
use crate::types::SqlValue;

use super::strategy::{Executor, ParametersHandler, ResultParser};

/// Binds each parameter of a [`SingleSql`] at its 1-based position.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindSingleSql;

impl<H: PreparedStatement + ?Sized> ParametersHandler<H, SingleSql> for BindSingleSql {
    fn parameterize(&self, handle: &mut H, sql: &SingleSql) -> Result<(), DriverError> {
        for (i, value) in sql.parameters().iter().enumerate() {
            handle.bind(i + 1, value)?;
        }
        Ok(())
    }
}

/// Binds every row of a [`BatchSql`] and queues it, in stored order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindBatchSql;

impl<H: PreparedStatement + ?Sized> ParametersHandler<H, BatchSql> for BindBatchSql {
    fn parameterize(&self, handle: &mut H, sql: &BatchSql) -> Result<(), DriverError> {
        for (row_idx, row) in sql.parameter_rows().iter().enumerate() {
            for (i, value) in row.iter().enumerate() {
                handle.bind(i + 1, value)?;
            }
            handle.add_batch()?;
            trace!(row = row_idx, width = row.len(), "queued batch row");
        }
        Ok(())
    }
}

/// Binds IN values and registers OUT types exactly as the builder recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindCallableSql;

impl<H: CallableStatement + ?Sized> ParametersHandler<H, CallableSql> for BindCallableSql {
    fn parameterize(&self, handle: &mut H, sql: &CallableSql) -> Result<(), DriverError> {
        for (i, parameter) in sql.parameters().iter().enumerate() {
            let index = i + 1;
            let value = parameter.value.as_ref().unwrap_or(&SqlValue::Null);
            match parameter.direction {
                ParameterDirection::In => handle.bind_typed(index, value, parameter.sql_type)?,
                ParameterDirection::Out => {
                    handle.register_out_parameter(index, parameter.sql_type)?;
                }
                ParameterDirection::InOut => {
                    handle.bind_typed(index, value, parameter.sql_type)?;
                    handle.register_out_parameter(index, parameter.sql_type)?;
                }
            }
        }
        Ok(())
    }
}

/// Plain `execute(sql)`; `true` when a result set was produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutePlain;

impl<H: PlainStatement + ?Sized> Executor<H, bool> for ExecutePlain {
    fn execute(&self, handle: &mut H, sql: &str) -> Result<bool, DriverError> {
        handle.execute(sql)
    }
}

/// Splits the statement text on `;`, queues each piece and runs the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBatch;

impl<H: PlainStatement + ?Sized> Executor<H, Vec<u64>> for PlainBatch {
    fn execute(&self, handle: &mut H, sql: &str) -> Result<Vec<u64>, DriverError> {
        add_batch_sql(handle, sql)?;
        handle.execute_batch()
    }
}

/// Queue every non-empty `;`-separated statement of `multiple_sql`.
///
/// # Errors
/// Propagates the first failure from the handle.
pub fn add_batch_sql<H: PlainStatement + ?Sized>(
    handle: &mut H,
    multiple_sql: &str,
) -> Result<(), DriverError> {
    for single_sql in multiple_sql.split(';') {
        let trimmed = single_sql.trim();
        if trimmed.is_empty() {
            continue;
        }
        handle.add_batch(trimmed)?;
    }
    Ok(())
}

/// Prepared `execute()`; `true` when a result set was produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutePrepared;

impl<H: PreparedStatement + ?Sized> Executor<H, bool> for ExecutePrepared {
    fn execute(&self, handle: &mut H, _sql: &str) -> Result<bool, DriverError> {
        handle.execute()
    }
}

/// Prepared `execute_update()`, returning the update count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteUpdate;

impl<H: PreparedStatement + ?Sized> Executor<H, u64> for ExecuteUpdate {
    fn execute(&self, handle: &mut H, _sql: &str) -> Result<u64, DriverError> {
        handle.execute_update()
    }
}

/// Runs the rows queued on a prepared handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreparedBatch;

impl<H: PreparedStatement + ?Sized> Executor<H, Vec<u64>> for PreparedBatch {
    fn execute(&self, handle: &mut H, _sql: &str) -> Result<Vec<u64>, DriverError> {
        handle.execute_batch()
    }
}

/// Takes the handle's pending result set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectResultSet;

impl<H: NativeStatement + ?Sized, P> ResultParser<H, P, ResultSet> for CollectResultSet {
    fn parse(&self, handle: &mut H, _outcome: Option<P>) -> Result<ResultSet, ParseError> {
        handle
            .result_set()?
            .ok_or_else(|| ParseError::new("statement produced no result set"))
    }
}

/// First column of the first row; `None` when the result set is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstValue;

impl<H: NativeStatement + ?Sized, P> ResultParser<H, P, Option<SqlValue>> for FirstValue {
    fn parse(&self, handle: &mut H, outcome: Option<P>) -> Result<Option<SqlValue>, ParseError> {
        let rs = CollectResultSet.parse(handle, outcome)?;
        Ok(rs.first_value().cloned())
    }
}
