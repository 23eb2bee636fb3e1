use crate::error::StatementError;
use crate::native::CallableConnection;
use crate::sql::{CallableSql, Sql};

use super::defaults::{BindCallableSql, ExecutePrepared};
use super::integrated::IntegratedStatement;
use super::kind::Callable;
use super::strategy::ResultParser;

/// Statement over a callable handle for stored-procedure calls.
pub type CallableIntegratedStatement<'c, C> = IntegratedStatement<'c, C, Callable>;

impl<C: CallableConnection> IntegratedStatement<'_, C, Callable> {
    /// Bind and register `sql`'s parameters, then execute the call.
    ///
    /// Returns `true` when the call produced a result set. OUT values are read
    /// from [`handle`](Self::handle) afterwards.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding or execution.
    pub fn call(&mut self, sql: &CallableSql) -> Result<bool, StatementError> {
        self.bind_call(sql)?;
        self.execute_with(&ExecutePrepared)
    }

    /// Like [`call`](Self::call), with the handle and the result-set flag fed
    /// to `parser`.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding, execution or parsing.
    pub fn call_with<R, RP>(&mut self, sql: &CallableSql, parser: &RP) -> Result<R, StatementError>
    where
        RP: ResultParser<C::Callable, bool, R> + ?Sized,
    {
        self.bind_call(sql)?;
        self.execute_and_parse(&ExecutePrepared, parser)
    }

    fn bind_call(&mut self, sql: &CallableSql) -> Result<(), StatementError> {
        self.ensure_created(sql.sql())?;
        self.parameterize(&BindCallableSql, sql)?;
        Ok(())
    }
}
