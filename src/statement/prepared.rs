use crate::error::StatementError;
use crate::native::NativeConnection;
use crate::sql::{BatchSql, Sql, SingleSql};

use super::defaults::{BindBatchSql, BindSingleSql, ExecuteUpdate, PreparedBatch};
use super::integrated::IntegratedStatement;
use super::kind::Prepared;
use super::strategy::ResultParser;

/// Statement over a prepared handle with positional parameters.
pub type PreparedIntegratedStatement<'c, C> = IntegratedStatement<'c, C, Prepared>;

type Handle<C> = <C as NativeConnection>::Prepared;

impl<C: NativeConnection> IntegratedStatement<'_, C, Prepared> {
    /// Bind `sql`'s parameters and return the update count.
    ///
    /// The handle is created from `sql`'s text when none exists yet; an
    /// existing handle is reused as is.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding or execution.
    pub fn update(&mut self, sql: &SingleSql) -> Result<u64, StatementError> {
        self.bind_single(sql)?;
        self.execute_with(&ExecuteUpdate)
    }

    /// Like [`update`](Self::update), with the count fed to `parser`.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding, execution or parsing.
    pub fn update_with<R, RP>(&mut self, sql: &SingleSql, parser: &RP) -> Result<R, StatementError>
    where
        RP: ResultParser<Handle<C>, u64, R> + ?Sized,
    {
        self.bind_single(sql)?;
        self.execute_and_parse(&ExecuteUpdate, parser)
    }

    /// Bind `sql`'s parameters, execute, and parse the result set.
    ///
    /// # Errors
    /// [`StatementError::Parse`] when the statement produced no result set or
    /// the parser fails, otherwise as [`update`](Self::update).
    pub fn query<R, RP>(&mut self, sql: &SingleSql, parser: &RP) -> Result<R, StatementError>
    where
        RP: ResultParser<Handle<C>, bool, R> + ?Sized,
    {
        self.bind_single(sql)?;
        self.parse_with::<bool, R, RP>(parser)
    }

    /// Bind and queue every row of `sql`, then run the batch.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding or execution.
    pub fn execute_batch(&mut self, sql: &BatchSql) -> Result<Vec<u64>, StatementError> {
        self.bind_batch(sql)?;
        self.execute_with(&PreparedBatch)
    }

    /// Like [`execute_batch`](Self::execute_batch), with the counts fed to `parser`.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation, binding, execution or parsing.
    pub fn execute_batch_with<R, RP>(
        &mut self,
        sql: &BatchSql,
        parser: &RP,
    ) -> Result<R, StatementError>
    where
        RP: ResultParser<Handle<C>, Vec<u64>, R> + ?Sized,
    {
        self.bind_batch(sql)?;
        self.execute_and_parse(&PreparedBatch, parser)
    }

    fn bind_single(&mut self, sql: &SingleSql) -> Result<(), StatementError> {
        self.ensure_created(sql.sql())?;
        self.parameterize(&BindSingleSql, sql)?;
        Ok(())
    }

    fn bind_batch(&mut self, sql: &BatchSql) -> Result<(), StatementError> {
        self.ensure_created(sql.sql())?;
        self.parameterize(&BindBatchSql, sql)?;
        Ok(())
    }
}
