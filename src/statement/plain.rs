use crate::error::StatementError;
use crate::native::NativeConnection;
use crate::sql::{BatchSql, Sql};

use super::defaults::{ExecutePlain, PlainBatch};
use super::integrated::IntegratedStatement;
use super::kind::Plain;

/// Statement over a plain handle; the text is supplied at execution time.
pub type PlainIntegratedStatement<'c, C> = IntegratedStatement<'c, C, Plain>;

impl<C: NativeConnection> IntegratedStatement<'_, C, Plain> {
    /// Execute `sql`; `true` when it produced a result set.
    ///
    /// A plain handle is not tied to its text, so an existing handle is reused
    /// and `sql` becomes the recorded text.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation or execution.
    pub fn execute_sql(&mut self, sql: &str) -> Result<bool, StatementError> {
        self.use_text(sql)?;
        self.execute_with(&ExecutePlain)
    }

    /// Split `sql`'s text on `;`, queue each statement and run the batch.
    ///
    /// Parameter rows are ignored; use a prepared statement for those.
    ///
    /// # Errors
    /// Any [`StatementError`] from creation or execution.
    pub fn execute_batch_sql(&mut self, sql: &BatchSql) -> Result<Vec<u64>, StatementError> {
        self.use_text(sql.sql())?;
        self.execute_with(&PlainBatch)
    }

    fn use_text(&mut self, sql: &str) -> Result<(), StatementError> {
        if self.handle.is_none() {
            self.create_statement(sql)?;
        } else {
            self.sql = Some(sql.to_string());
        }
        Ok(())
    }
}
