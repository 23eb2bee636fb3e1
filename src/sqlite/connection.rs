use crate::error::DriverError;
use crate::native::NativeConnection;

use super::statement::{SqlitePreparedStatement, SqliteStatement};

/// Borrowed `rusqlite` connection exposed as a [`NativeConnection`].
///
/// The wrapper never closes the connection; the caller keeps owning it.
///
/// ```rust
/// use sql_integrated::prelude::*;
/// use sql_integrated::sqlite::SqliteConnection;
///
/// let raw = sql_integrated::sqlite::rusqlite::Connection::open_in_memory().unwrap();
/// let conn = SqliteConnection::new(&raw);
/// let mut stmt = PlainIntegratedStatement::new(&conn);
/// stmt.execute_sql("CREATE TABLE t (id INTEGER)")?;
/// # Ok::<(), StatementError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SqliteConnection<'c> {
    conn: &'c rusqlite::Connection,
}

impl<'c> SqliteConnection<'c> {
    #[must_use]
    pub fn new(conn: &'c rusqlite::Connection) -> Self {
        Self { conn }
    }

    #[must_use]
    pub fn raw(&self) -> &'c rusqlite::Connection {
        self.conn
    }

    /// Apply WAL pragmas, as the pooled SQLite setups do before first use.
    ///
    /// # Errors
    /// Returns [`DriverError`] if the PRAGMA statements cannot be executed.
    pub fn apply_wal_pragmas(&self) -> Result<(), DriverError> {
        self.conn
            .execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        Ok(())
    }
}

impl<'c> NativeConnection for SqliteConnection<'c> {
    type Statement = SqliteStatement<'c>;
    type Prepared = SqlitePreparedStatement<'c>;

    fn create_statement(&self) -> Result<Self::Statement, DriverError> {
        Ok(SqliteStatement::new(self.conn))
    }

    fn prepare_statement(&self, sql: &str) -> Result<Self::Prepared, DriverError> {
        SqlitePreparedStatement::prepare(self.conn, sql)
    }
}
