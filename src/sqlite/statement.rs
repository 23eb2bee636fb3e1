use std::time::Duration;

use rusqlite::types::Value;
use tracing::trace;

use crate::error::DriverError;
use crate::native::{NativeStatement, PlainStatement, PreparedStatement};
use crate::results::ResultSet;
use crate::types::SqlValue;

use super::params::sql_value_to_sqlite_value;
use super::query::{Outcome, run, run_update};

/// State shared by both SQLite handle types.
#[derive(Debug, Default)]
struct HandleState {
    closed: bool,
    query_timeout: Option<Duration>,
    fetch_size: usize,
    pending: Option<ResultSet>,
    update_count: Option<u64>,
}

impl HandleState {
    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            Err(DriverError::new("statement is closed"))
        } else {
            Ok(())
        }
    }

    fn record(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Rows(rs) => {
                self.pending = Some(rs);
                self.update_count = None;
                true
            }
            Outcome::Count(count) => {
                self.pending = None;
                self.update_count = Some(count);
                false
            }
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.pending = None;
    }
}

macro_rules! impl_native_statement {
    ($ty:ident) => {
        impl NativeStatement for $ty<'_> {
            fn set_query_timeout(&mut self, seconds: u32) -> Result<(), DriverError> {
                self.state.ensure_open()?;
                self.state.query_timeout = Some(Duration::from_secs(u64::from(seconds)));
                Ok(())
            }

            fn set_fetch_size(&mut self, rows: u32) -> Result<(), DriverError> {
                self.state.ensure_open()?;
                self.state.fetch_size = rows as usize;
                Ok(())
            }

            fn result_set(&mut self) -> Result<Option<ResultSet>, DriverError> {
                self.state.ensure_open()?;
                Ok(self.state.pending.take())
            }

            fn update_count(&self) -> Result<Option<u64>, DriverError> {
                self.state.ensure_open()?;
                Ok(self.state.update_count)
            }

            fn is_closed(&self) -> Result<bool, DriverError> {
                Ok(self.state.closed)
            }

            fn close(&mut self) -> Result<(), DriverError> {
                self.state.close();
                Ok(())
            }
        }

        impl $ty<'_> {
            /// Timeout forwarded from the configuration. SQLite statements
            /// cannot be interrupted per statement, so it is only recorded.
            #[must_use]
            pub fn query_timeout(&self) -> Option<Duration> {
                self.state.query_timeout
            }
        }
    };
}

/// Plain SQLite handle; statements are supplied per call.
#[derive(Debug)]
pub struct SqliteStatement<'c> {
    conn: &'c rusqlite::Connection,
    batch: Vec<String>,
    state: HandleState,
}

impl<'c> SqliteStatement<'c> {
    pub(crate) fn new(conn: &'c rusqlite::Connection) -> Self {
        Self {
            conn,
            batch: Vec::new(),
            state: HandleState::default(),
        }
    }
}

impl_native_statement!(SqliteStatement);

impl PlainStatement for SqliteStatement<'_> {
    fn execute(&mut self, sql: &str) -> Result<bool, DriverError> {
        self.state.ensure_open()?;
        let outcome = run(self.conn, sql, &[], self.state.fetch_size)?;
        Ok(self.state.record(outcome))
    }

    fn execute_update(&mut self, sql: &str) -> Result<u64, DriverError> {
        self.state.ensure_open()?;
        let count = run_update(self.conn, sql, &[])?;
        self.state.record(Outcome::Count(count));
        Ok(count)
    }

    fn add_batch(&mut self, sql: &str) -> Result<(), DriverError> {
        self.state.ensure_open()?;
        self.batch.push(sql.to_string());
        Ok(())
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError> {
        self.state.ensure_open()?;
        let queued = std::mem::take(&mut self.batch);
        let mut counts = Vec::with_capacity(queued.len());
        for sql in &queued {
            counts.push(run_update(self.conn, sql, &[])?);
        }
        trace!(statements = counts.len(), "sqlite plain batch executed");
        Ok(counts)
    }
}

/// Prepared SQLite handle.
///
/// The text is compiled once at creation to surface syntax errors early;
/// executions go through rusqlite's statement cache. Bound values persist
/// across executions until rebound or cleared.
#[derive(Debug)]
pub struct SqlitePreparedStatement<'c> {
    conn: &'c rusqlite::Connection,
    sql: String,
    bound: Vec<Value>,
    batch: Vec<Vec<Value>>,
    state: HandleState,
}

impl<'c> SqlitePreparedStatement<'c> {
    pub(crate) fn prepare(conn: &'c rusqlite::Connection, sql: &str) -> Result<Self, DriverError> {
        conn.prepare_cached(sql)?;
        Ok(Self {
            conn,
            sql: sql.to_string(),
            bound: Vec::new(),
            batch: Vec::new(),
            state: HandleState::default(),
        })
    }

    /// Access the raw SQL string of the prepared statement.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values currently bound, in position order.
    #[must_use]
    pub fn bound_values(&self) -> &[Value] {
        &self.bound
    }
}

impl_native_statement!(SqlitePreparedStatement);

impl PreparedStatement for SqlitePreparedStatement<'_> {
    fn bind(&mut self, index: usize, value: &SqlValue) -> Result<(), DriverError> {
        self.state.ensure_open()?;
        if index == 0 {
            return Err(DriverError::new("parameter indices start at 1"));
        }
        if self.bound.len() < index {
            self.bound.resize(index, Value::Null);
        }
        self.bound[index - 1] = sql_value_to_sqlite_value(value);
        Ok(())
    }

    fn clear_parameters(&mut self) -> Result<(), DriverError> {
        self.state.ensure_open()?;
        self.bound.clear();
        Ok(())
    }

    fn add_batch(&mut self) -> Result<(), DriverError> {
        self.state.ensure_open()?;
        self.batch.push(self.bound.clone());
        Ok(())
    }

    fn execute(&mut self) -> Result<bool, DriverError> {
        self.state.ensure_open()?;
        let outcome = run(self.conn, &self.sql, &self.bound, self.state.fetch_size)?;
        Ok(self.state.record(outcome))
    }

    fn execute_update(&mut self) -> Result<u64, DriverError> {
        self.state.ensure_open()?;
        let count = run_update(self.conn, &self.sql, &self.bound)?;
        self.state.record(Outcome::Count(count));
        Ok(count)
    }

    fn execute_batch(&mut self) -> Result<Vec<u64>, DriverError> {
        self.state.ensure_open()?;
        let queued = std::mem::take(&mut self.batch);
        let mut counts = Vec::with_capacity(queued.len());
        for row in &queued {
            counts.push(run_update(self.conn, &self.sql, row)?);
        }
        trace!(rows = counts.len(), "sqlite prepared batch executed");
        Ok(counts)
    }
}
