use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::error::{ParseError, StatementError};
use crate::native::NativeStatement;

use super::config::Configuration;
use super::kind::StatementKind;
use super::strategy::{Executor, ParametersHandler, ResultParser, StatementHandler};

/// Outcome of [`IntegratedStatement::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Executed<P, R> {
    /// Only an executor ran; this is its raw result.
    Raw(P),
    /// A parser ran; this is its result.
    Parsed(R),
}

impl<P, R> Executed<P, R> {
    #[must_use]
    pub fn into_raw(self) -> Option<P> {
        match self {
            Executed::Raw(p) => Some(p),
            Executed::Parsed(_) => None,
        }
    }

    #[must_use]
    pub fn into_parsed(self) -> Option<R> {
        match self {
            Executed::Raw(_) => None,
            Executed::Parsed(r) => Some(r),
        }
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Executed::Raw(_))
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Executed::Parsed(_))
    }
}

/// One native statement handle driven through
/// create → configure → parameterize → execute → parse → close.
///
/// The connection is borrowed, never closed here. The handle is released by
/// [`close`](Self::close) or, failing that, on drop.
///
/// ```rust
/// use sql_integrated::prelude::*;
/// use sql_integrated::test_utils::RecordingConnection;
///
/// let conn = RecordingConnection::new();
/// conn.script_update_count(1);
///
/// let sql = BoundSingleSqlBuilder::with_expected(1)
///     .append_sql("DELETE FROM users WHERE id = ?")
///     .append_sql_parameter(42)
///     .build()?;
///
/// let mut stmt = PreparedIntegratedStatement::new(&conn);
/// assert_eq!(stmt.update(&sql)?, 1);
/// stmt.close()?;
/// assert!(stmt.is_closed()?);
/// # Ok::<(), StatementError>(())
/// ```
pub struct IntegratedStatement<'c, C, K: StatementKind<C>> {
    connection: &'c C,
    configuration: Option<Configuration>,
    pub(crate) handle: Option<K::Handle>,
    pub(crate) sql: Option<String>,
    kind: PhantomData<K>,
}

impl<'c, C, K: StatementKind<C>> IntegratedStatement<'c, C, K> {
    #[must_use]
    pub fn new(connection: &'c C) -> Self {
        Self {
            connection,
            configuration: None,
            handle: None,
            sql: None,
            kind: PhantomData,
        }
    }

    #[must_use]
    pub fn connection(&self) -> &'c C {
        self.connection
    }

    /// SQL text recorded by the last [`create_statement`](Self::create_statement).
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    #[must_use]
    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    #[must_use]
    pub fn handle(&self) -> Option<&K::Handle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut K::Handle> {
        self.handle.as_mut()
    }

    /// Store options for the next handle creation. Nothing is validated and
    /// an existing handle is not touched.
    pub fn set_configuration(&mut self, configuration: Configuration) -> &mut Self {
        self.configuration = Some(configuration);
        self
    }

    /// Create the native handle for `sql` and apply the configuration.
    ///
    /// An existing handle is closed first.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] when `sql` is empty or the client fails
    /// to create or configure the handle.
    pub fn create_statement(&mut self, sql: impl Into<String>) -> Result<&mut Self, StatementError> {
        let sql = sql.into();
        if self.handle.is_some() {
            self.close()?;
        }
        if sql.is_empty() {
            self.sql = Some(sql);
            return Err(StatementError::lifecycle(
                "",
                "SQL is empty, Expected: non-empty SQL string",
            ));
        }

        let mut handle = K::create(self.connection, &sql, self.configuration.as_ref())
            .map_err(|e| StatementError::lifecycle_from(&sql, "Statement creation", e))?;
        if let Some(cfg) = &self.configuration {
            if let Err(e) = cfg.apply(&mut handle) {
                if let Err(close_err) = handle.close() {
                    warn!(
                        kind = K::NAME,
                        error = %close_err,
                        "failed to close statement after configuration error"
                    );
                }
                return Err(StatementError::lifecycle_from(&sql, "Applying configuration", e));
            }
            debug!(
                kind = K::NAME,
                query_timeout_secs = cfg.query_timeout_secs,
                fetch_size = cfg.fetch_size,
                "applied statement configuration"
            );
        }

        debug!(kind = K::NAME, sql = %sql, "created statement handle");
        self.handle = Some(handle);
        self.sql = Some(sql);
        Ok(self)
    }

    /// Bind `parameters` into the handle through `handler`.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] when no handle exists or binding fails.
    pub fn parameterize<PH, P>(
        &mut self,
        handler: &PH,
        parameters: &P,
    ) -> Result<&mut Self, StatementError>
    where
        PH: ParametersHandler<K::Handle, P> + ?Sized,
        P: ?Sized,
    {
        let (handle, sql) = self.parts()?;
        handler
            .parameterize(handle, parameters)
            .map_err(|e| StatementError::lifecycle_from(sql, "Statement parameterization", e))?;
        debug!(kind = K::NAME, sql = %sql, "parameterized statement");
        Ok(self)
    }

    /// Run `handler` against the bound handle.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] when no handle exists or the handler fails.
    pub fn handle_statement<SH>(&mut self, handler: &SH) -> Result<&mut Self, StatementError>
    where
        SH: StatementHandler<K::Handle> + ?Sized,
    {
        let (handle, sql) = self.parts()?;
        handler
            .handle(handle)
            .map_err(|e| StatementError::lifecycle_from(sql, "Statement handle", e))?;
        Ok(self)
    }

    /// Execute with any combination of executor and parser.
    ///
    /// | executor | parser | behaviour |
    /// |----------|--------|-----------|
    /// | `None` | `None` | [`StatementError::Execution`] |
    /// | `None` | `Some` | default execution, then parse; no result set is a [`StatementError::Parse`] |
    /// | `Some` | `None` | [`Executed::Raw`] with the executor's result |
    /// | `Some` | `Some` | [`Executed::Parsed`] with the parser fed the executor's result |
    ///
    /// # Errors
    /// See the table; native failures while executing are
    /// [`StatementError::Execution`], parser failures [`StatementError::Parse`].
    pub fn execute<P, R>(
        &mut self,
        executor: Option<&dyn Executor<K::Handle, P>>,
        parser: Option<&dyn ResultParser<K::Handle, P, R>>,
    ) -> Result<Executed<P, R>, StatementError> {
        match (executor, parser) {
            (None, None) => Err(StatementError::execution(
                self.sql.as_deref().unwrap_or(""),
                "Executor and Result parser is null, Expected: at least one of executor or result parser to be non-null",
            )),
            (None, Some(parser)) => self.parse_with(parser).map(Executed::Parsed),
            (Some(executor), None) => self.execute_with(executor).map(Executed::Raw),
            (Some(executor), Some(parser)) => self
                .execute_and_parse(executor, parser)
                .map(Executed::Parsed),
        }
    }

    /// Run `executor` and return its raw result.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] without a handle,
    /// [`StatementError::Execution`] when the executor fails.
    pub fn execute_with<E, P>(&mut self, executor: &E) -> Result<P, StatementError>
    where
        E: Executor<K::Handle, P> + ?Sized,
    {
        let (handle, sql) = self.parts()?;
        debug!(kind = K::NAME, sql = %sql, "executing statement");
        executor
            .execute(handle, sql)
            .map_err(|e| StatementError::execution_from(sql, e))
    }

    /// Run the default execution, then `parser` with no executor outcome.
    ///
    /// # Errors
    /// [`StatementError::Parse`] when the statement produced no result set or
    /// the parser fails; [`StatementError::Execution`] when execution fails.
    pub fn parse_with<P, R, RP>(&mut self, parser: &RP) -> Result<R, StatementError>
    where
        RP: ResultParser<K::Handle, P, R> + ?Sized,
    {
        let (handle, sql) = self.parts()?;
        debug!(kind = K::NAME, sql = %sql, "executing statement for parsing");
        let has_result_set =
            K::default_execute(handle, sql).map_err(|e| StatementError::execution_from(sql, e))?;
        if !has_result_set {
            return Err(StatementError::parse(
                sql,
                ParseError::new(
                    "Cannot parse result for update operation, Expected: query operation that returns result set, Actual: update operation with no result set",
                ),
            ));
        }
        parser
            .parse(handle, None)
            .map_err(|e| StatementError::parse(sql, e))
    }

    /// Run `executor`, then feed its result to `parser`.
    ///
    /// # Errors
    /// [`StatementError::Execution`] when the executor fails,
    /// [`StatementError::Parse`] when the parser fails.
    pub fn execute_and_parse<E, RP, P, R>(
        &mut self,
        executor: &E,
        parser: &RP,
    ) -> Result<R, StatementError>
    where
        E: Executor<K::Handle, P> + ?Sized,
        RP: ResultParser<K::Handle, P, R> + ?Sized,
    {
        let (handle, sql) = self.parts()?;
        debug!(kind = K::NAME, sql = %sql, "executing statement");
        let outcome = executor
            .execute(handle, sql)
            .map_err(|e| StatementError::execution_from(sql, e))?;
        parser
            .parse(handle, Some(outcome))
            .map_err(|e| StatementError::parse(sql, e))
    }

    /// `true` when no handle exists or the handle reports itself closed.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] when the handle cannot report its state.
    pub fn is_closed(&self) -> Result<bool, StatementError> {
        match &self.handle {
            None => Ok(true),
            Some(handle) => handle.is_closed().map_err(|e| {
                StatementError::lifecycle_from(
                    self.sql.as_deref().unwrap_or(""),
                    "Checking statement closure status",
                    e,
                )
            }),
        }
    }

    /// Release the handle. Later calls, and calls before creation, do nothing.
    ///
    /// # Errors
    /// [`StatementError::Lifecycle`] when the client fails to close the
    /// handle; the handle is kept so a later close can retry.
    pub fn close(&mut self) -> Result<(), StatementError> {
        if let Some(handle) = self.handle.as_mut() {
            handle.close().map_err(|e| {
                StatementError::lifecycle_from(
                    self.sql.as_deref().unwrap_or(""),
                    "Closing statement",
                    e,
                )
            })?;
            self.handle = None;
            debug!(kind = K::NAME, "closed statement handle");
        }
        Ok(())
    }

    pub(crate) fn ensure_created(&mut self, sql: &str) -> Result<(), StatementError> {
        if self.handle.is_none() {
            self.create_statement(sql)?;
        }
        Ok(())
    }

    fn parts(&mut self) -> Result<(&mut K::Handle, &str), StatementError> {
        let sql = self.sql.as_deref().unwrap_or("");
        match self.handle.as_mut() {
            Some(handle) => Ok((handle, sql)),
            None => Err(StatementError::lifecycle(
                sql,
                "Statement is null, Expected: initialized statement object, Actual: null statement",
            )),
        }
    }
}

impl<C, K: StatementKind<C>> Drop for IntegratedStatement<'_, C, K> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(kind = K::NAME, error = %err, "failed to close statement on drop");
        }
    }
}

impl<C, K: StatementKind<C>> fmt::Debug for IntegratedStatement<'_, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegratedStatement")
            .field("kind", &K::NAME)
            .field("sql", &self.sql)
            .field("configuration", &self.configuration)
            .field("bound", &self.handle.is_some())
            .finish()
    }
}
