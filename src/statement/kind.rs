use crate::error::DriverError;
use crate::native::{
    CallableConnection, NativeConnection, NativeStatement, PlainStatement, PreparedStatement,
};

use super::config::Configuration;

/// Selects which native handle an
/// [`IntegratedStatement`](super::IntegratedStatement) owns, how it is created,
/// and what "default execution" means for it.
pub trait StatementKind<C> {
    type Handle: NativeStatement;

    /// Short label used in log events.
    const NAME: &'static str;

    fn create(
        connection: &C,
        sql: &str,
        configuration: Option<&Configuration>,
    ) -> Result<Self::Handle, DriverError>;

    /// Execute and report whether a result set was produced.
    fn default_execute(handle: &mut Self::Handle, sql: &str) -> Result<bool, DriverError>;
}

/// Plain statements: the handle receives its text at execution time.
#[derive(Debug, Clone, Copy)]
pub enum Plain {}

/// Prepared statements with positional parameters.
#[derive(Debug, Clone, Copy)]
pub enum Prepared {}

/// Stored-procedure calls with IN/OUT parameters.
#[derive(Debug, Clone, Copy)]
pub enum Callable {}

impl<C: NativeConnection> StatementKind<C> for Plain {
    type Handle = C::Statement;

    const NAME: &'static str = "plain";

    fn create(
        connection: &C,
        _sql: &str,
        _configuration: Option<&Configuration>,
    ) -> Result<Self::Handle, DriverError> {
        connection.create_statement()
    }

    fn default_execute(handle: &mut Self::Handle, sql: &str) -> Result<bool, DriverError> {
        PlainStatement::execute(handle, sql)
    }
}

impl<C: NativeConnection> StatementKind<C> for Prepared {
    type Handle = C::Prepared;

    const NAME: &'static str = "prepared";

    fn create(
        connection: &C,
        sql: &str,
        _configuration: Option<&Configuration>,
    ) -> Result<Self::Handle, DriverError> {
        connection.prepare_statement(sql)
    }

    fn default_execute(handle: &mut Self::Handle, _sql: &str) -> Result<bool, DriverError> {
        PreparedStatement::execute(handle)
    }
}

impl<C: CallableConnection> StatementKind<C> for Callable {
    type Handle = C::Callable;

    const NAME: &'static str = "callable";

    fn create(
        connection: &C,
        sql: &str,
        configuration: Option<&Configuration>,
    ) -> Result<Self::Handle, DriverError> {
        let shape = configuration.map(Configuration::result_set_shape);
        connection.prepare_call(sql, shape.as_ref())
    }

    fn default_execute(handle: &mut Self::Handle, _sql: &str) -> Result<bool, DriverError> {
        PreparedStatement::execute(handle)
    }
}
