//! Single-operation contracts injected into the statement pipeline.
//!
//! Every trait is implemented for matching closures, so ad-hoc strategies do
//! not need a named type:
//! ```rust
//! use sql_integrated::prelude::*;
//! use sql_integrated::test_utils::RecordingPrepared;
//!
//! let bind_two = |handle: &mut RecordingPrepared, params: &(i64, String)| {
//!     handle.bind(1, &SqlValue::Int(params.0))?;
//!     handle.bind(2, &SqlValue::Text(params.1.clone()))
//! };
//! # fn takes<H: ParametersHandler<RecordingPrepared, (i64, String)>>(_: &H) {}
//! # takes(&bind_two);
//! ```

use crate::error::{DriverError, ParseError};

/// Binds a parameter payload into a native handle.
pub trait ParametersHandler<H: ?Sized, P: ?Sized> {
    fn parameterize(&self, handle: &mut H, parameters: &P) -> Result<(), DriverError>;
}

impl<H: ?Sized, P: ?Sized, F> ParametersHandler<H, P> for F
where
    F: Fn(&mut H, &P) -> Result<(), DriverError>,
{
    fn parameterize(&self, handle: &mut H, parameters: &P) -> Result<(), DriverError> {
        self(handle, parameters)
    }
}

/// Runs a native handle and returns its raw outcome.
///
/// `sql` is the text the statement was created with.
pub trait Executor<H: ?Sized, T> {
    fn execute(&self, handle: &mut H, sql: &str) -> Result<T, DriverError>;
}

impl<H: ?Sized, T, F> Executor<H, T> for F
where
    F: Fn(&mut H, &str) -> Result<T, DriverError>,
{
    fn execute(&self, handle: &mut H, sql: &str) -> Result<T, DriverError> {
        self(handle, sql)
    }
}

/// Turns an executed handle, plus the executor's raw outcome when an
/// executor ran, into the caller's result.
pub trait ResultParser<H: ?Sized, P, R> {
    fn parse(&self, handle: &mut H, outcome: Option<P>) -> Result<R, ParseError>;
}

impl<H: ?Sized, P, R, F> ResultParser<H, P, R> for F
where
    F: Fn(&mut H, Option<P>) -> Result<R, ParseError>,
{
    fn parse(&self, handle: &mut H, outcome: Option<P>) -> Result<R, ParseError> {
        self(handle, outcome)
    }
}

/// Arbitrary work against the bound handle, for operations the pipeline does
/// not model.
pub trait StatementHandler<H: ?Sized> {
    fn handle(&self, handle: &mut H) -> Result<(), DriverError>;
}

impl<H: ?Sized, F> StatementHandler<H> for F
where
    F: Fn(&mut H) -> Result<(), DriverError>,
{
    fn handle(&self, handle: &mut H) -> Result<(), DriverError> {
        self(handle)
    }
}
