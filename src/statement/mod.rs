//! The unified statement pipeline.
//!
//! [`IntegratedStatement`] owns one native handle and composes three
//! pluggable strategies: a [`ParametersHandler`] binds parameters, an
//! [`Executor`] runs the handle, and a [`ResultParser`] shapes the outcome.
//! The [`Plain`], [`Prepared`] and [`Callable`] kinds pick the handle type and
//! bring fixed convenience recipes built from the [`defaults`].

mod callable;
pub mod config;
pub mod defaults;
mod integrated;
mod kind;
mod plain;
mod prepared;
pub mod strategy;

pub use callable::CallableIntegratedStatement;
pub use config::{
    Configuration, ConfigurationBuilder, ResultSetConcurrency, ResultSetHoldability,
    ResultSetShape, ResultSetType,
};
pub use integrated::{Executed, IntegratedStatement};
pub use kind::{Callable, Plain, Prepared, StatementKind};
pub use plain::PlainIntegratedStatement;
pub use prepared::PreparedIntegratedStatement;
pub use strategy::{Executor, ParametersHandler, ResultParser, StatementHandler};
