use std::error::Error as StdError;

use thiserror::Error;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Raised by a builder when an accumulated invariant is violated.
///
/// Always produced before any native call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SQL build error: {0}")]
pub struct BuildError(pub String);

impl BuildError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        BuildError(message.into())
    }
}

/// A failure reported by the underlying database client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl DriverError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        DriverError::with_source(err.to_string(), err)
    }
}

/// Raised by a result parser, or synthesized by the pipeline when a parser
/// was supplied but the statement produced no result set.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DriverError> for ParseError {
    fn from(err: DriverError) -> Self {
        ParseError::with_source(format!("Reading result failed: {}", err.message()), err)
    }
}

/// Errors surfaced by the statement pipeline.
///
/// Every variant except `Build` carries the SQL text the statement was
/// created with (empty when none was recorded yet).
#[derive(Debug, Error)]
pub enum StatementError {
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Structural misuse of the pipeline, or a native failure while creating,
    /// configuring, binding, inspecting or closing the handle.
    #[error("Statement lifecycle error for SQL: {sql}, Error: {message}")]
    Lifecycle {
        sql: String,
        message: String,
        #[source]
        source: Option<DriverError>,
    },

    /// The native execute call failed, or no strategy was supplied.
    #[error("Statement execution failed for SQL: {sql}, Error: {message}")]
    Execution {
        sql: String,
        message: String,
        #[source]
        source: Option<DriverError>,
    },

    /// The statement ran but its result could not be parsed.
    #[error("Result parsing failed for SQL: {sql}, Error: {source}")]
    Parse {
        sql: String,
        #[source]
        source: ParseError,
    },
}

impl StatementError {
    pub(crate) fn lifecycle(sql: &str, message: impl Into<String>) -> Self {
        StatementError::Lifecycle {
            sql: sql.to_string(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn lifecycle_from(sql: &str, operation: &str, err: DriverError) -> Self {
        StatementError::Lifecycle {
            sql: sql.to_string(),
            message: format!("{operation} failed: {}", err.message()),
            source: Some(err),
        }
    }

    pub(crate) fn execution(sql: &str, message: impl Into<String>) -> Self {
        StatementError::Execution {
            sql: sql.to_string(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn execution_from(sql: &str, err: DriverError) -> Self {
        StatementError::Execution {
            sql: sql.to_string(),
            message: err.message().to_string(),
            source: Some(err),
        }
    }

    pub(crate) fn parse(sql: &str, err: ParseError) -> Self {
        StatementError::Parse {
            sql: sql.to_string(),
            source: err,
        }
    }

    /// SQL text attached to the error, if any.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            StatementError::Build(_) => None,
            StatementError::Lifecycle { sql, .. }
            | StatementError::Execution { sql, .. }
            | StatementError::Parse { sql, .. } => Some(sql),
        }
    }

    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, StatementError::Lifecycle { .. })
    }

    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, StatementError::Execution { .. })
    }

    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, StatementError::Parse { .. })
    }
}
