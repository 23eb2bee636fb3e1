use serde::{Deserialize, Serialize};

use crate::error::DriverError;
use crate::native::NativeStatement;

/// Scrolling behaviour requested for result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSetType {
    ForwardOnly,
    ScrollInsensitive,
    ScrollSensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSetConcurrency {
    ReadOnly,
    Updatable,
}

/// Whether open result sets survive a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSetHoldability {
    HoldOverCommit,
    CloseAtCommit,
}

/// Result-set options handed to the callable handle factory.
///
/// `None` leaves the handle's default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSetShape {
    pub result_set_type: Option<ResultSetType>,
    pub concurrency: Option<ResultSetConcurrency>,
    pub holdability: Option<ResultSetHoldability>,
}

/// Options applied to a statement handle right after it is created.
///
/// ```rust
/// use sql_integrated::prelude::*;
///
/// let cfg = Configuration::builder().query_timeout(5).fetch_size(200).finish();
/// assert_eq!(cfg.query_timeout_secs, 5);
///
/// let from_file = Configuration::from_json_str(r#"{ "fetch_size": 50 }"#).unwrap();
/// assert_eq!(from_file.fetch_size, 50);
/// assert_eq!(from_file.query_timeout_secs, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// 0 leaves the handle's timeout untouched.
    pub query_timeout_secs: u32,
    /// 0 leaves the handle's fetch size untouched.
    pub fetch_size: u32,
    pub result_set_type: Option<ResultSetType>,
    pub result_set_concurrency: Option<ResultSetConcurrency>,
    pub result_set_holdability: Option<ResultSetHoldability>,
}

impl Configuration {
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the document does not match.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn result_set_shape(&self) -> ResultSetShape {
        ResultSetShape {
            result_set_type: self.result_set_type,
            concurrency: self.result_set_concurrency,
            holdability: self.result_set_holdability,
        }
    }

    /// Forward timeout, then fetch size, skipping unset values.
    pub(crate) fn apply<H: NativeStatement>(&self, handle: &mut H) -> Result<(), DriverError> {
        if self.query_timeout_secs > 0 {
            handle.set_query_timeout(self.query_timeout_secs)?;
        }
        if self.fetch_size > 0 {
            handle.set_fetch_size(self.fetch_size)?;
        }
        Ok(())
    }
}

/// Fluent builder for [`Configuration`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    cfg: Configuration,
}

impl ConfigurationBuilder {
    #[must_use]
    pub fn query_timeout(mut self, seconds: u32) -> Self {
        self.cfg.query_timeout_secs = seconds;
        self
    }

    #[must_use]
    pub fn fetch_size(mut self, rows: u32) -> Self {
        self.cfg.fetch_size = rows;
        self
    }

    #[must_use]
    pub fn result_set_type(mut self, result_set_type: ResultSetType) -> Self {
        self.cfg.result_set_type = Some(result_set_type);
        self
    }

    #[must_use]
    pub fn result_set_concurrency(mut self, concurrency: ResultSetConcurrency) -> Self {
        self.cfg.result_set_concurrency = Some(concurrency);
        self
    }

    #[must_use]
    pub fn result_set_holdability(mut self, holdability: ResultSetHoldability) -> Self {
        self.cfg.result_set_holdability = Some(holdability);
        self
    }

    #[must_use]
    pub fn finish(self) -> Configuration {
        self.cfg
    }
}
