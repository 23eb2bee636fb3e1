use crate::error::BuildError;
use crate::types::SqlValue;

use super::{Sql, SqlBuilder, describe};

/// One statement template executed once per parameter row, or several
/// `;`-separated statements executed as a plain batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSql {
    sql: String,
    parameter_rows: Vec<Vec<SqlValue>>,
}

impl BatchSql {
    #[must_use]
    pub fn new(sql: impl Into<String>, parameter_rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            sql: sql.into(),
            parameter_rows,
        }
    }

    /// Rows in the order they will be queued.
    #[must_use]
    pub fn parameter_rows(&self) -> &[Vec<SqlValue>] {
        &self.parameter_rows
    }
}

impl Sql for BatchSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn sql_info(&self) -> String {
        describe(&self.sql, &self.parameter_rows)
    }
}

/// Text-only batch accumulator.
#[derive(Debug, Clone, Default)]
pub struct BatchSqlBuilder {
    sql: String,
}

impl BatchSqlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sql(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// Append raw statement text.
    ///
    /// When the batch is submitted as distinct statements, separate them with
    /// `;` yourself.
    pub fn append_single_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl SqlBuilder for BatchSqlBuilder {
    type Output = BatchSql;

    fn build(&self) -> Result<BatchSql, BuildError> {
        Ok(BatchSql::new(self.sql.clone(), Vec::new()))
    }
}

/// Batch builder where every parameter row must hold exactly
/// `batch_parameters_size` values. Rows are checked as they are appended.
///
/// ```rust
/// use sql_integrated::prelude::*;
///
/// let mut builder = BoundBatchSqlBuilder::new(2)?;
/// builder
///     .append_single_sql("INSERT INTO t (name, n) VALUES (?, ?)")
///     .append_batch_sql_parameters(sql_values!["x", 1])?
///     .append_batch_sql_parameters(sql_values!["y", 2])?;
/// assert!(builder.append_batch_sql_parameters(sql_values!["z"]).is_err());
/// assert_eq!(builder.build()?.parameter_rows().len(), 2);
/// # Ok::<(), BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoundBatchSqlBuilder {
    text: BatchSqlBuilder,
    rows: Vec<Vec<SqlValue>>,
    batch_parameters_size: usize,
}

impl BoundBatchSqlBuilder {
    /// # Errors
    /// Returns [`BuildError`] when `batch_parameters_size` is 0.
    pub fn new(batch_parameters_size: usize) -> Result<Self, BuildError> {
        Self::with_text(BatchSqlBuilder::new(), batch_parameters_size)
    }

    /// Start from an existing text accumulator.
    ///
    /// # Errors
    /// Returns [`BuildError`] when `batch_parameters_size` is 0.
    pub fn with_text(
        text: BatchSqlBuilder,
        batch_parameters_size: usize,
    ) -> Result<Self, BuildError> {
        if batch_parameters_size == 0 {
            return Err(BuildError::new("Batch parameters size must be greater than 0."));
        }
        Ok(Self {
            text,
            rows: Vec::new(),
            batch_parameters_size,
        })
    }

    #[must_use]
    pub fn batch_parameters_size(&self) -> usize {
        self.batch_parameters_size
    }

    pub fn append_single_sql(&mut self, sql: &str) -> &mut Self {
        self.text.append_single_sql(sql);
        self
    }

    /// Append one row of parameters.
    ///
    /// # Errors
    /// Returns [`BuildError`] immediately when the row size differs from
    /// `batch_parameters_size`; the builder is left unchanged.
    pub fn append_batch_sql_parameters<I>(&mut self, row: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.append_optional_batch_sql_parameters(Some(row))
    }

    /// Like [`append_batch_sql_parameters`](Self::append_batch_sql_parameters),
    /// but `None` appends nothing. `Some` of an empty row is still a size
    /// mismatch.
    ///
    /// # Errors
    /// Returns [`BuildError`] when a present row has the wrong size.
    pub fn append_optional_batch_sql_parameters<I>(
        &mut self,
        row: Option<I>,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        let Some(row) = row else {
            return Ok(self);
        };
        let row: Vec<SqlValue> = row.into_iter().map(Into::into).collect();
        if row.len() != self.batch_parameters_size {
            return Err(BuildError::new(format!(
                "Parameter count mismatch: expected {} parameters, but got {} parameters.",
                self.batch_parameters_size,
                row.len()
            )));
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Append a row, then the text fragment it belongs to.
    ///
    /// # Errors
    /// Same as [`append_batch_sql_parameters`](Self::append_batch_sql_parameters);
    /// on error the fragment is not appended either.
    pub fn append_single_sql_with_parameters<I>(
        &mut self,
        sql_fragment: &str,
        row: I,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.append_single_sql_with_optional_parameters(sql_fragment, Some(row))
    }

    /// Like [`append_single_sql_with_parameters`](Self::append_single_sql_with_parameters);
    /// a `None` row appends only the fragment.
    ///
    /// # Errors
    /// Returns [`BuildError`] when a present row has the wrong size; the
    /// fragment is not appended then.
    pub fn append_single_sql_with_optional_parameters<I>(
        &mut self,
        sql_fragment: &str,
        row: Option<I>,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.append_optional_batch_sql_parameters(row)?;
        self.text.append_single_sql(sql_fragment);
        Ok(self)
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        self.text.sql()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }
}

impl SqlBuilder for BoundBatchSqlBuilder {
    type Output = BatchSql;

    fn build(&self) -> Result<BatchSql, BuildError> {
        Ok(BatchSql::new(self.text.sql(), self.rows.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql_values;

    #[test]
    fn zero_arity_is_rejected_at_construction() {
        let err = BoundBatchSqlBuilder::new(0).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn rejected_row_leaves_builder_untouched() {
        let mut builder = BoundBatchSqlBuilder::new(2).unwrap();
        builder
            .append_single_sql_with_parameters("INSERT INTO t VALUES (?, ?);", sql_values![1, 2])
            .unwrap();
        assert!(
            builder
                .append_single_sql_with_parameters("BROKEN", sql_values![3])
                .is_err()
        );
        assert_eq!(builder.sql(), "INSERT INTO t VALUES (?, ?);");
        assert_eq!(builder.rows().len(), 1);
    }

    #[test]
    fn empty_batch_builds_empty_rows() {
        let batch = BoundBatchSqlBuilder::new(3)
            .unwrap()
            .append_single_sql("DELETE FROM t WHERE a = ? AND b = ? AND c = ?")
            .build()
            .unwrap();
        assert!(batch.parameter_rows().is_empty());
        assert_eq!(batch.sql_info(), "sql:DELETE FROM t WHERE a = ? AND b = ? AND c = ?");
    }

    #[test]
    fn unbound_batch_keeps_raw_text() {
        let batch = BatchSqlBuilder::new()
            .append_single_sql("CREATE TABLE a (x INT);")
            .append_single_sql("CREATE TABLE b (y INT);")
            .build()
            .unwrap();
        assert_eq!(batch.sql(), "CREATE TABLE a (x INT);CREATE TABLE b (y INT);");
    }
}
