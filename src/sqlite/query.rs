use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Statement, params_from_iter};

use crate::error::DriverError;
use crate::results::ResultSet;

use super::params::sqlite_value_to_sql_value;

/// What one execution of a statement produced.
#[derive(Debug)]
pub(crate) enum Outcome {
    Rows(ResultSet),
    Count(u64),
}

/// Build a result set by running a row-returning statement.
///
/// # Errors
/// Returns [`DriverError`] if execution or value extraction fails.
pub fn build_result_set(
    stmt: &mut Statement<'_>,
    params: &[Value],
    capacity: usize,
) -> Result<ResultSet, DriverError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(capacity);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(params_from_iter(params.iter()))?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            let value: Value = row.get(i)?;
            row_values.push(sqlite_value_to_sql_value(value));
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Prepare (through the connection's statement cache) and run `sql` once.
pub(crate) fn run(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[Value],
    fetch_size: usize,
) -> Result<Outcome, DriverError> {
    let mut stmt = conn.prepare_cached(sql)?;
    if stmt.column_count() > 0 {
        build_result_set(&mut stmt, params, fetch_size).map(Outcome::Rows)
    } else {
        let changed = stmt.execute(params_from_iter(params.iter()))?;
        Ok(Outcome::Count(changed as u64))
    }
}

/// Run `sql` and insist it is not a query.
pub(crate) fn run_update(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[Value],
) -> Result<u64, DriverError> {
    match run(conn, sql, params, 0)? {
        Outcome::Count(count) => Ok(count),
        Outcome::Rows(_) => Err(DriverError::new(format!(
            "statement returned a result set where an update count was expected: {sql}"
        ))),
    }
}
