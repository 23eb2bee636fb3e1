#![cfg(feature = "sqlite")]

use sql_integrated::prelude::*;
use sql_integrated::sqlite::rusqlite;
use sql_integrated::test_utils::init_test_logging;
use tempfile::tempdir;

#[test]
fn prepared_batch_inserts_every_row() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let raw = rusqlite::Connection::open_in_memory()?;
    raw.execute_batch("CREATE TABLE t (name TEXT, n INTEGER);")?;
    let conn = SqliteConnection::new(&raw);

    let batch = BoundBatchSqlBuilder::new(2)?
        .append_single_sql("INSERT INTO t (name, n) VALUES (?, ?)")
        .append_batch_sql_parameters(sql_values!["x", 1])?
        .append_batch_sql_parameters(sql_values!["y", 2])?
        .build()?;
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    assert_eq!(stmt.execute_batch(&batch)?, vec![1, 1]);

    let total: i64 = raw.query_row("SELECT SUM(n) FROM t", [], |r| r.get(0))?;
    assert_eq!(total, 3);
    let names: Vec<String> = raw
        .prepare("SELECT name FROM t ORDER BY rowid")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<_, _>>()?;
    assert_eq!(names, vec!["x", "y"]);
    Ok(())
}

#[test]
fn plain_batch_runs_each_statement() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("batch.db");
    let raw = rusqlite::Connection::open(&path)?;
    let conn = SqliteConnection::new(&raw);
    conn.apply_wal_pragmas()?;

    let batch = BatchSqlBuilder::new()
        .append_single_sql("CREATE TABLE a (x INTEGER);")
        .append_single_sql("INSERT INTO a VALUES (1);")
        .append_single_sql("INSERT INTO a VALUES (2);")
        .build()?;
    let mut stmt = PlainIntegratedStatement::new(&conn);
    assert_eq!(stmt.execute_batch_sql(&batch)?, vec![0, 1, 1]);

    let count: i64 = raw.query_row("SELECT COUNT(*) FROM a", [], |r| r.get(0))?;
    assert_eq!(count, 2);
    Ok(())
}

#[test]
fn plain_query_is_parsed_from_the_handle() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    let conn = SqliteConnection::new(&raw);

    let mut stmt = PlainIntegratedStatement::new(&conn);
    stmt.execute_sql("CREATE TABLE kv (k TEXT, v TEXT)")?;
    stmt.execute_sql("INSERT INTO kv VALUES ('a', '1'), ('b', '2')")?;
    assert!(stmt.execute_sql("SELECT k, v FROM kv ORDER BY k")?);

    let rs = stmt
        .handle_mut()
        .and_then(|h| h.result_set().ok().flatten())
        .expect("pending rows");
    assert_eq!(rs.len(), 2);
    assert_eq!(
        rs.get_column_names().map(|c| c.as_slice().to_vec()),
        Some(vec!["k".to_string(), "v".to_string()])
    );
    Ok(())
}

#[test]
fn failing_batch_row_is_an_execution_error() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    raw.execute_batch("CREATE TABLE u (id INTEGER PRIMARY KEY);")?;
    let conn = SqliteConnection::new(&raw);

    let batch = BoundBatchSqlBuilder::new(1)?
        .append_single_sql("INSERT INTO u (id) VALUES (?)")
        .append_batch_sql_parameters(sql_values![1])?
        .append_batch_sql_parameters(sql_values![1])?
        .build()?;
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    let err = stmt.execute_batch(&batch).unwrap_err();
    assert!(err.is_execution());
    assert_eq!(err.sql(), Some("INSERT INTO u (id) VALUES (?)"));
    Ok(())
}
