#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use sql_integrated::prelude::*;
use sql_integrated::sqlite::rusqlite;

fn setup(raw: &rusqlite::Connection) -> Result<(), StatementError> {
    let conn = SqliteConnection::new(raw);
    let mut stmt = PlainIntegratedStatement::new(&conn);
    stmt.execute_sql(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, active BOOLEAN, joined TEXT)",
    )?;
    Ok(())
}

#[test]
fn update_then_query_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    setup(&raw)?;
    let conn = SqliteConnection::new(&raw);

    let joined = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid timestamp");
    let insert = BoundSingleSqlBuilder::with_expected(4)
        .append_sql("INSERT INTO users (id, name, active, joined) VALUES (?, ?, ?, ?)")
        .append_sql_parameters(sql_values![1, "alice", true, joined])
        .build()?;
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    assert_eq!(stmt.update(&insert)?, 1);
    stmt.close()?;

    let select = SingleSql::new(
        "SELECT id, name, active, joined FROM users WHERE id = ?",
        sql_values![1],
    );
    let mut query = PreparedIntegratedStatement::new(&conn);
    let rs = query.query(&select, &CollectResultSet)?;
    assert_eq!(rs.len(), 1);
    let row = &rs.results[0];
    assert_eq!(row.get("name").and_then(SqlValue::as_text), Some("alice"));
    assert_eq!(row.get("active").and_then(SqlValue::as_bool), Some(true));
    assert_eq!(row.get("JOINED").and_then(SqlValue::as_timestamp), Some(joined));
    Ok(())
}

#[test]
fn re_execution_reuses_bound_values() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    setup(&raw)?;
    raw.execute_batch("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b'), (3, 'c');")?;
    let conn = SqliteConnection::new(&raw);

    let delete = SingleSql::new("DELETE FROM users WHERE id <= ?", sql_values![2]);
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    assert_eq!(stmt.update(&delete)?, 2);
    assert_eq!(stmt.execute_with::<_, u64>(&ExecuteUpdate)?, 0);

    let remaining: i64 = raw.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    assert_eq!(remaining, 1);
    Ok(())
}

#[test]
fn query_on_update_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    setup(&raw)?;
    let conn = SqliteConnection::new(&raw);

    let insert = SingleSql::new("INSERT INTO users (id, name) VALUES (?, ?)", sql_values![5, "e"]);
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    let err = stmt.query(&insert, &CollectResultSet).unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.sql(), Some("INSERT INTO users (id, name) VALUES (?, ?)"));
    Ok(())
}

#[test]
fn bad_sql_fails_at_creation() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    let conn = SqliteConnection::new(&raw);

    let mut stmt = PreparedIntegratedStatement::new(&conn);
    let err = stmt.create_statement("SELEC nonsense").unwrap_err();
    assert!(err.is_lifecycle());
    assert_eq!(err.sql(), Some("SELEC nonsense"));
    Ok(())
}

#[test]
fn first_value_reads_a_scalar() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    setup(&raw)?;
    raw.execute_batch("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b');")?;
    let conn = SqliteConnection::new(&raw);

    let count = SingleSql::new("SELECT COUNT(*) FROM users WHERE id >= ?", sql_values![1]);
    let mut stmt = PreparedIntegratedStatement::new(&conn);
    assert_eq!(stmt.query(&count, &FirstValue)?, Some(SqlValue::Int(2)));
    Ok(())
}

#[test]
fn configuration_is_recorded_on_the_handle() -> Result<(), Box<dyn std::error::Error>> {
    let raw = rusqlite::Connection::open_in_memory()?;
    let conn = SqliteConnection::new(&raw);

    let mut stmt = PreparedIntegratedStatement::new(&conn);
    stmt.set_configuration(Configuration::builder().query_timeout(3).finish());
    stmt.create_statement("SELECT 1")?;
    let timeout = stmt.handle().and_then(SqlitePreparedStatement::query_timeout);
    assert_eq!(timeout, Some(std::time::Duration::from_secs(3)));
    Ok(())
}
