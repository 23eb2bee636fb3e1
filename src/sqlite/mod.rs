// SQLite adapter - implements the native client traits over rusqlite
//
// - connection: borrowed connection wrapper and handle factory
// - params: conversion between `SqlValue` and rusqlite values
// - query: running a statement and materializing its rows
// - statement: plain and prepared handles
//
// SQLite has no stored procedures, so callable statements are not offered.

pub mod connection;
pub mod params;
pub mod query;
pub mod statement;

pub use connection::SqliteConnection;
pub use params::{sql_value_to_sqlite_value, sqlite_value_to_sql_value};
pub use query::build_result_set;
pub use statement::{SqlitePreparedStatement, SqliteStatement};

pub use rusqlite;
