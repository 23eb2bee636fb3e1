//! Rows materialized from a native handle after execution.
//!
//! Result parsers receive the native handle and pull a [`ResultSet`] out of
//! it; this module holds the shape those rows take once they leave the
//! client library.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Row;
