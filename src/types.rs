use std::fmt;
use std::num::TryFromIntError;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values that can be bound as statement parameters or read back from a row.
///
/// Binding is positional, so a parameter list is just a `Vec<SqlValue>`:
/// ```rust
/// use sql_integrated::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// JSON value
    Json(JsonValue),
    /// Driver-specific payload the adapter knows how to bind.
    Custom { type_name: String, data: Vec<u8> },
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let SqlValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(1) => Some(true),
            SqlValue::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            SqlValue::Timestamp(value) => Some(*value),
            // Try "YYYY-MM-DD HH:MM:SS" with optional fractional seconds
            SqlValue::Text(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok(),
            _ => None,
        }
    }

    /// Type code that best describes this value.
    #[must_use]
    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Null => SqlType::Null,
            SqlValue::Bool(_) => SqlType::Boolean,
            SqlValue::Int(_) => SqlType::BigInt,
            SqlValue::Float(_) => SqlType::Double,
            SqlValue::Text(_) => SqlType::Varchar,
            SqlValue::Blob(_) => SqlType::Blob,
            SqlValue::Date(_) => SqlType::Date,
            SqlValue::Time(_) => SqlType::Time,
            SqlValue::Timestamp(_) => SqlType::Timestamp,
            SqlValue::Json(_) => SqlType::Json,
            SqlValue::Custom { .. } => SqlType::Other(0),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "null"),
            SqlValue::Bool(b) => write!(f, "{b}"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::Float(v) => write!(f, "{v}"),
            SqlValue::Text(s) => write!(f, "{s}"),
            SqlValue::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
            SqlValue::Date(d) => write!(f, "{d}"),
            SqlValue::Time(t) => write!(f, "{t}"),
            SqlValue::Timestamp(ts) => write!(f, "{}", ts.format("%F %T%.f")),
            SqlValue::Json(j) => write!(f, "{j}"),
            SqlValue::Custom { type_name, data } => {
                write!(f, "<{type_name}: {} bytes>", data.len())
            }
        }
    }
}

macro_rules! impl_from_for_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_for_sql_value!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Blob,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    JsonValue => Json,
);

// Wide unsigned integers may not fit `Int`, so they convert fallibly and
// stay out of `sql_values!`.
impl TryFrom<u64> for SqlValue {
    type Error = TryFromIntError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(SqlValue::Int)
    }
}

impl TryFrom<usize> for SqlValue {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value).map(SqlValue::Int)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// Type code attached to callable parameters, used when binding typed input
/// values and registering output parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Integer,
    BigInt,
    SmallInt,
    Boolean,
    Double,
    Real,
    Decimal,
    Char,
    Varchar,
    Clob,
    Binary,
    Blob,
    Date,
    Time,
    Timestamp,
    Json,
    Null,
    /// Vendor-specific type code
    Other(i32),
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::BigInt => write!(f, "BIGINT"),
            SqlType::SmallInt => write!(f, "SMALLINT"),
            SqlType::Boolean => write!(f, "BOOLEAN"),
            SqlType::Double => write!(f, "DOUBLE"),
            SqlType::Real => write!(f, "REAL"),
            SqlType::Decimal => write!(f, "DECIMAL"),
            SqlType::Char => write!(f, "CHAR"),
            SqlType::Varchar => write!(f, "VARCHAR"),
            SqlType::Clob => write!(f, "CLOB"),
            SqlType::Binary => write!(f, "BINARY"),
            SqlType::Blob => write!(f, "BLOB"),
            SqlType::Date => write!(f, "DATE"),
            SqlType::Time => write!(f, "TIME"),
            SqlType::Timestamp => write!(f, "TIMESTAMP"),
            SqlType::Json => write!(f, "JSON"),
            SqlType::Null => write!(f, "NULL"),
            SqlType::Other(code) => write!(f, "OTHER({code})"),
        }
    }
}

/// Build a `Vec<SqlValue>` from heterogeneous literals.
///
/// Every item goes through `SqlValue::from`; convert `u64`/`usize` with
/// `SqlValue::try_from` first.
///
/// ```rust
/// use sql_integrated::{sql_values, SqlValue};
///
/// let row = sql_values![1, "A", "a@x.com"];
/// assert_eq!(row[1], SqlValue::Text("A".into()));
/// ```
#[macro_export]
macro_rules! sql_values {
    () => {
        ::std::vec::Vec::<$crate::SqlValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::SqlValue::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_becomes_null() {
        let value: SqlValue = Option::<i64>::None.into();
        assert!(value.is_null());
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
    }

    #[test]
    fn int_doubles_as_bool() {
        assert_eq!(SqlValue::Int(1).as_bool(), Some(true));
        assert_eq!(SqlValue::Int(0).as_bool(), Some(false));
        assert_eq!(SqlValue::Int(2).as_bool(), None);
    }

    #[test]
    fn text_timestamps_parse() {
        let value = SqlValue::Text("2024-03-01 10:11:12.250".into());
        let ts = value.as_timestamp().expect("timestamp");
        assert_eq!(ts.format("%F %T%.3f").to_string(), "2024-03-01 10:11:12.250");
    }

    #[test]
    fn wide_unsigned_integers_convert_when_they_fit() {
        assert_eq!(SqlValue::try_from(5usize), Ok(SqlValue::Int(5)));
        assert_eq!(
            SqlValue::try_from(i64::MAX as u64),
            Ok(SqlValue::Int(i64::MAX))
        );
        assert!(SqlValue::try_from(u64::MAX).is_err());
        assert!(SqlValue::try_from(i64::MAX as u64 + 1).is_err());
    }

    #[test]
    fn sql_values_macro_converts_each_item() {
        let row = crate::sql_values![1, "A", 2.5, true, Option::<i32>::None];
        assert_eq!(
            row,
            vec![
                SqlValue::Int(1),
                SqlValue::Text("A".into()),
                SqlValue::Float(2.5),
                SqlValue::Bool(true),
                SqlValue::Null,
            ]
        );
    }
}
