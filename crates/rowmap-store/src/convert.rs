//! Conversions between rowmap values and rusqlite values

use rowmap_core::errors::MapError;
use rowmap_core::model::Value;
use rusqlite::types::{Value as SqlValue, ValueRef};

pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(r) => SqlValue::Real(*r),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

/// Decode one result cell; TEXT that is not valid UTF-8 is rejected
pub(crate) fn from_sql(value: ValueRef<'_>, column: &str) -> Result<Value, MapError> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => match std::str::from_utf8(t) {
            Ok(text) => Value::Text(text.to_string()),
            Err(_) => {
                return Err(MapError::TypeMismatch {
                    column: column.to_string(),
                    expected: "UTF-8 TEXT",
                    found: "non-UTF-8 TEXT",
                })
            }
        },
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    })
}
