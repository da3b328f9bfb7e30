//! Record descriptors
//!
//! A record type declares its columns statically and converts itself to and
//! from a row of [`Value`]s. There is no runtime introspection: the column
//! list, the value order and the decoding are all written out by the record.

use crate::errors::{MapError, Result};
use crate::model::value::{FromValue, Value};

/// Declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
    Blob,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Blob => "BLOB",
        }
    }
}

/// Static column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
}

impl Column {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self { name, sql_type }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, SqlType::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, SqlType::Integer)
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, SqlType::Real)
    }

    pub const fn blob(name: &'static str) -> Self {
        Self::new(name, SqlType::Blob)
    }
}

/// A type that maps onto one table row
///
/// `to_row` must return exactly one value per entry of `COLUMNS`, in the same
/// order.
///
/// ```
/// use rowmap_core::model::{Column, Record, Row, Value};
///
/// struct Country {
///     code: String,
///     name: String,
/// }
///
/// impl Record for Country {
///     const TABLE: &'static str = "Country";
///     const COLUMNS: &'static [Column] = &[Column::text("code"), Column::text("name")];
///
///     fn to_row(&self) -> Vec<Value> {
///         vec![self.code.clone().into(), self.name.clone().into()]
///     }
///
///     fn from_row(row: &Row<'_>) -> rowmap_core::Result<Self> {
///         Ok(Self {
///             code: row.get("code")?,
///             name: row.get("name")?,
///         })
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Default table name, used by `add_table`
    const TABLE: &'static str;
    const COLUMNS: &'static [Column];

    fn to_row(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> Result<Self>;

    /// Write back a value generated by the store (auto-increment key or
    /// version number). Records without such columns keep the default.
    fn set_column(&mut self, column: &str, _value: Value) -> Result<()> {
        Err(MapError::ReadOnlyColumn {
            column: column.to_string(),
        })
    }
}

/// One result row, with column names shared across the result set
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    columns: &'a [String],
    values: Vec<Value>,
}

impl<'a> Row<'a> {
    pub fn new(columns: &'a [String], values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by column name (ASCII case-insensitive, as SQLite
    /// identifiers are)
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .and_then(|i| self.values.get(i))
    }

    /// Decode a column by name
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.value(column).ok_or_else(|| MapError::MissingColumn {
            column: column.to_string(),
        })?;
        T::from_value(value, column)
    }

    /// Decode a column by position
    pub fn get_index<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.values.get(index).ok_or_else(|| MapError::MissingColumn {
            column: format!("#{}", index),
        })?;
        let name = self.columns.get(index).map(String::as_str).unwrap_or("?");
        T::from_value(value, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["code".to_string(), "countryCode".to_string()]
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let cols = names();
        let row = Row::new(&cols, vec![Value::from("LIS"), Value::from("PT")]);
        let code: String = row.get("CODE").unwrap();
        let country: String = row.get("countrycode").unwrap();
        assert_eq!(code, "LIS");
        assert_eq!(country, "PT");
    }

    #[test]
    fn test_missing_column() {
        let cols = names();
        let row = Row::new(&cols, vec![Value::from("LIS"), Value::Null]);
        let err = row.get::<String>("name").unwrap_err();
        assert_eq!(
            err,
            MapError::MissingColumn {
                column: "name".to_string()
            }
        );
    }

    #[test]
    fn test_get_index_names_column_on_mismatch() {
        let cols = names();
        let row = Row::new(&cols, vec![Value::from("LIS"), Value::Null]);
        match row.get_index::<String>(1).unwrap_err() {
            MapError::TypeMismatch { column, .. } => assert_eq!(column, "countryCode"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(row.get_index::<String>(5).is_err());
    }

    #[test]
    fn test_column_constructors() {
        const COLS: &[Column] = &[Column::text("a"), Column::integer("b"), Column::real("c")];
        assert_eq!(COLS[1].sql_type, SqlType::Integer);
        assert_eq!(SqlType::Blob.as_sql(), "BLOB");
    }
}
