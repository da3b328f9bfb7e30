//! Table mappings
//!
//! A `TableMap` is the registered form of a record type: its table name,
//! column options, primary key and optional version column. It starts from
//! the record's static `COLUMNS` and is refined at registration time.

use crate::errors::{MapError, Result};
use crate::model::record::{Column, SqlType};
use crate::model::value::{FromValue, Value};

/// Registered column with its DDL options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    name: String,
    sql_type: SqlType,
    max_size: Option<u32>,
    unique: bool,
    not_null: bool,
}

impl ColumnMap {
    fn from_column(column: &Column) -> Self {
        Self {
            name: column.name.to_string(),
            sql_type: column.sql_type,
            max_size: None,
            unique: false,
            not_null: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn max_size(&self) -> Option<u32> {
        self.max_size
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// Declare a maximum length; Text columns render as `VARCHAR(n)`
    pub fn set_max_size(&mut self, size: u32) -> &mut Self {
        self.max_size = Some(size);
        self
    }

    pub fn set_unique(&mut self, unique: bool) -> &mut Self {
        self.unique = unique;
        self
    }

    pub fn set_not_null(&mut self, not_null: bool) -> &mut Self {
        self.not_null = not_null;
        self
    }
}

/// Registered table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMap {
    name: String,
    columns: Vec<ColumnMap>,
    keys: Vec<usize>,
    auto_increment: bool,
    version: Option<usize>,
}

impl TableMap {
    pub fn new(name: impl Into<String>, columns: &[Column]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(ColumnMap::from_column).collect(),
            keys: Vec::new(),
            auto_increment: false,
            version: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn columns(&self) -> &[ColumnMap] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| MapError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Mutable access to one column's options
    pub fn column_mut(&mut self, name: &str) -> Result<&mut ColumnMap> {
        let idx = self.require_column(name)?;
        Ok(&mut self.columns[idx])
    }

    /// Declare the primary key
    ///
    /// With `auto_increment`, exactly one Integer key is allowed; inserts
    /// then omit it and the store writes the generated rowid back.
    pub fn set_keys(&mut self, auto_increment: bool, keys: &[&str]) -> Result<&mut Self> {
        if keys.is_empty() {
            return Err(MapError::MissingKeys {
                table: self.name.clone(),
            });
        }

        let mut indices = Vec::with_capacity(keys.len());
        for key in keys {
            let idx = self.require_column(key)?;
            if Some(idx) == self.version {
                return Err(MapError::InvalidVersionColumn {
                    table: self.name.clone(),
                    column: self.columns[idx].name.clone(),
                });
            }
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }

        if auto_increment {
            if indices.len() != 1 {
                return Err(MapError::InvalidAutoIncrement {
                    table: self.name.clone(),
                    reason: format!("expected exactly one key, got {}", indices.len()),
                });
            }
            let col = &self.columns[indices[0]];
            if col.sql_type != SqlType::Integer {
                return Err(MapError::InvalidAutoIncrement {
                    table: self.name.clone(),
                    reason: format!("key {} is {}, not INTEGER", col.name, col.sql_type.as_sql()),
                });
            }
        }

        self.keys = indices;
        self.auto_increment = auto_increment;
        Ok(self)
    }

    /// Declare an Integer, non-key column as the optimistic-lock version
    pub fn set_version_column(&mut self, column: &str) -> Result<&mut Self> {
        let idx = self.require_column(column)?;
        if self.keys.contains(&idx) || self.columns[idx].sql_type != SqlType::Integer {
            return Err(MapError::InvalidVersionColumn {
                table: self.name.clone(),
                column: self.columns[idx].name.clone(),
            });
        }
        self.version = Some(idx);
        Ok(self)
    }

    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    pub fn key_names(&self) -> Vec<&str> {
        self.keys.iter().map(|&i| self.columns[i].name()).collect()
    }

    pub fn is_key(&self, index: usize) -> bool {
        self.keys.contains(&index)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn version_index(&self) -> Option<usize> {
        self.version
    }

    pub fn version_column(&self) -> Option<&str> {
        self.version.map(|i| self.columns[i].name())
    }

    /// Fail with `MissingKeys` when no primary key is declared
    pub fn require_keys(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(MapError::MissingKeys {
                table: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Fail with `RowArity` when a record produced the wrong number of values
    pub fn check_row(&self, row: &[Value]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(MapError::RowArity {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        Ok(())
    }

    /// Fail with `KeyArity` when a key lookup has the wrong number of values
    pub fn check_key_arity(&self, keys: &[Value]) -> Result<()> {
        self.require_keys()?;
        if keys.len() != self.keys.len() {
            return Err(MapError::KeyArity {
                table: self.name.clone(),
                expected: self.keys.len(),
                actual: keys.len(),
            });
        }
        Ok(())
    }

    /// Extract primary key values from a full row, in key order
    pub fn key_values(&self, row: &[Value]) -> Vec<Value> {
        self.keys
            .iter()
            .filter_map(|&i| row.get(i).cloned())
            .collect()
    }

    /// Current version number carried by `row`, if versioned
    pub fn version_of(&self, row: &[Value]) -> Result<Option<i64>> {
        match self.version {
            None => Ok(None),
            Some(idx) => {
                let value = row.get(idx).cloned().unwrap_or_default();
                i64::from_value(&value, &self.columns[idx].name).map(Some)
            }
        }
    }

    /// Version a successful write of `row` leaves behind
    pub fn next_version(&self, current: i64, row: &[Value]) -> Result<i64> {
        current
            .checked_add(1)
            .ok_or_else(|| MapError::VersionOverflow {
                table: self.name.clone(),
                key: describe_key(&self.key_values(row)),
                version: current,
            })
    }
}

/// Render key values for error context, e.g. `"PT"` or `"PT",3`
pub fn describe_key(keys: &[Value]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
