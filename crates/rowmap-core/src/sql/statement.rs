//! SQLite statement builder
//!
//! Turns a [`TableMap`] plus row values into SQL text and positional args.
//! Values are always bound, never spliced into the SQL.

use crate::errors::{MapError, Result};
use crate::model::{ColumnMap, SqlType, TableMap, Value};

/// SQL text with its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub args: Vec<Value>,
}

impl BoundStatement {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

/// Which columns an update writes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Every non-key column is rewritten from the record. Fields left at
    /// their default value overwrite what is stored.
    #[default]
    Full,
    /// Only the named non-key columns are written; the rest are untouched.
    Columns(Vec<String>),
}

impl UpdateMode {
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UpdateMode::Columns(columns.into_iter().map(Into::into).collect())
    }
}

/// Double-quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_type(column: &ColumnMap) -> String {
    match (column.sql_type(), column.max_size()) {
        (SqlType::Text, Some(n)) => format!("VARCHAR({})", n),
        (ty, _) => ty.as_sql().to_string(),
    }
}

fn column_list(table: &TableMap, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| quote_ident(table.columns()[i].name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_predicate(table: &TableMap) -> String {
    table
        .keys()
        .iter()
        .map(|&i| format!("{} = ?", quote_ident(table.columns()[i].name())))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `CREATE TABLE [IF NOT EXISTS]`
pub fn create_table(table: &TableMap, if_not_exists: bool) -> String {
    let single_key = table.keys().len() == 1;
    let mut defs = Vec::with_capacity(table.columns().len() + 1);

    for (i, col) in table.columns().iter().enumerate() {
        let mut def = format!("{} {}", quote_ident(col.name()), column_type(col));
        if table.is_key(i) {
            def.push_str(" NOT NULL");
            if single_key {
                def.push_str(" PRIMARY KEY");
                if table.is_auto_increment() {
                    def.push_str(" AUTOINCREMENT");
                }
            }
        } else if col.is_not_null() {
            def.push_str(" NOT NULL");
        }
        if col.is_unique() && !(single_key && table.is_key(i)) {
            def.push_str(" UNIQUE");
        }
        defs.push(def);
    }

    if table.keys().len() > 1 {
        defs.push(format!("PRIMARY KEY ({})", column_list(table, table.keys())));
    }

    format!(
        "CREATE TABLE {}{} ({})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        quote_ident(table.name()),
        defs.join(", ")
    )
}

/// `DROP TABLE [IF EXISTS]`
pub fn drop_table(table: &TableMap, if_exists: bool) -> String {
    format!(
        "DROP TABLE {}{}",
        if if_exists { "IF EXISTS " } else { "" },
        quote_ident(table.name())
    )
}

/// Delete every row; auto-increment tables also reset their sequence
pub fn truncate(table: &TableMap) -> Vec<BoundStatement> {
    let mut stmts = vec![BoundStatement::new(
        format!("DELETE FROM {}", quote_ident(table.name())),
        Vec::new(),
    )];
    if table.is_auto_increment() {
        stmts.push(BoundStatement::new(
            "DELETE FROM sqlite_sequence WHERE name = ?",
            vec![Value::from(table.name())],
        ));
    }
    stmts
}

/// `INSERT` of a full row
///
/// An auto-increment key is left out; a version column is written as 1.
pub fn insert(table: &TableMap, row: &[Value]) -> Result<BoundStatement> {
    table.check_row(row)?;

    let indices: Vec<usize> = (0..table.columns().len())
        .filter(|&i| !(table.is_auto_increment() && table.is_key(i)))
        .collect();
    let args = indices
        .iter()
        .map(|&i| {
            if Some(i) == table.version_index() {
                Value::Integer(1)
            } else {
                row[i].clone()
            }
        })
        .collect();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table.name()),
        column_list(table, &indices),
        super::question_marks(indices.len())
    );
    Ok(BoundStatement::new(sql, args))
}

fn update_targets(table: &TableMap, mode: &UpdateMode) -> Result<Vec<usize>> {
    let writable = |i: usize| !table.is_key(i) && Some(i) != table.version_index();

    match mode {
        UpdateMode::Full => Ok((0..table.columns().len()).filter(|&i| writable(i)).collect()),
        UpdateMode::Columns(names) => {
            let mut indices = Vec::with_capacity(names.len());
            for name in names {
                let idx = table
                    .column_index(name)
                    .ok_or_else(|| MapError::UnknownColumn {
                        table: table.name().to_string(),
                        column: name.clone(),
                    })?;
                let column = table.columns()[idx].name().to_string();
                if table.is_key(idx) {
                    return Err(MapError::KeyColumnUpdate {
                        table: table.name().to_string(),
                        column,
                    });
                }
                if Some(idx) == table.version_index() {
                    return Err(MapError::VersionColumnUpdate {
                        table: table.name().to_string(),
                        column,
                    });
                }
                if !indices.contains(&idx) {
                    indices.push(idx);
                }
            }
            Ok(indices)
        }
    }
}

/// `UPDATE ... WHERE <keys>` per `mode`
///
/// Versioned tables also set `version = current + 1` and require
/// `version = current` in the predicate.
pub fn update(table: &TableMap, row: &[Value], mode: &UpdateMode) -> Result<BoundStatement> {
    table.require_keys()?;
    table.check_row(row)?;

    let targets = update_targets(table, mode)?;
    let version = table.version_of(row)?;
    if targets.is_empty() && version.is_none() {
        return Err(MapError::EmptyUpdate {
            table: table.name().to_string(),
        });
    }

    let mut sets: Vec<String> = targets
        .iter()
        .map(|&i| format!("{} = ?", quote_ident(table.columns()[i].name())))
        .collect();
    let mut args: Vec<Value> = targets.iter().map(|&i| row[i].clone()).collect();

    if let (Some(idx), Some(current)) = (table.version_index(), version) {
        sets.push(format!("{} = ?", quote_ident(table.columns()[idx].name())));
        args.push(Value::Integer(table.next_version(current, row)?));
    }

    let mut sql = format!(
        "UPDATE {} SET {} WHERE {}",
        quote_ident(table.name()),
        sets.join(", "),
        key_predicate(table)
    );
    args.extend(table.key_values(row));

    if let (Some(idx), Some(current)) = (table.version_index(), version) {
        sql.push_str(&format!(" AND {} = ?", quote_ident(table.columns()[idx].name())));
        args.push(Value::Integer(current));
    }

    Ok(BoundStatement::new(sql, args))
}

/// `DELETE ... WHERE <keys>` (plus version for versioned tables)
pub fn delete(table: &TableMap, row: &[Value]) -> Result<BoundStatement> {
    table.require_keys()?;
    table.check_row(row)?;

    let mut sql = format!(
        "DELETE FROM {} WHERE {}",
        quote_ident(table.name()),
        key_predicate(table)
    );
    let mut args = table.key_values(row);

    if let (Some(idx), Some(current)) = (table.version_index(), table.version_of(row)?) {
        sql.push_str(&format!(" AND {} = ?", quote_ident(table.columns()[idx].name())));
        args.push(Value::Integer(current));
    }

    Ok(BoundStatement::new(sql, args))
}

/// `SELECT <columns> ... WHERE <keys>`
pub fn get(table: &TableMap, keys: &[Value]) -> Result<BoundStatement> {
    table.check_key_arity(keys)?;
    let all: Vec<usize> = (0..table.columns().len()).collect();
    let sql = format!(
        "SELECT {} FROM {} WHERE {}",
        column_list(table, &all),
        quote_ident(table.name()),
        key_predicate(table)
    );
    Ok(BoundStatement::new(sql, keys.to_vec()))
}

/// `SELECT count(*) ... WHERE <keys>`
pub fn exists(table: &TableMap, keys: &[Value]) -> Result<BoundStatement> {
    table.check_key_arity(keys)?;
    let sql = format!(
        "SELECT count(*) FROM {} WHERE {}",
        quote_ident(table.name()),
        key_predicate(table)
    );
    Ok(BoundStatement::new(sql, keys.to_vec()))
}
