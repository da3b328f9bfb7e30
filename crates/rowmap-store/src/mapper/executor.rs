//! Record operations shared by `DbMap` and `MapTransaction`
//!
//! Everything here runs against whatever connection the implementor exposes,
//! so the same insert/update/select code works inside and outside a
//! transaction.

use crate::convert::{from_sql, to_sql};
use crate::errors::{from_rusqlite, Result};
use crate::mapper::registry::TableRegistry;
use rowmap_core::errors::{ExError, MapError};
use rowmap_core::logging_facility::SqlTrace;
use rowmap_core::model::{describe_key, FromValue, Record, Row, TableMap, Value};
use rowmap_core::sql::statement;
use rowmap_core::sql::{BoundStatement, UpdateMode};
use rusqlite::{params_from_iter, Connection};

fn mapping_error(op: &str, table: &TableMap, err: MapError) -> ExError {
    let ex = ExError::from(err).with_op(op);
    if ex.table().is_some() {
        ex
    } else {
        ex.with_table(table.name())
    }
}

/// Column names plus raw rows of a result set
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Mapping-layer operations over one connection
pub trait SqlExecutor {
    fn connection(&self) -> &Connection;

    fn registry(&self) -> &TableRegistry;

    fn trace(&self) -> &SqlTrace;

    /// Run a statement that returns no rows; returns the affected row count
    fn exec(&self, sql: &str, args: &[Value]) -> Result<usize> {
        self.trace().statement(sql, args);
        self.connection()
            .execute(sql, params_from_iter(args.iter().map(to_sql)))
            .map_err(from_rusqlite)
    }

    /// Run a query and collect every row as raw values
    fn query(&self, sql: &str, args: &[Value]) -> Result<ResultSet> {
        self.trace().statement(sql, args);
        let mut stmt = self.connection().prepare(sql).map_err(from_rusqlite)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt
            .query(params_from_iter(args.iter().map(to_sql)))
            .map_err(from_rusqlite)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(from_rusqlite)? {
            let mut values = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let cell = row.get_ref(i).map_err(from_rusqlite)?;
                values.push(from_sql(cell, column).map_err(|e| ExError::from(e).with_op("query"))?);
            }
            out.push(values);
        }

        Ok(ResultSet { columns, rows: out })
    }

    /// Insert one record; fails with `AlreadyExists` on a duplicate key
    ///
    /// Auto-increment keys and version numbers are written back into
    /// `record`.
    fn insert<R: Record>(&self, record: &mut R) -> Result<()> {
        let table = self.registry().table::<R>()?;
        let row = record.to_row();
        let stmt = statement::insert(table, &row).map_err(|e| mapping_error("insert", table, e))?;

        self.run(&stmt).map_err(|e| {
            e.with_op("insert")
                .with_table(table.name())
                .with_key(describe_key(&table.key_values(&row)))
        })?;

        if table.is_auto_increment() {
            let id = self.connection().last_insert_rowid();
            let key = table.key_names()[0];
            record
                .set_column(key, Value::Integer(id))
                .map_err(|e| mapping_error("insert", table, e))?;
        }
        if let Some(version) = table.version_column() {
            record
                .set_column(version, Value::Integer(1))
                .map_err(|e| mapping_error("insert", table, e))?;
        }

        tracing::debug!(table = table.name(), "inserted record");
        Ok(())
    }

    /// Replace the row matching the record's key with every non-key field
    ///
    /// Fields the caller left at their default are written too, clearing
    /// whatever was stored. Use [`update_with`](Self::update_with) and
    /// `UpdateMode::Columns` to write a subset.
    fn update<R: Record>(&self, record: &mut R) -> Result<usize> {
        self.update_with(record, &UpdateMode::Full)
    }

    /// Update the row matching the record's key according to `mode`
    ///
    /// Returns 0 when no row matches. On a versioned table, a row that exists
    /// under a different version fails with `OptimisticLock`.
    fn update_with<R: Record>(&self, record: &mut R, mode: &UpdateMode) -> Result<usize> {
        let table = self.registry().table::<R>()?;
        let row = record.to_row();
        let stmt =
            statement::update(table, &row, mode).map_err(|e| mapping_error("update", table, e))?;
        let keys = table.key_values(&row);

        let affected = self.run(&stmt).map_err(|e| {
            e.with_op("update")
                .with_table(table.name())
                .with_key(describe_key(&keys))
        })?;

        let version = table
            .version_of(&row)
            .map_err(|e| mapping_error("update", table, e))?;
        if let Some(current) = version {
            if affected == 0 {
                self.check_stale(table, &keys, current, "update")?;
            } else if let Some(column) = table.version_column() {
                let next = table
                    .next_version(current, &row)
                    .map_err(|e| mapping_error("update", table, e))?;
                record
                    .set_column(column, Value::Integer(next))
                    .map_err(|e| mapping_error("update", table, e))?;
            }
        }

        tracing::debug!(table = table.name(), rows_affected = affected, "updated record");
        Ok(affected)
    }

    /// Delete the row matching the record's key; returns 0 when none matches
    fn delete<R: Record>(&self, record: &R) -> Result<usize> {
        let table = self.registry().table::<R>()?;
        let row = record.to_row();
        let stmt = statement::delete(table, &row).map_err(|e| mapping_error("delete", table, e))?;
        let keys = table.key_values(&row);

        let affected = self.run(&stmt).map_err(|e| {
            e.with_op("delete")
                .with_table(table.name())
                .with_key(describe_key(&keys))
        })?;

        if affected == 0 {
            let version = table
                .version_of(&row)
                .map_err(|e| mapping_error("delete", table, e))?;
            if let Some(current) = version {
                self.check_stale(table, &keys, current, "delete")?;
            }
        }

        tracing::debug!(table = table.name(), rows_affected = affected, "deleted record");
        Ok(affected)
    }

    /// Fetch one record by primary key (one value per key column, in key
    /// order). A missing row is `Ok(None)`.
    fn get<R: Record>(&self, keys: &[Value]) -> Result<Option<R>> {
        let table = self.registry().table::<R>()?;
        let stmt = statement::get(table, keys).map_err(|e| mapping_error("get", table, e))?;
        let ResultSet { columns, mut rows } = self.query(&stmt.sql, &stmt.args).map_err(|e| {
            e.with_op("get")
                .with_table(table.name())
                .with_key(describe_key(keys))
        })?;

        match rows.pop() {
            None => Ok(None),
            Some(values) => R::from_row(&Row::new(&columns, values))
                .map(Some)
                .map_err(|e| mapping_error("get", table, e)),
        }
    }

    /// Run a query and decode every row as `R`, in result order
    fn select<R: Record>(&self, sql: &str, args: &[Value]) -> Result<Vec<R>> {
        let ResultSet { columns, rows } = self.query(sql, args).map_err(|e| e.with_op("select"))?;
        tracing::debug!(row_count = rows.len(), "selected records");

        rows.into_iter()
            .map(|values| {
                R::from_row(&Row::new(&columns, values))
                    .map_err(|e| ExError::from(e).with_op("select"))
            })
            .collect()
    }

    /// Like `select`, expecting at most one row
    fn select_one<R: Record>(&self, sql: &str, args: &[Value]) -> Result<Option<R>> {
        let mut records = self.select::<R>(sql, args)?;
        match records.len() {
            0 => Ok(None),
            1 => Ok(records.pop()),
            count => Err(ExError::from(MapError::TooManyRows { count }).with_op("select_one")),
        }
    }

    /// First column of the first row, or `None` when the query returns no rows
    fn select_value(&self, sql: &str, args: &[Value]) -> Result<Option<Value>> {
        let ResultSet { rows, .. } = self.query(sql, args)?;
        Ok(rows.into_iter().next().and_then(|r| r.into_iter().next()))
    }

    /// Scalar integer query; no row or NULL yields 0
    fn select_int(&self, sql: &str, args: &[Value]) -> Result<i64> {
        Ok(self.select_null_int(sql, args)?.unwrap_or(0))
    }

    fn select_null_int(&self, sql: &str, args: &[Value]) -> Result<Option<i64>> {
        self.select_scalar(sql, args)
    }

    /// Scalar float query; no row or NULL yields 0.0
    fn select_float(&self, sql: &str, args: &[Value]) -> Result<f64> {
        Ok(self.select_null_float(sql, args)?.unwrap_or(0.0))
    }

    fn select_null_float(&self, sql: &str, args: &[Value]) -> Result<Option<f64>> {
        self.select_scalar(sql, args)
    }

    /// Scalar text query; no row or NULL yields ""
    fn select_str(&self, sql: &str, args: &[Value]) -> Result<String> {
        Ok(self.select_null_str(sql, args)?.unwrap_or_default())
    }

    fn select_null_str(&self, sql: &str, args: &[Value]) -> Result<Option<String>> {
        self.select_scalar(sql, args)
    }

    /// Decode the first column of the first row; no row or NULL is `None`
    fn select_scalar<T: FromValue>(&self, sql: &str, args: &[Value]) -> Result<Option<T>> {
        match self.select_value(sql, args)? {
            None => Ok(None),
            Some(value) => Option::<T>::from_value(&value, "scalar")
                .map_err(|e| ExError::from(e).with_op("select_scalar")),
        }
    }

    #[doc(hidden)]
    fn run(&self, stmt: &BoundStatement) -> Result<usize> {
        self.exec(&stmt.sql, &stmt.args)
    }

    /// After a versioned write matched nothing: stale if the row still exists
    #[doc(hidden)]
    fn check_stale(&self, table: &TableMap, keys: &[Value], version: i64, op: &str) -> Result<()> {
        let stmt = statement::exists(table, keys).map_err(|e| mapping_error(op, table, e))?;
        let count = self.select_int(&stmt.sql, &stmt.args)?;
        if count > 0 {
            return Err(ExError::from(MapError::OptimisticLock {
                table: table.name().to_string(),
                key: describe_key(keys),
                version,
            })
            .with_op(op));
        }
        Ok(())
    }
}
