//! Database map: connection, registered tables and schema management

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::mapper::executor::SqlExecutor;
use crate::mapper::registry::TableRegistry;
use crate::mapper::transaction::MapTransaction;
use rowmap_core::logging_facility::SqlTrace;
use rowmap_core::model::{Record, TableMap};
use rowmap_core::sql::{statement, BoundStatement};
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use std::time::Instant;

/// Entry point of the mapping layer
///
/// ```
/// use rowmap_core::model::{Column, Record, Row, Value};
/// use rowmap_core::values;
/// use rowmap_store::{DbMap, SqlExecutor};
///
/// #[derive(Debug, Default, PartialEq)]
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
///         Ok(Self { code: row.get("code")?, name: row.get("name")? })
///     }
/// }
///
/// let mut db = DbMap::open_in_memory()?;
/// db.add_table::<Country>().set_keys(false, &["code"])?;
/// db.create_tables_if_not_exists()?;
///
/// let mut pt = Country { code: "PT".into(), name: "Portugal".into() };
/// db.insert(&mut pt)?;
/// assert_eq!(db.get::<Country>(&values!["PT"])?, Some(pt));
/// # Ok::<(), rowmap_core::ExError>(())
/// ```
pub struct DbMap {
    conn: Connection,
    registry: TableRegistry,
    trace: SqlTrace,
}

impl DbMap {
    /// Wrap an already-open connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            registry: TableRegistry::new(),
            trace: SqlTrace::off(),
        }
    }

    /// Open the database described by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_with(config)?;
        let mut map = Self::new(conn);
        if let Some(prefix) = &config.trace {
            map.trace_on(prefix.clone());
        }
        tracing::debug!(path = config.path.as_str(), "opened store");
        Ok(map)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Register `R` under its default table name
    pub fn add_table<R: Record>(&mut self) -> &mut TableMap {
        self.registry.register::<R>(R::TABLE)
    }

    /// Register `R` under a custom table name
    pub fn add_table_with_name<R: Record>(&mut self, name: &str) -> &mut TableMap {
        self.registry.register::<R>(name)
    }

    /// The mapping registered for `R`
    pub fn table<R: Record>(&self) -> Result<&TableMap> {
        self.registry.table::<R>()
    }

    /// Emit a statement event for everything executed from now on
    pub fn trace_on(&mut self, prefix: impl Into<String>) {
        self.trace = SqlTrace::on(prefix);
    }

    pub fn trace_off(&mut self) {
        self.trace = SqlTrace::off();
    }

    /// Start a transaction; the map is borrowed until it commits or rolls back
    pub fn begin(&mut self) -> Result<MapTransaction<'_>> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| from_rusqlite(e).with_op("begin"))?;
        Ok(MapTransaction::new(tx, &self.registry, &self.trace))
    }

    /// Create every registered table; fails if one already exists
    pub fn create_tables(&self) -> Result<()> {
        self.run_ddl("create_tables", |t| statement::create_table(t, false), false)
    }

    /// Create every registered table that does not exist yet
    pub fn create_tables_if_not_exists(&self) -> Result<()> {
        self.run_ddl(
            "create_tables_if_not_exists",
            |t| statement::create_table(t, true),
            false,
        )
    }

    /// Drop every registered table, in reverse registration order
    pub fn drop_tables(&self) -> Result<()> {
        self.run_ddl("drop_tables", |t| statement::drop_table(t, false), true)
    }

    pub fn drop_tables_if_exists(&self) -> Result<()> {
        self.run_ddl(
            "drop_tables_if_exists",
            |t| statement::drop_table(t, true),
            true,
        )
    }

    /// Delete every row of every registered table and reset auto-increment
    /// counters
    pub fn truncate_tables(&self) -> Result<()> {
        let op = "truncate_tables";
        log_op_start!(op, tables = self.registry.len());
        let start = Instant::now();

        let stmts: Vec<BoundStatement> = self
            .registry
            .tables()
            .iter()
            .flat_map(statement::truncate)
            .collect();
        for stmt in &stmts {
            // sqlite_sequence only exists once an AUTOINCREMENT table has been created
            if stmt.sql.contains("sqlite_sequence") && !self.has_sequence_table()? {
                continue;
            }
            if let Err(e) = self.exec(&stmt.sql, &stmt.args) {
                let err = e.with_op(op);
                log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                return Err(err);
            }
        }

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
        Ok(())
    }

    fn has_sequence_table(&self) -> Result<bool> {
        let count = self.select_int(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
            &[],
        )?;
        Ok(count > 0)
    }

    fn run_ddl<F>(&self, op: &str, build: F, reverse: bool) -> Result<()>
    where
        F: Fn(&TableMap) -> String,
    {
        log_op_start!(op, tables = self.registry.len());
        let start = Instant::now();

        let mut tables: Vec<&TableMap> = self.registry.tables().iter().collect();
        if reverse {
            tables.reverse();
        }

        for table in tables {
            let sql = build(table);
            if let Err(e) = self.exec(&sql, &[]) {
                let err = e.with_op(op).with_table(table.name());
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    table = table.name()
                );
                return Err(err);
            }
        }

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
        Ok(())
    }
}

impl SqlExecutor for DbMap {
    fn connection(&self) -> &Connection {
        &self.conn
    }

    fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    fn trace(&self) -> &SqlTrace {
        &self.trace
    }
}
