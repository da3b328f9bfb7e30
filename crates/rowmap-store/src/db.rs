//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite(e).with_op("open"))
}

/// Open an in-memory SQLite database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite(e).with_op("open"))
}

/// Open the database named by `config` and apply its pragmas
pub fn open_with(config: &StoreConfig) -> Result<Connection> {
    config.validate()?;
    let conn = if config.is_in_memory() {
        open_in_memory()?
    } else {
        open(&config.path)?
    };
    configure(&conn, config)?;
    Ok(conn)
}

/// Apply connection pragmas from `config`
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(|e| from_rusqlite(e).with_op("configure"))?;

    if let Some(mode) = &config.journal_mode {
        // journal_mode answers with the resulting mode as a row
        conn.pragma_update_and_check(None, "journal_mode", mode.to_ascii_uppercase(), |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| from_rusqlite(e).with_op("configure"))?;
    }

    if let Some(ms) = config.busy_timeout_ms {
        conn.busy_timeout(Duration::from_millis(ms))
            .map_err(|e| from_rusqlite(e).with_op("configure"))?;
    }

    Ok(())
}
