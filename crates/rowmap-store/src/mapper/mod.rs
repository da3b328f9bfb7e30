//! The mapping layer
//!
//! - `DbMap` owns the connection and the table registry
//! - `MapTransaction` batches writes
//! - `SqlExecutor` carries the record operations both of them expose

pub mod db_map;
pub mod executor;
pub mod registry;
pub mod transaction;

pub use db_map::DbMap;
pub use executor::{ResultSet, SqlExecutor};
pub use registry::TableRegistry;
pub use transaction::MapTransaction;
