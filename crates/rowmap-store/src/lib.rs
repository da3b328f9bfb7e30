//! rowmap Store - SQLite-backed mapping layer
//!
//! Provides:
//! - Connection management and YAML store configuration
//! - `DbMap`: table registration, schema creation and teardown
//! - `SqlExecutor`: insert / update / delete / get / select over a map or a
//!   transaction
//! - `MapTransaction`: all-or-nothing write batches

pub mod config;
mod convert;
pub mod db;
pub mod errors;
pub mod mapper;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use mapper::{DbMap, MapTransaction, SqlExecutor, TableRegistry};
