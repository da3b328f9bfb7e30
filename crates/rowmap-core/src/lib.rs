//! rowmap Core - statically-typed record mapping primitives
//!
//! This crate holds everything the mapping layer needs that does not touch a
//! database connection:
//! - Error facility (`ExError`, `ExErrorKind`, `MapError`)
//! - Logging facility (profiles, operation macros, statement tracing)
//! - Value model and `Record` / `TableMap` descriptors
//! - SQLite statement builder and the `question_marks` placeholder helper

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod sql;

pub use rowmap_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, MapError, Result};
pub use model::{Column, FromValue, Record, Row, SqlType, TableMap, Value};
pub use sql::{question_marks, BoundStatement, UpdateMode};
