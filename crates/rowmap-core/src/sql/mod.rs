//! SQL generation for the SQLite dialect

pub mod placeholders;
pub mod statement;

pub use placeholders::question_marks;
pub use statement::{quote_ident, BoundStatement, UpdateMode};
