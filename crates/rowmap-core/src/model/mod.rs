//! Value model and record/table descriptors

pub mod record;
pub mod table;
pub mod value;

pub use record::{Column, Record, Row, SqlType};
pub use table::{describe_key, ColumnMap, TableMap};
pub use value::{FromValue, Value};
