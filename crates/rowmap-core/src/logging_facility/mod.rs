//! Logging facility
//!
//! - `init` installs the process-wide subscriber for a [`Profile`]
//! - `log_op_start!` / `log_op_end!` / `log_op_error!` mark operation boundaries
//! - [`SqlTrace`] emits one event per executed statement when enabled
//! - `test_capture` records events in memory for assertions

pub mod init;
pub mod macros;
pub mod sql_trace;
pub mod test_capture;

pub use init::{init, Profile};
pub use sql_trace::SqlTrace;
