//! `start` / `end` / `end_error` events for an operation
//!
//! Every event carries `component`, `op` and `event`; callers append their
//! own fields after the required ones.

/// Log the start of an operation
///
/// ```
/// # use rowmap_core::log_op_start;
/// log_op_start!("create_tables");
/// log_op_start!("insert", table = "Country");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)+)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use rowmap_core::log_op_end;
/// log_op_end!("create_tables", duration_ms = 3);
/// log_op_end!("commit", duration_ms = 1, statements = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    };
}

/// Log a failed operation; `$err` is anything convertible into `ExError`
///
/// ```
/// # use rowmap_core::log_op_error;
/// # use rowmap_core::errors::MapError;
/// let err = MapError::MissingKeys { table: "City".to_string() };
/// log_op_error!("get", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)+)?
        );
    }};
}
