//! Error handling for rowmap-store
//!
//! Wraps rowmap-core ExError with store-specific helpers

use rowmap_core::errors::{ExError, ExErrorKind};
use rusqlite::ffi;
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
///
/// Primary-key and unique violations become `AlreadyExists`; other
/// constraint failures become `ConstraintViolation`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    ExErrorKind::AlreadyExists
                }
                _ => ExErrorKind::ConstraintViolation,
            }
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config")
        .with_message(reason.to_string())
}

/// Create a YAML parse error
pub fn yaml_error(operation: &str, err: serde_yaml::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(format!("YAML parse error: {}", err))
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
