use thiserror::Error;

/// Result type alias using MapError
pub type Result<T> = std::result::Result<T, MapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Registry
    InvalidInput,
    UnregisteredTable,
    MissingKeys,
    UnknownColumn,

    // Row decoding
    MissingColumn,
    TypeMismatch,
    ReadOnlyColumn,
    TooManyRows,

    // Storage outcomes
    AlreadyExists,
    ConstraintViolation,
    OptimisticLock,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnregisteredTable => "ERR_UNREGISTERED_TABLE",
            ExErrorKind::MissingKeys => "ERR_MISSING_KEYS",
            ExErrorKind::UnknownColumn => "ERR_UNKNOWN_COLUMN",
            ExErrorKind::MissingColumn => "ERR_MISSING_COLUMN",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::ReadOnlyColumn => "ERR_READ_ONLY_COLUMN",
            ExErrorKind::TooManyRows => "ERR_TOO_MANY_ROWS",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::OptimisticLock => "ERR_OPTIMISTIC_LOCK",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the table, key
/// and operation that were in flight when it was raised.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add primary key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Mapping-layer error taxonomy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// Record type was never passed to `add_table`
    #[error("No table registered for type {type_name}")]
    UnregisteredTable { type_name: String },

    /// Operation needs a primary key but none was declared
    #[error("Table {table} has no primary key declared")]
    MissingKeys { table: String },

    #[error("Table {table} has no column named {column}")]
    UnknownColumn { table: String, column: String },

    #[error("Column {column} of table {table} is part of the primary key and cannot be updated")]
    KeyColumnUpdate { table: String, column: String },

    #[error("Column {column} of table {table} is the version column and is managed automatically")]
    VersionColumnUpdate { table: String, column: String },

    /// Partial update named no writable column
    #[error("Update of table {table} names no columns to write")]
    EmptyUpdate { table: String },

    /// Wrong number of key values supplied
    #[error("Table {table} expects {expected} key value(s), got {actual}")]
    KeyArity {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Record produced a row with the wrong number of values
    #[error("Table {table} maps {expected} column(s) but the record produced {actual} value(s)")]
    RowArity {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid auto-increment key on table {table}: {reason}")]
    InvalidAutoIncrement { table: String, reason: String },

    #[error("Column {column} of table {table} cannot be a version column: it must be a non-key Integer column")]
    InvalidVersionColumn { table: String, column: String },

    /// Query result lacks a column the record reads
    #[error("Result set has no column named {column}")]
    MissingColumn { column: String },

    #[error("Column {column} holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Record does not accept write-back for this column
    #[error("Record does not accept a generated value for column {column}")]
    ReadOnlyColumn { column: String },

    #[error("Expected at most one row, query returned {count}")]
    TooManyRows { count: usize },

    /// Row exists but its version no longer matches the record
    #[error("Row {key} of table {table} was modified concurrently (record version {version})")]
    OptimisticLock {
        table: String,
        key: String,
        version: i64,
    },

    #[error("Version of row {key} in table {table} cannot be incremented past {version}")]
    VersionOverflow {
        table: String,
        key: String,
        version: i64,
    },
}

impl From<MapError> for ExError {
    fn from(err: MapError) -> Self {
        let message = err.to_string();
        let ex = match &err {
            MapError::UnregisteredTable { .. } => ExError::new(ExErrorKind::UnregisteredTable),
            MapError::MissingKeys { table } => {
                ExError::new(ExErrorKind::MissingKeys).with_table(table)
            }
            MapError::UnknownColumn { table, .. } => {
                ExError::new(ExErrorKind::UnknownColumn).with_table(table)
            }
            MapError::KeyColumnUpdate { table, .. }
            | MapError::VersionColumnUpdate { table, .. }
            | MapError::EmptyUpdate { table }
            | MapError::KeyArity { table, .. }
            | MapError::RowArity { table, .. }
            | MapError::InvalidAutoIncrement { table, .. }
            | MapError::InvalidVersionColumn { table, .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_table(table)
            }
            MapError::MissingColumn { .. } => ExError::new(ExErrorKind::MissingColumn),
            MapError::TypeMismatch { .. } => ExError::new(ExErrorKind::TypeMismatch),
            MapError::ReadOnlyColumn { .. } => ExError::new(ExErrorKind::ReadOnlyColumn),
            MapError::TooManyRows { .. } => ExError::new(ExErrorKind::TooManyRows),
            MapError::OptimisticLock { table, key, .. } => ExError::new(ExErrorKind::OptimisticLock)
                .with_table(table)
                .with_key(key),
            MapError::VersionOverflow { table, key, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_table(table)
                .with_key(key),
        };
        ex.with_message(message)
    }
}
