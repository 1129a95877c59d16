use crate::value::Value;
use thiserror::Error as ThisError;

/// One result row: ordered `(column name, value)` pairs as returned by
/// the driver. Column names are the bare output names of the SELECT
/// list (aliases included), which is what hydration keys on.
pub type Row = Vec<(String, Value)>;

///
/// DriverError
///
/// Collaborator-facing error surface for the database driver. The
/// mapper distinguishes only `Unsupported` (optional feature missing,
/// tolerated) from everything else (execution failure).
///

#[derive(Debug, ThisError)]
pub enum DriverError {
    #[error("statement preparation failed: {message}")]
    Prepare { message: String },

    #[error("statement execution failed: {message}")]
    Execution { message: String },

    #[error("driver feature unsupported: {feature}")]
    Unsupported { feature: &'static str },
}

impl DriverError {
    pub fn prepare(message: impl Into<String>) -> Self {
        Self::Prepare {
            message: message.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn unsupported(feature: &'static str) -> Self {
        Self::Unsupported { feature }
    }

    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

///
/// Statement
///
/// A prepared statement handle. Handles are cached per SQL text for the
/// adapter's lifetime and re-executed with different parameter sets;
/// they are not safe for concurrent use.
///

pub trait Statement {
    /// Execute a write-style statement; returns the affected row count.
    fn execute(&mut self, params: &[Value]) -> Result<u64, DriverError>;

    /// Execute a read-style statement and fetch every row.
    fn query(&mut self, params: &[Value]) -> Result<Vec<Row>, DriverError>;
}

///
/// Driver
///
/// Synchronous database driver collaborator. One driver instance backs
/// one adapter; serializing access is the caller's responsibility.
///

pub trait Driver {
    type Stmt: Statement;

    fn prepare(&mut self, sql: &str) -> Result<Self::Stmt, DriverError>;

    /// Database-assigned identifier of the most recent single-row
    /// insert into `table`. Backends without the concept return
    /// [`DriverError::Unsupported`]; `Value::Null` means no identifier
    /// was assigned.
    fn last_insert_id(&mut self, table: &str) -> Result<Value, DriverError>;
}
