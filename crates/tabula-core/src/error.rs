use crate::{db::driver::DriverError, sql::SqlError};
use thiserror::Error as ThisError;

///
/// MapperError
///
/// Top-level error surface for one mapper operation. Operations that
/// report boolean success absorb these at the façade; `load` propagates
/// them unchanged.
///

#[derive(Debug, ThisError)]
pub enum MapperError {
    /// A load-style operation was asked to key on an unset primary key
    /// field. Raised before any SQL is built.
    #[error("missing primary key value: {table}.{field}")]
    MissingPrimaryKey {
        table: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Sql(#[from] SqlError),

    /// Generated placeholders and supplied values disagree, or entity
    /// metadata produced an unusable statement shape. Programming
    /// errors, not runtime conditions.
    #[error("mapper invariant violated: {0}")]
    InvariantViolation(String),
}

impl MapperError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}
