//! Module: sql
//! Responsibility: statement text generation from entity metadata.
//! Does not own: statement preparation, execution, or hydration.

pub mod builder;
pub mod condition;
pub mod join;
pub mod sanitize;

use crate::sql::condition::ConditionError;
use thiserror::Error as ThisError;

///
/// SqlError
///

#[derive(Debug, ThisError)]
pub enum SqlError {
    /// Identifier failed internal validation before entering SQL text.
    #[error("invalid identifier: '{ident}'")]
    BadIdentifier { ident: String },

    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// INSERT with zero insertable columns cannot form a statement.
    #[error("no insertable fields set on {table}")]
    EmptyColumnList { table: &'static str },
}

/// Validate a bare SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a field reference: a bare identifier or `table.field`.
#[must_use]
pub fn is_field_ref(s: &str) -> bool {
    match s.split_once('.') {
        Some((table, field)) => is_identifier(table) && is_identifier(field),
        None => is_identifier(s),
    }
}

pub(crate) fn check_identifier(s: &str) -> Result<(), SqlError> {
    if is_identifier(s) {
        Ok(())
    } else {
        Err(SqlError::BadIdentifier {
            ident: s.to_string(),
        })
    }
}

pub(crate) fn check_field_ref(s: &str) -> Result<(), SqlError> {
    if is_field_ref(s) {
        Ok(())
    } else {
        Err(SqlError::BadIdentifier {
            ident: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_accept_word_characters_only() {
        assert!(is_identifier("users"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("t2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("users; DROP TABLE x"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn field_refs_allow_one_qualifier() {
        assert!(is_field_ref("name"));
        assert!(is_field_ref("users.name"));
        assert!(!is_field_ref("a.b.c"));
        assert!(!is_field_ref("users."));
        assert!(!is_field_ref(".name"));
    }
}
