use crate::sql::is_identifier;
use thiserror::Error as ThisError;

/// Literal marker for a join condition bound at execution time.
pub const BOUND_MARKER: &str = "?";

///
/// JoinTarget
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JoinTarget {
    /// Equality against a column on the base table.
    Column(String),
    /// Equality against a caller-supplied query parameter.
    Bound,
}

///
/// JoinCondition
/// One `local => target` entry from a condition list.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinCondition {
    pub column: String,
    pub target: JoinTarget,
}

///
/// RelationEntry
/// A fully parsed relationship declaration.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelationEntry {
    pub table: String,
    pub conditions: Vec<JoinCondition>,
}

///
/// ConditionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConditionError {
    #[error("empty condition list")]
    Empty,

    #[error("condition entry '{entry}' is missing the '=>' separator")]
    MissingSeparator { entry: String },

    #[error("condition entry contains an invalid identifier: '{ident}'")]
    BadIdentifier { ident: String },

    #[error("malformed relation declaration: '{text}'")]
    MalformedRelation { text: String },
}

/// Parse a join condition list in the shared declaration mini-syntax.
///
/// Entries are comma-separated `local => target` pairs. `target` is a
/// column name on the base table, or the literal `?` marker for a value
/// bound at execution time. Shared by the metadata layer and the join
/// resolver; both sides see identical structure for identical text.
pub fn parse_condition_list(text: &str) -> Result<Vec<JoinCondition>, ConditionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConditionError::Empty);
    }

    let mut conditions = Vec::new();
    for entry in text.split(',') {
        let entry = entry.trim();
        let Some((column, target)) = entry.split_once("=>") else {
            return Err(ConditionError::MissingSeparator {
                entry: entry.to_string(),
            });
        };

        let column = column.trim();
        if !is_identifier(column) {
            return Err(ConditionError::BadIdentifier {
                ident: column.to_string(),
            });
        }

        let target = target.trim();
        let target = if target == BOUND_MARKER {
            JoinTarget::Bound
        } else if is_identifier(target) {
            JoinTarget::Column(target.to_string())
        } else {
            return Err(ConditionError::BadIdentifier {
                ident: target.to_string(),
            });
        };

        conditions.push(JoinCondition {
            column: column.to_string(),
            target,
        });
    }

    Ok(conditions)
}

/// Parse one relationship entry into its table and condition list.
///
/// The flattened form carries the table alongside the condition text.
/// An entry with no table of its own is a nested declaration
/// (`table: conditions`, optionally parenthesised); it gets exactly one
/// unwrap attempt before being reported as malformed.
pub fn parse_relation_entry(table: &str, on: &str) -> Result<RelationEntry, ConditionError> {
    if !table.is_empty() {
        if !is_identifier(table) {
            return Err(ConditionError::BadIdentifier {
                ident: table.to_string(),
            });
        }
        return Ok(RelationEntry {
            table: table.to_string(),
            conditions: parse_condition_list(on)?,
        });
    }

    // Nested declaration: unwrap one level, then re-parse.
    let inner = unwrap_nested(on);
    let Some((table, conditions)) = inner.split_once(':') else {
        return Err(ConditionError::MalformedRelation {
            text: on.to_string(),
        });
    };

    let table = table.trim();
    if !is_identifier(table) {
        return Err(ConditionError::BadIdentifier {
            ident: table.to_string(),
        });
    }

    Ok(RelationEntry {
        table: table.to_string(),
        conditions: parse_condition_list(conditions)?,
    })
}

// One unwrap level only; deeper nesting is malformed by construction.
fn unwrap_nested(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .map_or(text, str::trim)
}
