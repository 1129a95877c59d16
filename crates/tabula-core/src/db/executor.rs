//! Module: db::executor
//! Responsibility: parameter binding, execution, and result hydration.
//! Does not own: statement text generation or cache policy.

use crate::{
    db::driver::{Row, Statement},
    error::MapperError,
    traits::Entity,
    value::{Value, flatten},
};

/// Number of positional placeholders in a generated statement.
///
/// Values are never interpolated and the sanitized ORDER BY text cannot
/// contain `?`, so every `?` byte in generated SQL is a placeholder.
#[must_use]
pub(crate) fn placeholder_count(sql: &str) -> usize {
    sql.bytes().filter(|b| *b == b'?').count()
}

// A placeholder/value mismatch is a programming error in statement
// assembly; it must never reach the driver.
fn check_placeholders(sql: &str, supplied: usize) -> Result<(), MapperError> {
    let expected = placeholder_count(sql);
    if expected == supplied {
        Ok(())
    } else {
        Err(MapperError::invariant(format!(
            "statement expects {expected} bound values, {supplied} supplied: {sql}"
        )))
    }
}

/// Flatten, count-check, and execute a write-style statement.
pub(crate) fn run_execute<S: Statement>(
    stmt: &mut S,
    sql: &str,
    values: Vec<Value>,
) -> Result<u64, MapperError> {
    let params = flatten(values);
    check_placeholders(sql, params.len())?;
    stmt.execute(&params).map_err(MapperError::from)
}

/// Flatten, count-check, and execute a read-style statement.
pub(crate) fn run_query<S: Statement>(
    stmt: &mut S,
    sql: &str,
    values: Vec<Value>,
) -> Result<Vec<Row>, MapperError> {
    let params = flatten(values);
    check_placeholders(sql, params.len())?;
    stmt.query(&params).map_err(MapperError::from)
}

/// Construct-and-collect hydration: one new instance per row.
pub(crate) fn hydrate_rows<E, F>(rows: Vec<Row>, mut factory: F) -> Vec<E>
where
    E: Entity,
    F: FnMut() -> E,
{
    rows.into_iter()
        .map(|row| {
            let mut entity = factory();
            fill(&mut entity, row);
            entity
        })
        .collect()
}

/// Fill-existing hydration: populate the instance from the first row.
/// Returns whether a row was applied; zero rows leaves the instance
/// untouched and is not an error.
pub(crate) fn fill_first<E: Entity>(entity: &mut E, rows: Vec<Row>) -> bool {
    match rows.into_iter().next() {
        Some(row) => {
            fill(entity, row);
            true
        }
        None => false,
    }
}

fn fill<E: Entity>(entity: &mut E, row: Row) {
    for (column, value) in row {
        entity.set(&column, value);
    }
}
