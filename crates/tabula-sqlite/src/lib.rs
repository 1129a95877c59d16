//! SQLite backend for Tabula, built on `rusqlite`.
//!
//! Statement handles returned by [`SqliteDriver::prepare`] do not hold a
//! borrow of the connection; they re-enter rusqlite's own prepared
//! statement cache by SQL text on each use. The core's exact-text cache
//! memoizes the handles, so the per-call cache lookup is the only
//! repeated work.
#![warn(unreachable_pub)]

use rusqlite::{Connection, params_from_iter, types::ValueRef};
use std::rc::Rc;
use tabula_core::{
    db::driver::{Driver, DriverError, Row, Statement},
    value::Value,
};

// Upper bound on rusqlite's internal statement cache. Distinct
// generated texts are bounded by entity shape, so this is generous.
const STATEMENT_CACHE_CAPACITY: usize = 256;

///
/// SqliteDriver
///
/// Driver over one SQLite connection. Cloned handles share the
/// connection; access is synchronous and single-threaded.
///

#[derive(Clone)]
pub struct SqliteDriver {
    conn: Rc<Connection>,
}

impl SqliteDriver {
    pub fn open(path: &str) -> Result<Self, DriverError> {
        let conn = Connection::open(path).map_err(connect_error)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, DriverError> {
        let conn = Connection::open_in_memory().map_err(connect_error)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        conn.set_prepared_statement_cache_capacity(STATEMENT_CACHE_CAPACITY);
        Self {
            conn: Rc::new(conn),
        }
    }

    /// Run raw SQL outside the mapper, for schema setup and migrations.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DriverError> {
        self.conn.execute_batch(sql).map_err(execution_error)
    }
}

impl Driver for SqliteDriver {
    type Stmt = SqliteStatement;

    fn prepare(&mut self, sql: &str) -> Result<Self::Stmt, DriverError> {
        // Validate eagerly so bad SQL surfaces as a prepare error and
        // never enters the core's statement cache.
        self.conn
            .prepare_cached(sql)
            .map_err(|err| DriverError::prepare(err.to_string()))?;

        Ok(SqliteStatement {
            conn: Rc::clone(&self.conn),
            sql: sql.to_string(),
        })
    }

    fn last_insert_id(&mut self, _table: &str) -> Result<Value, DriverError> {
        match self.conn.last_insert_rowid() {
            0 => Ok(Value::Null),
            id => Ok(Value::Int(id)),
        }
    }
}

///
/// SqliteStatement
/// Cached-statement handle keyed by SQL text.
///

pub struct SqliteStatement {
    conn: Rc<Connection>,
    sql: String,
}

impl Statement for SqliteStatement {
    fn execute(&mut self, params: &[Value]) -> Result<u64, DriverError> {
        let mut stmt = self
            .conn
            .prepare_cached(&self.sql)
            .map_err(execution_error)?;
        let bound = bind_params(params)?;

        let affected = stmt
            .execute(params_from_iter(bound))
            .map_err(execution_error)?;
        Ok(affected as u64)
    }

    fn query(&mut self, params: &[Value]) -> Result<Vec<Row>, DriverError> {
        let mut stmt = self
            .conn
            .prepare_cached(&self.sql)
            .map_err(execution_error)?;
        let columns: Vec<String> = stmt.column_names().iter().map(ToString::to_string).collect();
        let bound = bind_params(params)?;

        let mut rows = stmt
            .query(params_from_iter(bound))
            .map_err(execution_error)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(execution_error)? {
            let mut fields = Row::with_capacity(columns.len());
            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(execution_error)?;
                fields.push((column.clone(), read_value(value)?));
            }
            out.push(fields);
        }
        Ok(out)
    }
}

fn connect_error(err: rusqlite::Error) -> DriverError {
    DriverError::prepare(format!("connection failed: {err}"))
}

fn execution_error(err: rusqlite::Error) -> DriverError {
    DriverError::execution(err.to_string())
}

// Booleans are stored as 0/1 integers, SQLite's native convention.
fn bind_params(params: &[Value]) -> Result<Vec<rusqlite::types::Value>, DriverError> {
    let mut bound = Vec::with_capacity(params.len());
    for param in params {
        let value = match param {
            Value::Null => rusqlite::types::Value::Null,
            Value::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
            Value::Int(i) => rusqlite::types::Value::Integer(*i),
            Value::Float(f) => rusqlite::types::Value::Real(*f),
            Value::Text(t) => rusqlite::types::Value::Text(t.clone()),
            Value::Blob(b) => rusqlite::types::Value::Blob(b.clone()),
            Value::List(_) => {
                return Err(DriverError::execution(
                    "list parameter reached the driver unflattened",
                ));
            }
        };
        bound.push(value);
    }
    Ok(bound)
}

fn read_value(value: ValueRef<'_>) -> Result<Value, DriverError> {
    let value = match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|err| DriverError::execution(format!("non-utf8 text column: {err}")))?;
            Value::Text(text.to_string())
        }
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    };
    Ok(value)
}
