use crate::{
    db::driver::{Driver, DriverError, Row, Statement},
    value::Value,
};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

///
/// LastInsertScript
///

enum LastInsertScript {
    Value(Value),
    Unsupported,
}

///
/// Shared
/// Interior state observed through cloned driver handles.
///

struct Shared {
    prepared: Vec<String>,
    executed: Vec<(String, Vec<Value>)>,
    row_queue: VecDeque<Vec<Row>>,
    fail_next_prepare: Option<String>,
    fail_next_execute: Option<String>,
    last_insert: LastInsertScript,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            prepared: Vec::new(),
            executed: Vec::new(),
            row_queue: VecDeque::new(),
            fail_next_prepare: None,
            fail_next_execute: None,
            last_insert: LastInsertScript::Value(Value::Null),
        }
    }
}

///
/// MockDriver
///
/// Scripted driver double. Records every prepare and execution, serves
/// queued result rows in FIFO order, and can be told to fail the next
/// prepare/execution or to report last-insert-id as unsupported.
/// Cloned handles share state, so tests can keep one for assertions
/// while the adapter owns another.
///

#[derive(Clone, Default)]
pub(crate) struct MockDriver {
    shared: Rc<RefCell<Shared>>,
}

impl MockDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_rows(&self, rows: Vec<Row>) {
        self.shared.borrow_mut().row_queue.push_back(rows);
    }

    pub(crate) fn fail_next_prepare(&self, message: &str) {
        self.shared.borrow_mut().fail_next_prepare = Some(message.to_string());
    }

    pub(crate) fn fail_next_execute(&self, message: &str) {
        self.shared.borrow_mut().fail_next_execute = Some(message.to_string());
    }

    pub(crate) fn set_last_insert(&self, value: Value) {
        self.shared.borrow_mut().last_insert = LastInsertScript::Value(value);
    }

    pub(crate) fn set_last_insert_unsupported(&self) {
        self.shared.borrow_mut().last_insert = LastInsertScript::Unsupported;
    }

    pub(crate) fn prepared(&self) -> Vec<String> {
        self.shared.borrow().prepared.clone()
    }

    pub(crate) fn executed(&self) -> Vec<(String, Vec<Value>)> {
        self.shared.borrow().executed.clone()
    }
}

impl Driver for MockDriver {
    type Stmt = MockStatement;

    fn prepare(&mut self, sql: &str) -> Result<Self::Stmt, DriverError> {
        let mut shared = self.shared.borrow_mut();
        if let Some(message) = shared.fail_next_prepare.take() {
            return Err(DriverError::prepare(message));
        }
        shared.prepared.push(sql.to_string());

        Ok(MockStatement {
            sql: sql.to_string(),
            shared: Rc::clone(&self.shared),
        })
    }

    fn last_insert_id(&mut self, _table: &str) -> Result<Value, DriverError> {
        match &self.shared.borrow().last_insert {
            LastInsertScript::Value(value) => Ok(value.clone()),
            LastInsertScript::Unsupported => Err(DriverError::unsupported("last-insert-id")),
        }
    }
}

///
/// MockStatement
///

pub(crate) struct MockStatement {
    sql: String,
    shared: Rc<RefCell<Shared>>,
}

impl std::fmt::Debug for MockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStatement")
            .field("sql", &self.sql)
            .finish_non_exhaustive()
    }
}

impl Statement for MockStatement {
    fn execute(&mut self, params: &[Value]) -> Result<u64, DriverError> {
        let mut shared = self.shared.borrow_mut();
        if let Some(message) = shared.fail_next_execute.take() {
            return Err(DriverError::execution(message));
        }
        shared
            .executed
            .push((self.sql.clone(), params.to_vec()));
        Ok(1)
    }

    fn query(&mut self, params: &[Value]) -> Result<Vec<Row>, DriverError> {
        let mut shared = self.shared.borrow_mut();
        if let Some(message) = shared.fail_next_execute.take() {
            return Err(DriverError::execution(message));
        }
        shared
            .executed
            .push((self.sql.clone(), params.to_vec()));
        Ok(shared.row_queue.pop_front().unwrap_or_default())
    }
}
