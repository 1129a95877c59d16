use crate::db::driver::{Driver, DriverError, Statement};
use std::collections::{HashMap, hash_map::Entry};

///
/// StatementCache
///
/// Exact-SQL-text → prepared statement memoization. Entries live for
/// the adapter's lifetime and are never evicted: the set of distinct
/// generated texts is bounded by entity shape (filter-key, option, and
/// operation combinations), not by query volume, so the only failure
/// mode worth guarding is preparing twice for identical text.
///

pub struct StatementCache<S> {
    entries: HashMap<String, S>,
}

impl<S: Statement> StatementCache<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached statement for `sql`, preparing it on first use.
    pub fn get_or_prepare<'a, D>(
        &'a mut self,
        driver: &mut D,
        sql: &str,
    ) -> Result<&'a mut S, DriverError>
    where
        D: Driver<Stmt = S>,
    {
        match self.entries.entry(sql.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let stmt = driver.prepare(sql)?;
                Ok(slot.insert(stmt))
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Statement> Default for StatementCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
