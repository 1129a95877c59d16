use crate::value::Value;

///
/// QueryFilter
///
/// Ordered field-reference → equality-value pairs. Keys may be
/// table-qualified with a single `.`; unqualified keys are bound to the
/// base table at build time. Ordering is preserved into the generated
/// SQL so identical filters produce identical statement text.
///

#[derive(Clone, Debug, Default)]
pub struct QueryFilter {
    entries: Vec<(String, Value)>,
}

impl QueryFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an equality term.
    #[must_use]
    pub fn eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
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

///
/// QueryOptions
///
/// Optional ORDER BY text (sanitized before use), LIMIT, and OFFSET.
/// Limit and offset are rendered textually, so distinct values produce
/// distinct statement cache entries.
///

#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryOptions {
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}
