use serde::{Deserialize, Serialize};

///
/// Value
///
/// Bind value carried from entity state and filters into positional
/// statement parameters.
///
/// Null → SQL NULL.
/// List → structured parameter sets (e.g. adapter-held query params);
///        never bound directly, always flattened first.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Flatten this value into a linear positional parameter list.
    ///
    /// The underlying binding protocol accepts only a flat ordered list,
    /// so nested lists are expanded in stable declaration order.
    pub fn flatten_into(self, out: &mut Vec<Value>) {
        match self {
            Self::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

/// Flatten a value sequence into the linear positional parameter list.
#[must_use]
pub fn flatten(values: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        value.flatten_into(&mut out);
    }
    out
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
