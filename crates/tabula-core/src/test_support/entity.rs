use crate::{
    db::driver::Row,
    model::{entity::EntityModel, field::FieldModel},
    traits::Entity,
    value::Value,
};
use std::collections::BTreeMap;

static USER_FIELDS: &[FieldModel] = &[
    FieldModel::new("id"),
    FieldModel::new("name"),
    FieldModel::new("created_at"),
];

static USER_MODEL: EntityModel = EntityModel {
    table: "users",
    fields: USER_FIELDS,
    primary_keys: &["id"],
    relations: &[],
};

///
/// TestUser
///
/// Map-backed fixture entity. Distinguishes unset fields (absent key)
/// from explicit nulls (key present with `Value::Null`) so presence
/// semantics can be asserted directly.
///

#[derive(Debug, Default)]
pub(crate) struct TestUser {
    values: BTreeMap<String, Value>,
    clean: bool,
}

impl TestUser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.clean
    }
}

impl Entity for TestUser {
    const MODEL: &'static EntityModel = &USER_MODEL;

    fn get(&self, field: &str) -> Option<Value> {
        self.values.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    fn mark_clean(&mut self) {
        self.clean = true;
    }

    fn hydrate() -> Self {
        Self::new()
    }
}

pub(crate) fn user_row(id: i64, name: &str) -> Row {
    vec![
        ("id".to_string(), Value::Int(id)),
        ("name".to_string(), Value::Text(name.to_string())),
    ]
}
