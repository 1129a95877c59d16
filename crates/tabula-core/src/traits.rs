use crate::{model::entity::EntityModel, value::Value};

///
/// Entity
///
/// Collaborator contract for the model object being loaded or
/// persisted. The core borrows an instance for the duration of one
/// operation and never retains it.
///
/// Field presence semantics:
/// - `get` returns `None` when the field is not currently set on the
///   instance (omitted from INSERT and UPDATE),
/// - `Some(Value::Null)` when the field is present but explicitly null
///   (omitted from INSERT, `field = NULL` in UPDATE),
/// - `Some(value)` otherwise.
///

pub trait Entity {
    /// Static descriptor for this entity type.
    const MODEL: &'static EntityModel;

    fn get(&self, field: &str) -> Option<Value>;

    fn set(&mut self, field: &str, value: Value);

    /// Clear any pending-write state after a fill from the database.
    fn mark_clean(&mut self);

    /// Blank instance used by bulk hydration.
    fn hydrate() -> Self;
}
