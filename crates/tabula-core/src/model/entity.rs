use crate::model::{field::FieldModel, relation::RelationModel};

///
/// EntityModel
/// Minimal runtime model for one entity type. Built once, shared
/// read-only across every operation on that type.
///

pub struct EntityModel {
    /// Base table identifier.
    pub table: &'static str,
    /// Ordered field list (authoritative for SELECT column ordering).
    pub fields: &'static [FieldModel],
    /// Primary key field names, in declaration order.
    pub primary_keys: &'static [&'static str],
    /// Relationship entries, in declaration order.
    pub relations: &'static [RelationModel],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn has_relations(&self) -> bool {
        !self.relations.is_empty()
    }
}
