///
/// FieldModel
/// Runtime field metadata used by SQL generation and hydration.
///

pub struct FieldModel {
    /// Field name as used in statements and hydration.
    pub name: &'static str,
    /// Optional source expression for computed columns. When present,
    /// SELECT emits `<from> AS <name>` and the field is excluded from
    /// INSERT and UPDATE.
    pub from: Option<&'static str>,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, from: None }
    }

    #[must_use]
    pub const fn computed(name: &'static str, from: &'static str) -> Self {
        Self {
            name,
            from: Some(from),
        }
    }

    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.from.is_some()
    }
}
