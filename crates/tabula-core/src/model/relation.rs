use std::fmt;

///
/// RelationKind
///
/// Join category. Categories carry a fixed precedence: all `Require`
/// relations are emitted before any `Include` relation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelationKind {
    /// Row must exist on the related table (INNER JOIN).
    Require,
    /// Row may exist on the related table (LEFT JOIN).
    Include,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Require => "require",
            Self::Include => "include",
        };
        write!(f, "{label}")
    }
}

///
/// RelationModel
///
/// One declared relationship entry. `on` holds the join condition list
/// in the shared declaration mini-syntax (`local => target`, `?` for a
/// bound parameter) and is re-parsed at resolve time.
///
/// An entry with an empty `table` is a nested declaration: the loader
/// could not flatten it, and `on` carries the full `table: conditions`
/// text. The resolver unwraps that one extra level before treating the
/// entry as malformed.
///

pub struct RelationModel {
    pub kind: RelationKind,
    pub table: &'static str,
    pub on: &'static str,
}

impl RelationModel {
    #[must_use]
    pub const fn require(table: &'static str, on: &'static str) -> Self {
        Self {
            kind: RelationKind::Require,
            table,
            on,
        }
    }

    #[must_use]
    pub const fn include(table: &'static str, on: &'static str) -> Self {
        Self {
            kind: RelationKind::Include,
            table,
            on,
        }
    }

    /// Nested declaration form: the whole `table: conditions` entry in
    /// one string, to be unwrapped by the resolver.
    #[must_use]
    pub const fn nested(kind: RelationKind, declaration: &'static str) -> Self {
        Self {
            kind,
            table: "",
            on: declaration,
        }
    }
}
