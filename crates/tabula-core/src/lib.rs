//! Core runtime for Tabula: entity metadata, SQL generation, statement
//! caching, and the execution/hydration engine behind the adapter façade.
#![warn(unreachable_pub)]

pub mod db;
pub mod error;
pub mod model;
pub mod sql;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No drivers, caches, or internal builders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Adapter, QueryFilter, QueryOptions},
        error::MapperError,
        model::{
            entity::EntityModel,
            field::FieldModel,
            relation::{RelationKind, RelationModel},
        },
        traits::Entity,
        value::Value,
    };
}
