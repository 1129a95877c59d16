pub mod adapter;
pub mod cache;
pub mod driver;
pub mod executor;
pub mod query;

pub use adapter::Adapter;
pub use query::{QueryFilter, QueryOptions};
