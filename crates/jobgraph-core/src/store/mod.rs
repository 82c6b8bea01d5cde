//! Read seam to the persistence layer.
//!
//! The engine never loads or writes rows itself. Hosts hand it an
//! `EntityStore` whose rows are already materialized; `EntityGraph` is the
//! in-memory implementation used by tests and fixtures.
mod graph;
mod row;

pub(crate) mod related;

pub use graph::EntityGraph;
pub use row::EntityRow;

use crate::value::Key;

///
/// EntityStore
///

pub trait EntityStore {
    /// Fetch one row by kind and primary key.
    fn get(&self, kind: &str, key: &Key) -> Option<&EntityRow>;

    /// Rows of `source_kind` whose reference column `via` holds `target`,
    /// in persistence order.
    fn referencing(&self, source_kind: &str, via: &str, target: &Key) -> Vec<&EntityRow>;
}
