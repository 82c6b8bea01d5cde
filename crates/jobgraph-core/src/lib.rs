//! Core runtime for jobgraph: entity models, the classification registry,
//! values, the row store seam, and the two projection walks (schema
//! projection and graph export) with their observability sink.

// public exports are one module level down
pub mod error;
pub mod export;
pub mod model;
pub mod obs;
pub mod path;
pub mod project;
pub mod registry;
pub mod schema;
pub mod store;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or traversal internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        export::{ExportOptions, Exporter},
        model::{
            AttrContext, ComputedAttr, EntityModel, ExportPolicy, FieldModel, MaxDepth,
        },
        project::{Overrides, Projector},
        registry::ModelRegistry,
        schema::{Constraint, SchemaDescriptor, SchemaField},
        store::{EntityGraph, EntityRow, EntityStore},
        value::{Document, Key, ScalarType, Value},
    };
}
