//! Field classifier and model registry.
//!
//! Registration runs once at startup: every model is validated against the
//! others, then classified into a read-only lookup table shared by the
//! projector and the exporter. Nothing mutates the registry afterwards, so it
//! can be shared freely between threads.
mod builder;
mod classify;
mod policy;
mod validate;


pub use builder::RegistryBuilder;
pub use classify::{ClassifiedField, ClassifiedModel, EdgeId, FieldClass};
pub use policy::EffectivePolicy;

use crate::{
    error::ProjectionError,
    export::Exporter,
    project::Projector,
    store::EntityStore,
};
use std::collections::BTreeMap;

///
/// ModelRegistry
///

#[derive(Debug)]
pub struct ModelRegistry {
    models: BTreeMap<&'static str, ClassifiedModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&ClassifiedModel> {
        self.models.get(kind)
    }

    pub fn try_get(&self, kind: &str) -> Result<&ClassifiedModel, ProjectionError> {
        self.get(kind)
            .ok_or_else(|| ProjectionError::UnknownKind(kind.to_string()))
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Shape-driven projector over `store`.
    #[must_use]
    pub fn projector<'a>(&'a self, store: &'a dyn EntityStore) -> Projector<'a> {
        Projector::new(self, store)
    }

    /// Graph exporter over `store`.
    #[must_use]
    pub fn exporter<'a>(&'a self, store: &'a dyn EntityStore) -> Exporter<'a> {
        Exporter::new(self, store)
    }
}
