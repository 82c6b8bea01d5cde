//! Job-board catalogue for jobgraph.
//!
//! - `model`: entity kinds of the job board and their relations.
//! - `computed`: salary, age bucket, requirement list and category averages.
//! - `schema`: response and request descriptors.
//! - `seed`: a small graph used by fixtures and tests.
//! - `service`: request-level reads built on the projector.

pub mod computed;
pub mod model;
pub mod schema;
pub mod seed;
pub mod service;

use jobgraph::{config::EngineConfig, error::ModelDefinitionError, registry::ModelRegistry};

/// Registry of the full catalogue with declared policies.
pub fn registry() -> Result<ModelRegistry, ModelDefinitionError> {
    ModelRegistry::builder().register_all(model::MODELS).build()
}

/// Registry of the full catalogue with configured policy overrides.
pub fn registry_with(config: EngineConfig) -> Result<ModelRegistry, ModelDefinitionError> {
    ModelRegistry::builder()
        .register_all(model::MODELS)
        .with_config(config)
        .build()
}
