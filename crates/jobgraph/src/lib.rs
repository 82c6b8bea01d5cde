//! ## Crate layout
//! - `config`: TOML export-policy configuration read at startup.
//! - `core`: models, registry, values, row store, projector and exporter.
//!
//! The `prelude` module mirrors the surface used by request handlers that
//! turn loaded rows into response documents.

pub use jobgraph_config as config;
pub use jobgraph_core as core;

pub use jobgraph_core::{export, model, obs, path, project, registry, schema, store, value};

use jobgraph_config::ConfigError;
use jobgraph_core::{
    error::{ErrorClass, ModelDefinitionError, ProjectionError},
    schema::ValidationIssues,
};
use thiserror::Error as ThisError;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///
/// Umbrella error for hosts that drive configuration, registration,
/// projection and validation from one code path.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Definition(#[from] ModelDefinitionError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Validation(#[from] ValidationIssues),
}

impl Error {
    /// Request-time classification; startup failures have none.
    #[must_use]
    pub const fn class(&self) -> Option<ErrorClass> {
        match self {
            Self::Projection(err) => Some(err.class()),
            Self::Validation(_) => Some(ErrorClass::Mismatch),
            Self::Config(_) | Self::Definition(_) => None,
        }
    }
}

pub mod error {
    pub use crate::Error;
    pub use jobgraph_config::ConfigError;
    pub use jobgraph_core::error::*;
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{
        config::EngineConfig,
        export::{ExportOutcome, Setting},
    };
    pub use serde::Serialize;
}

///
/// TESTS
///
