//! Registration-time validation, run in a staged, deterministic order.
//! Issues are collected across all models before failing.

mod naming;
mod policy;
mod relation;

use crate::{
    error::{DefinitionIssue, ModelDefinitionError},
    model::EntityModel,
};
use jobgraph_config::EngineConfig;
use std::collections::BTreeMap;

/// Maximum length for entity kind names.
pub const MAX_KIND_NAME_LEN: usize = 64;

/// Maximum length for field and computed attribute names.
pub const MAX_FIELD_NAME_LEN: usize = 64;

///
/// Issues
/// Accumulator for definition issues.
///

#[derive(Debug, Default)]
pub(super) struct Issues {
    issues: Vec<DefinitionIssue>,
}

impl Issues {
    pub(super) fn add(&mut self, issue: DefinitionIssue) {
        self.issues.push(issue);
    }

    pub(super) fn result(self) -> Result<(), ModelDefinitionError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ModelDefinitionError {
                issues: self.issues,
            })
        }
    }
}

pub(super) fn validate_models(
    models: &[&'static EntityModel],
    by_name: &BTreeMap<&'static str, &'static EntityModel>,
    config: &EngineConfig,
) -> Result<(), ModelDefinitionError> {
    let mut issues = Issues::default();

    // Phase 1: local invariants of each model.
    naming::validate_kind_names(models, &mut issues);
    for model in models {
        naming::validate_fields(model, &mut issues);
    }

    // Phase 2: relations, which need the full set of kinds.
    for model in models {
        relation::validate_relations(model, by_name, &mut issues);
    }
    relation::validate_derived_uniqueness(models, &mut issues);

    // Phase 3: declared policies and configuration overrides.
    for model in models {
        policy::validate_declared_policy(model, &mut issues);
    }
    policy::validate_config(config, by_name, &mut issues);

    issues.result()
}
