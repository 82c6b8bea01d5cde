use super::Issues;
use crate::{error::DefinitionIssue, model::EntityModel};
use jobgraph_config::EngineConfig;
use std::collections::BTreeMap;

pub(super) fn validate_declared_policy(model: &EntityModel, issues: &mut Issues) {
    let policy = &model.policy;

    for name in policy.exclude {
        if model.field(name).is_none() {
            issues.add(unknown(model.name, name, "exclude"));
        }
    }

    for name in policy.include {
        if model.computed(name).is_none() && model.field(name).is_none() {
            issues.add(unknown(model.name, name, "include"));
        }
    }
}

// Configuration may only override kinds and fields that exist.
pub(super) fn validate_config(
    config: &EngineConfig,
    by_name: &BTreeMap<&'static str, &'static EntityModel>,
    issues: &mut Issues,
) {
    for (kind, policy) in &config.entity {
        let Some(model) = by_name.get(kind.as_str()) else {
            issues.add(DefinitionIssue::InvalidPolicy {
                kind: kind.clone(),
                message: "configured kind is not registered".to_string(),
            });
            continue;
        };

        for name in policy.exclude.iter().flatten() {
            if model.field(name).is_none() {
                issues.add(unknown(model.name, name, "config exclude"));
            }
        }

        for name in policy.include.iter().flatten() {
            if model.computed(name).is_none() && model.field(name).is_none() {
                issues.add(unknown(model.name, name, "config include"));
            }
        }
    }
}

fn unknown(kind: &str, field: &str, setting: &'static str) -> DefinitionIssue {
    DefinitionIssue::UnknownPolicyField {
        kind: kind.to_string(),
        field: field.to_string(),
        setting,
    }
}
