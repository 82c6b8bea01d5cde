use super::Issues;
use crate::{
    error::DefinitionIssue,
    model::{EntityModel, FieldKind, FieldModel},
    registry::classify::join_references,
};
use std::collections::{BTreeMap, BTreeSet};

// Validate every relation of one model against the registered kinds.
pub(super) fn validate_relations(
    model: &EntityModel,
    by_name: &BTreeMap<&'static str, &'static EntityModel>,
    issues: &mut Issues,
) {
    for field in model.fields {
        match field.kind {
            FieldKind::Scalar { .. } => {}
            FieldKind::OwnedRef { target, .. } => {
                require_kind(model, field, target, by_name, issues);
            }
            FieldKind::OwnedMultiRef { target, through } => {
                if require_kind(model, field, target, by_name, issues) {
                    validate_join(model, field, target, through, by_name, issues);
                }
            }
            FieldKind::DerivedCollection { source, via } => {
                if let Some(source_model) = by_name.get(source) {
                    validate_inverse(model, field, source_model, via, issues);
                } else {
                    issues.add(DefinitionIssue::UnknownTarget {
                        kind: model.name.to_string(),
                        field: field.name.to_string(),
                        target: source.to_string(),
                    });
                }
            }
        }
    }
}

// A relation edge may be inverted by at most one derived collection.
pub(super) fn validate_derived_uniqueness(models: &[&'static EntityModel], issues: &mut Issues) {
    let mut inverted: BTreeSet<(&str, &str)> = BTreeSet::new();

    for model in models {
        for field in model.fields {
            let FieldKind::DerivedCollection { source, via } = field.kind else {
                continue;
            };

            if !inverted.insert((source, via)) {
                issues.add(DefinitionIssue::DuplicateDerived {
                    kind: model.name.to_string(),
                    field: field.name.to_string(),
                    source_kind: source.to_string(),
                    via: via.to_string(),
                });
            }
        }
    }
}

fn require_kind(
    model: &EntityModel,
    field: &FieldModel,
    target: &str,
    by_name: &BTreeMap<&'static str, &'static EntityModel>,
    issues: &mut Issues,
) -> bool {
    if by_name.contains_key(target) {
        return true;
    }

    issues.add(DefinitionIssue::UnknownTarget {
        kind: model.name.to_string(),
        field: field.name.to_string(),
        target: target.to_string(),
    });

    false
}

// The join kind must hold exactly two owned references, one on each side.
fn validate_join(
    model: &EntityModel,
    field: &FieldModel,
    target: &str,
    through: &str,
    by_name: &BTreeMap<&'static str, &'static EntityModel>,
    issues: &mut Issues,
) {
    let join_issue = |message: String| DefinitionIssue::InvalidJoin {
        kind: model.name.to_string(),
        field: field.name.to_string(),
        through: through.to_string(),
        message,
    };

    let Some(join) = by_name.get(through) else {
        issues.add(join_issue("is not registered".to_string()));
        return;
    };

    let refs = join_references(join);
    if refs.len() != 2 {
        issues.add(join_issue(format!(
            "must declare exactly two owned references, found {}",
            refs.len()
        )));
        return;
    }

    let mut targets = [refs[0].1, refs[1].1];
    let mut expected = [model.name, target];
    targets.sort_unstable();
    expected.sort_unstable();

    if targets != expected {
        issues.add(join_issue(format!(
            "must reference '{}' and '{}', found '{}' and '{}'",
            model.name, target, refs[0].1, refs[1].1
        )));
    }
}

// A derived collection inverts exactly one owned reference that targets the
// owning kind.
fn validate_inverse(
    model: &EntityModel,
    field: &FieldModel,
    source: &EntityModel,
    via: &str,
    issues: &mut Issues,
) {
    let message = match source.field(via).map(|f| f.kind) {
        None => format!("'{}.{via}' is not a declared field", source.name),
        Some(FieldKind::OwnedRef { target, .. }) if target == model.name => return,
        Some(FieldKind::OwnedRef { target, .. }) => format!(
            "'{}.{via}' references '{target}', not '{}'",
            source.name, model.name
        ),
        Some(_) => format!("'{}.{via}' is not an owned reference", source.name),
    };

    issues.add(DefinitionIssue::InvalidDerived {
        kind: model.name.to_string(),
        field: field.name.to_string(),
        message,
    });
}
