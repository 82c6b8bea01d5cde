use super::{Issues, MAX_FIELD_NAME_LEN, MAX_KIND_NAME_LEN};
use crate::{error::DefinitionIssue, model::EntityModel};
use std::collections::BTreeSet;

pub(super) fn validate_kind_names(models: &[&'static EntityModel], issues: &mut Issues) {
    let mut seen = BTreeSet::new();

    for model in models {
        if let Err(message) = validate_kind_name(model.name) {
            issues.add(DefinitionIssue::InvalidName {
                kind: model.name.to_string(),
                message,
            });
        }

        if !seen.insert(model.name) {
            issues.add(DefinitionIssue::DuplicateKind {
                kind: model.name.to_string(),
            });
        }
    }
}

// Field and computed attribute names share one namespace per kind, so a
// back-reference can never shadow a column or an accessor.
pub(super) fn validate_fields(model: &EntityModel, issues: &mut Issues) {
    let mut names = BTreeSet::new();

    let declared = model.fields.iter().map(|f| f.name);
    let computed = model.computed.iter().map(|c| c.name);

    for name in declared.chain(computed) {
        if let Err(message) = validate_field_name(name) {
            issues.add(DefinitionIssue::InvalidName {
                kind: model.name.to_string(),
                message,
            });
        }

        if !names.insert(name) {
            issues.add(DefinitionIssue::DuplicateField {
                kind: model.name.to_string(),
                field: name.to_string(),
            });
        }
    }

    match model.field(model.primary_key) {
        None => issues.add(DefinitionIssue::InvalidPrimaryKey {
            kind: model.name.to_string(),
            field: model.primary_key.to_string(),
            message: "is not a declared field".to_string(),
        }),
        Some(field) if !field.kind.is_scalar() => issues.add(DefinitionIssue::InvalidPrimaryKey {
            kind: model.name.to_string(),
            field: model.primary_key.to_string(),
            message: "must be a scalar field".to_string(),
        }),
        Some(_) => {}
    }
}

/// Ensure kind names are non-empty, ASCII, and within the maximum length.
fn validate_kind_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("kind name is empty".to_string());
    }
    if name.len() > MAX_KIND_NAME_LEN {
        return Err(format!(
            "kind name '{name}' exceeds max length {MAX_KIND_NAME_LEN}"
        ));
    }
    if !name.is_ascii() {
        return Err(format!("kind name '{name}' must be ASCII"));
    }

    Ok(())
}

fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("field name is empty".to_string());
    }
    if name.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "field name '{name}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }
    // qualified filters use '.' as the kind separator
    if name.contains('.') {
        return Err(format!("field name '{name}' must not contain '.'"));
    }

    Ok(())
}
