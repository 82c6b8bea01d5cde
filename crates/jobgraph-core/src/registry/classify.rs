use crate::{
    model::{ComputedAttr, EntityModel, FieldKind},
    registry::policy::EffectivePolicy,
    value::ScalarType,
};
use derive_more::Display;
use std::collections::BTreeMap;

///
/// EdgeId
///
/// Canonical identity of a relation, shared by both of its directions.
/// An owned reference and its derived collection are both
/// `Ref(source, field)`; both sides of a many-to-many are `Join(through)`.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EdgeId {
    #[display("{kind}.{field}")]
    Ref {
        kind: &'static str,
        field: &'static str,
    },
    #[display("{through}")]
    Join { through: &'static str },
}

///
/// FieldClass
/// Classified field, resolved against the rest of the registry.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldClass {
    Scalar {
        ty: ScalarType,
        nullable: bool,
    },
    OwnedRef {
        target: &'static str,
        nullable: bool,
        edge: EdgeId,
    },
    OwnedMultiRef {
        target: &'static str,
        through: &'static str,
        /// Join column pointing back at the owning row.
        near: &'static str,
        /// Join column pointing at the related row.
        far: &'static str,
        edge: EdgeId,
    },
    DerivedCollection {
        source: &'static str,
        via: &'static str,
        edge: EdgeId,
    },
}

impl FieldClass {
    /// Relation edge, if this field is a relation.
    #[must_use]
    pub const fn edge(&self) -> Option<EdgeId> {
        match self {
            Self::Scalar { .. } => None,
            Self::OwnedRef { edge, .. }
            | Self::OwnedMultiRef { edge, .. }
            | Self::DerivedCollection { edge, .. } => Some(*edge),
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::OwnedMultiRef { .. } | Self::DerivedCollection { .. }
        )
    }

    /// Shape name used in type-mismatch diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar { ty, .. } => format!("scalar {ty}"),
            Self::OwnedRef { target, .. } => format!("reference to {target}"),
            Self::OwnedMultiRef { target, .. } => format!("many-to-many to {target}"),
            Self::DerivedCollection { source, via, .. } => {
                format!("collection of {source} (via {via})")
            }
        }
    }
}

///
/// ClassifiedField
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassifiedField {
    pub name: &'static str,
    pub class: FieldClass,
}

///
/// ClassifiedModel
///
/// Classification table entry for one kind: declared fields in order, a
/// name index, and the effective export policy.
///

#[derive(Debug)]
pub struct ClassifiedModel {
    model: &'static EntityModel,
    fields: Vec<ClassifiedField>,
    index: BTreeMap<&'static str, usize>,
    policy: EffectivePolicy,
}

impl ClassifiedModel {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.model.name
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub const fn primary_key(&self) -> &'static str {
        self.model.primary_key
    }

    #[must_use]
    pub const fn policy(&self) -> &EffectivePolicy {
        &self.policy
    }

    /// All classified fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ClassifiedField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ClassifiedField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    #[must_use]
    pub fn computed(&self, name: &str) -> Option<&'static ComputedAttr> {
        self.model.computed.iter().find(|c| c.name == name)
    }

    /// Fields owned by this kind (everything but derived collections).
    pub fn owned_fields(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.fields
            .iter()
            .filter(|f| !matches!(f.class, FieldClass::DerivedCollection { .. }))
    }

    /// Derived collections (back-references) in declaration order.
    pub fn derived_fields(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.fields
            .iter()
            .filter(|f| matches!(f.class, FieldClass::DerivedCollection { .. }))
    }
}

// Classify one model. Runs only after validation passed, so every target and
// join kind referenced here is known to exist with the right shape.
pub(super) fn classify_model(
    model: &'static EntityModel,
    models: &BTreeMap<&'static str, &'static EntityModel>,
    policy: EffectivePolicy,
) -> ClassifiedModel {
    let mut fields = Vec::with_capacity(model.fields.len());
    let mut index = BTreeMap::new();

    for field in model.fields {
        let class = match field.kind {
            FieldKind::Scalar { ty, nullable } => FieldClass::Scalar { ty, nullable },
            FieldKind::OwnedRef { target, nullable } => FieldClass::OwnedRef {
                target,
                nullable,
                edge: EdgeId::Ref {
                    kind: model.name,
                    field: field.name,
                },
            },
            FieldKind::OwnedMultiRef { target, through } => {
                let (near, far) = models
                    .get(through)
                    .map_or(("", ""), |join| join_columns(join, model.name, target));

                FieldClass::OwnedMultiRef {
                    target,
                    through,
                    near,
                    far,
                    edge: EdgeId::Join { through },
                }
            }
            FieldKind::DerivedCollection { source, via } => FieldClass::DerivedCollection {
                source,
                via,
                edge: EdgeId::Ref {
                    kind: source,
                    field: via,
                },
            },
        };

        index.insert(field.name, fields.len());
        fields.push(ClassifiedField {
            name: field.name,
            class,
        });
    }

    ClassifiedModel {
        model,
        fields,
        index,
        policy,
    }
}

/// Reference columns of a join kind, in declaration order.
pub(super) fn join_references(join: &EntityModel) -> Vec<(&'static str, &'static str)> {
    join.references().collect()
}

// Pick (near, far) join columns for an owner/target pair. Self-relations use
// declaration order.
fn join_columns(
    join: &EntityModel,
    owner: &'static str,
    target: &'static str,
) -> (&'static str, &'static str) {
    let refs = join_references(join);
    let [(first, first_target), (second, _)] = refs.as_slice() else {
        return ("", "");
    };

    if *first_target == owner || owner == target {
        (*first, *second)
    } else {
        (*second, *first)
    }
}
