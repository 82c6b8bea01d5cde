use crate::value::ScalarType;

///
/// FieldModel
/// One declared field of an entity model.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn scalar(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar {
                ty,
                nullable: false,
            },
        }
    }

    #[must_use]
    pub const fn nullable(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar { ty, nullable: true },
        }
    }

    #[must_use]
    pub const fn reference(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::OwnedRef {
                target,
                nullable: false,
            },
        }
    }

    #[must_use]
    pub const fn nullable_reference(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::OwnedRef {
                target,
                nullable: true,
            },
        }
    }

    #[must_use]
    pub const fn many_to_many(
        name: &'static str,
        target: &'static str,
        through: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::OwnedMultiRef { target, through },
        }
    }

    #[must_use]
    pub const fn derived(name: &'static str, source: &'static str, via: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::DerivedCollection { source, via },
        }
    }
}

///
/// FieldKind
///
/// Relation shape of a declared field.
///
/// - `OwnedRef` is a foreign-key style column on this kind.
/// - `OwnedMultiRef` is mediated by a join kind holding two `OwnedRef`s.
/// - `DerivedCollection` is the reverse side of `source.via`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Scalar {
        ty: ScalarType,
        nullable: bool,
    },
    OwnedRef {
        target: &'static str,
        nullable: bool,
    },
    OwnedMultiRef {
        target: &'static str,
        through: &'static str,
    },
    DerivedCollection {
        source: &'static str,
        via: &'static str,
    },
}

impl FieldKind {
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::DerivedCollection { .. })
    }
}
