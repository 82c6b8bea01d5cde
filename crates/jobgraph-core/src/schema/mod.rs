//! Schema descriptors.
//!
//! A descriptor is a pure shape declaration: ordered output fields typed as
//! scalar, nested schema or list of nested schema. The same model can be
//! projected through any number of descriptors (summary vs detail).
mod constraint;
mod validate;

pub use constraint::Constraint;
pub use validate::ValidationIssues;

use crate::value::ScalarType;

///
/// SchemaDescriptor
///

#[derive(Debug)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub fields: &'static [SchemaField],
}

impl SchemaDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [SchemaField]) -> Self {
        Self { name, fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Output keys in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

///
/// SchemaField
///

#[derive(Clone, Copy, Debug)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: SchemaFieldKind,
    /// `null` is an acceptable value.
    pub optional: bool,
    /// Drop the key when the projected list is empty.
    pub omit_if_empty: bool,
    /// Acceptance constraints; never consulted by the projector.
    pub constraints: &'static [Constraint],
}

impl SchemaField {
    const fn of(name: &'static str, kind: SchemaFieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
            omit_if_empty: false,
            constraints: &[],
        }
    }

    #[must_use]
    pub const fn scalar(name: &'static str, ty: ScalarType) -> Self {
        Self::of(name, SchemaFieldKind::Scalar(ty))
    }

    #[must_use]
    pub const fn nested(name: &'static str, schema: &'static SchemaDescriptor) -> Self {
        Self::of(name, SchemaFieldKind::Nested(schema))
    }

    #[must_use]
    pub const fn nested_list(name: &'static str, schema: &'static SchemaDescriptor) -> Self {
        Self::of(name, SchemaFieldKind::NestedList(schema))
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub const fn omit_if_empty(mut self) -> Self {
        self.omit_if_empty = true;
        self
    }

    #[must_use]
    pub const fn with_constraints(mut self, constraints: &'static [Constraint]) -> Self {
        self.constraints = constraints;
        self
    }
}

///
/// SchemaFieldKind
///

#[derive(Clone, Copy, Debug)]
pub enum SchemaFieldKind {
    Scalar(ScalarType),
    Nested(&'static SchemaDescriptor),
    NestedList(&'static SchemaDescriptor),
}

impl SchemaFieldKind {
    /// Shape name used in type-mismatch diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(ty) => format!("scalar {ty}"),
            Self::Nested(schema) => format!("nested {}", schema.name),
            Self::NestedList(schema) => format!("list of {}", schema.name),
        }
    }
}
