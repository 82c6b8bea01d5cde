use crate::{
    path::FieldPath,
    schema::{SchemaDescriptor, SchemaField, SchemaFieldKind},
    value::{Document, Value},
};
use std::{collections::BTreeMap, fmt};

///
/// ValidationIssues
///
/// Acceptance failures of one document, grouped by rendered path. Every
/// failing field is reported, not just the first.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationIssues {
    issues: BTreeMap<String, Vec<String>>,
}

impl ValidationIssues {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issues: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.issues
            .entry(path.render())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Messages recorded at one rendered path.
    #[must_use]
    pub fn at(&self, path: &str) -> &[String] {
        self.issues.get(path).map_or(&[], Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(String::as_str)
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document failed validation with {} issue(s)", self.len())?;
        for (path, messages) in &self.issues {
            for message in messages {
                write!(f, "\n  - {path}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}

impl SchemaDescriptor {
    /// Accept a document against this schema.
    ///
    /// Checks presence, nullability, shape and constraints of every declared
    /// field, recursing into nested schemas. Keys not declared by the schema
    /// are ignored.
    pub fn validate(&self, doc: &Document) -> Result<(), ValidationIssues> {
        let mut issues = ValidationIssues::new();
        let mut path = FieldPath::new();

        validate_document(self, doc, &mut path, &mut issues);

        issues.result()
    }
}

fn validate_document(
    schema: &SchemaDescriptor,
    doc: &Document,
    path: &mut FieldPath,
    issues: &mut ValidationIssues,
) {
    for field in schema.fields {
        path.push(field.name);

        match doc.get(field.name) {
            None if field.optional || field.omit_if_empty => {}
            None => issues.add(path, "required field is missing"),
            Some(value) => validate_value(field, value, path, issues),
        }

        path.pop();
    }
}

fn validate_value(
    field: &SchemaField,
    value: &Value,
    path: &mut FieldPath,
    issues: &mut ValidationIssues,
) {
    if value.is_null() {
        if !field.optional {
            issues.add(path, "null is not allowed");
        }
        return;
    }

    match (field.kind, value) {
        (SchemaFieldKind::Scalar(ty), _) if ty.accepts(value) => {}
        (SchemaFieldKind::Nested(sub), Value::Document(doc)) => {
            validate_document(sub, doc, path, issues);
        }
        (SchemaFieldKind::NestedList(sub), Value::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i);
                match item {
                    Value::Document(doc) => validate_document(sub, doc, path, issues),
                    other => issues.add(
                        path,
                        format!("expected {}, found {}", sub.name, other.type_name()),
                    ),
                }
                path.pop();
            }
        }
        (kind, _) => {
            issues.add(
                path,
                format!("expected {}, found {}", kind.describe(), value.type_name()),
            );
            return;
        }
    }

    for constraint in field.constraints {
        if let Err(message) = constraint.check(value) {
            issues.add(path, message);
        }
    }
}
