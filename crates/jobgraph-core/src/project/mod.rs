//! Schema projector.
//!
//! Shape-driven transform of one row into exactly the fields of a schema
//! descriptor. Recursion follows the descriptor, so its nesting bounds the
//! depth; there is no depth counter and no seen set.
mod overrides;


pub use overrides::Overrides;

use crate::{
    error::{ProjectionComputeError, ProjectionError, ProjectionFieldError, ProjectionTypeError},
    model::{AttrContext, ComputedAttr},
    obs::sink::{Operation, ProjectionEvent, record},
    path::FieldPath,
    registry::{ClassifiedModel, FieldClass, ModelRegistry},
    schema::{SchemaDescriptor, SchemaField, SchemaFieldKind},
    store::{
        EntityRow, EntityStore,
        related::{related_many, related_one},
    },
    value::{Document, Value},
};

///
/// Projector
///

#[derive(Clone, Copy)]
pub struct Projector<'a> {
    registry: &'a ModelRegistry,
    store: &'a dyn EntityStore,
}

impl<'a> Projector<'a> {
    #[must_use]
    pub fn new(registry: &'a ModelRegistry, store: &'a dyn EntityStore) -> Self {
        Self { registry, store }
    }

    /// Project `row` through `schema`.
    pub fn project(
        &self,
        row: &EntityRow,
        schema: &'static SchemaDescriptor,
    ) -> Result<Document, ProjectionError> {
        self.project_with(row, schema, &Overrides::new())
    }

    /// Project `row` through `schema`, with per-call literal overrides.
    ///
    /// The result has exactly the schema's keys in schema order (minus
    /// `omit_if_empty` fields with empty lists). Any failure aborts the whole
    /// call; no partial document is returned.
    pub fn project_with(
        &self,
        row: &EntityRow,
        schema: &'static SchemaDescriptor,
        overrides: &Overrides,
    ) -> Result<Document, ProjectionError> {
        let mut walk = Walk {
            path: FieldPath::new(),
            rows_visited: 0,
        };

        match self.project_row(row, schema, overrides, &mut walk) {
            Ok(doc) => {
                record(ProjectionEvent::ProjectFinished {
                    kind: row.kind(),
                    schema: schema.name,
                    rows_visited: walk.rows_visited,
                });
                Ok(doc)
            }
            Err(err) => {
                record(ProjectionEvent::CallFailed {
                    kind: row.kind(),
                    operation: Operation::Project,
                });
                Err(err)
            }
        }
    }

    fn project_row(
        &self,
        row: &EntityRow,
        schema: &'static SchemaDescriptor,
        overrides: &Overrides,
        walk: &mut Walk,
    ) -> Result<Document, ProjectionError> {
        let model = self.registry.try_get(row.kind())?;
        walk.rows_visited += 1;

        let mut doc = Document::with_capacity(schema.fields.len());
        for field in schema.fields {
            walk.path.push(field.name);

            let resolved = match overrides.value(field.name) {
                Some(value) => Some(value.clone()),
                None => self.resolve(model, row, field, overrides.nested(field.name), walk)?,
            };
            if let Some(value) = resolved {
                doc.insert(field.name, value);
            }

            walk.path.pop();
        }

        Ok(doc)
    }

    // Resolve one schema field against a row; `None` drops the key.
    fn resolve(
        &self,
        model: &ClassifiedModel,
        row: &EntityRow,
        field: &SchemaField,
        nested: &Overrides,
        walk: &mut Walk,
    ) -> Result<Option<Value>, ProjectionError> {
        if let Some(declared) = model.field(field.name) {
            return self.resolve_declared(model, row, declared.class, field, nested, walk);
        }

        if let Some(attr) = model.computed(field.name) {
            let value = compute(model, attr, row, self.store, &walk.path)?;
            let source = format!("{}.{}", model.name(), attr.name);

            return reshape(value, field, nested, &source, walk);
        }

        Err(ProjectionFieldError {
            source_name: model.name().to_string(),
            field: field.name.to_string(),
            path: walk.path.render(),
        }
        .into())
    }

    fn resolve_declared(
        &self,
        model: &ClassifiedModel,
        row: &EntityRow,
        class: FieldClass,
        field: &SchemaField,
        nested: &Overrides,
        walk: &mut Walk,
    ) -> Result<Option<Value>, ProjectionError> {
        match (class, field.kind) {
            (FieldClass::Scalar { .. }, SchemaFieldKind::Scalar(_)) => {
                let value = row.column(model.primary_key(), field.name);
                check_scalar(value, field, &walk.path).map(Some)
            }
            (FieldClass::OwnedRef { target, .. }, SchemaFieldKind::Nested(sub)) => {
                match related_one(self.store, row, field.name, target, &walk.path)? {
                    Some(related) => {
                        let doc = self.project_row(related, sub, nested, walk)?;
                        Ok(Some(doc.into()))
                    }
                    None => Ok(Some(Value::Null)),
                }
            }
            (
                FieldClass::OwnedMultiRef { .. } | FieldClass::DerivedCollection { .. },
                SchemaFieldKind::NestedList(sub),
            ) => {
                let related = related_many(self.store, row, &class, &walk.path)?;
                if related.is_empty() && field.omit_if_empty {
                    return Ok(None);
                }

                let mut items = Vec::with_capacity(related.len());
                for (i, item) in related.into_iter().enumerate() {
                    walk.path.push(i);
                    items.push(self.project_row(item, sub, nested, walk)?.into());
                    walk.path.pop();
                }

                Ok(Some(Value::List(items)))
            }
            (class, kind) => Err(ProjectionTypeError {
                path: walk.path.render(),
                expected: kind.describe(),
                found: class.describe(),
            }
            .into()),
        }
    }
}

///
/// Walk
/// Per-call traversal state.
///

struct Walk {
    path: FieldPath,
    rows_visited: u64,
}

pub(crate) fn compute(
    model: &ClassifiedModel,
    attr: &'static ComputedAttr,
    row: &EntityRow,
    store: &dyn EntityStore,
    path: &FieldPath,
) -> Result<Value, ProjectionError> {
    let ctx = AttrContext::new(row, store);

    (attr.compute)(&ctx).map_err(|source| {
        ProjectionComputeError {
            kind: model.name(),
            attr: attr.name,
            path: path.render(),
            source,
        }
        .into()
    })
}

// Reshape a computed value through a schema field. Documents are projected
// field by field; a missing key is a field error against `source`.
fn reshape(
    value: Value,
    field: &SchemaField,
    overrides: &Overrides,
    source: &str,
    walk: &mut Walk,
) -> Result<Option<Value>, ProjectionError> {
    // a null document is left to schema validation
    if value.is_null() && !matches!(field.kind, SchemaFieldKind::Scalar(_)) {
        return Ok(Some(Value::Null));
    }

    match (field.kind, value) {
        (SchemaFieldKind::Scalar(_), value) => check_scalar(value, field, &walk.path).map(Some),
        (SchemaFieldKind::Nested(sub), Value::Document(doc)) => {
            reshape_document(&doc, sub, overrides, source, walk).map(|d| Some(d.into()))
        }
        (SchemaFieldKind::NestedList(sub), Value::List(items)) => {
            if items.is_empty() && field.omit_if_empty {
                return Ok(None);
            }

            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                walk.path.push(i);
                let doc = match item {
                    Value::Document(doc) => doc,
                    other => return Err(mismatch(sub.name, &other, &walk.path)),
                };
                out.push(reshape_document(&doc, sub, overrides, source, walk)?.into());
                walk.path.pop();
            }

            Ok(Some(Value::List(out)))
        }
        (kind, value) => Err(mismatch(&kind.describe(), &value, &walk.path)),
    }
}

fn reshape_document(
    doc: &Document,
    schema: &'static SchemaDescriptor,
    overrides: &Overrides,
    source: &str,
    walk: &mut Walk,
) -> Result<Document, ProjectionError> {
    let mut out = Document::with_capacity(schema.fields.len());

    for field in schema.fields {
        walk.path.push(field.name);

        let resolved = match (overrides.value(field.name), doc.get(field.name)) {
            (Some(value), _) => Some(value.clone()),
            (None, Some(value)) => reshape(
                value.clone(),
                field,
                overrides.nested(field.name),
                source,
                walk,
            )?,
            (None, None) => {
                return Err(ProjectionFieldError {
                    source_name: source.to_string(),
                    field: field.name.to_string(),
                    path: walk.path.render(),
                }
                .into());
            }
        };
        if let Some(value) = resolved {
            out.insert(field.name, value);
        }

        walk.path.pop();
    }

    Ok(out)
}

fn check_scalar(value: Value, field: &SchemaField, path: &FieldPath) -> Result<Value, ProjectionError> {
    let SchemaFieldKind::Scalar(ty) = field.kind else {
        return Err(mismatch(&field.kind.describe(), &value, path));
    };

    if value.is_null() {
        return null_or_mismatch(field, path);
    }
    if !ty.accepts(&value) {
        return Err(mismatch(&field.kind.describe(), &value, path));
    }

    Ok(value)
}

fn null_or_mismatch(field: &SchemaField, path: &FieldPath) -> Result<Value, ProjectionError> {
    if field.optional {
        Ok(Value::Null)
    } else {
        Err(mismatch(&field.kind.describe(), &Value::Null, path))
    }
}

fn mismatch(expected: &str, found: &Value, path: &FieldPath) -> ProjectionError {
    ProjectionTypeError {
        path: path.render(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
    .into()
}
