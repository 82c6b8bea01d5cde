//! Graph exporter.
//!
//! Depth-bounded, cycle-safe dump of a row and its relations. Every level
//! merges the immutable call options over that level's model policy; edges
//! on the current traversal path are never followed again below it.
mod options;
mod report;
mod seen;

#[cfg(test)]
mod tests;

pub use options::{ExportOptions, FieldFilter, Setting};
pub use report::{Degradation, DegradationKind, ExportOutcome, ExportReport};

use crate::{
    error::{ProjectionError, ProjectionFieldError},
    model::MaxDepth,
    obs::sink::{Operation, ProjectionEvent, record},
    path::FieldPath,
    project::compute,
    registry::{ClassifiedField, ClassifiedModel, EdgeId, FieldClass, ModelRegistry},
    store::{
        EntityRow, EntityStore,
        related::{related_many, related_one},
    },
    value::{Document, Value},
};
use seen::Trail;

///
/// Exporter
///

#[derive(Clone, Copy)]
pub struct Exporter<'a> {
    registry: &'a ModelRegistry,
    store: &'a dyn EntityStore,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(registry: &'a ModelRegistry, store: &'a dyn EntityStore) -> Self {
        Self { registry, store }
    }

    /// Export `row` and its relations as a document.
    pub fn export(
        &self,
        row: &EntityRow,
        options: &ExportOptions,
    ) -> Result<Document, ProjectionError> {
        self.export_traced(row, options).map(|outcome| outcome.document)
    }

    /// Export `row`, also reporting every relation that was degraded to
    /// `null` / `[]` by the depth budget or the cycle guard.
    pub fn export_traced(
        &self,
        row: &EntityRow,
        options: &ExportOptions,
    ) -> Result<ExportOutcome, ProjectionError> {
        let mut walk = Walk {
            options,
            only: FieldFilter::parse(&options.only),
            exclude: options.exclude.as_value().map(|names| FieldFilter::parse(names)),
            trail: Trail::seeded(&options.seen),
            path: FieldPath::new(),
            report: ExportReport::default(),
        };

        match self.export_row(row, None, &mut walk) {
            Ok(document) => {
                let report = walk.report;
                record(ProjectionEvent::ExportFinished {
                    kind: row.kind(),
                    rows_visited: report.rows_visited,
                    depth_exhausted: report.count(DegradationKind::DepthExhausted),
                    cycles_skipped: report.count(DegradationKind::CycleSkipped),
                });

                Ok(ExportOutcome { document, report })
            }
            Err(err) => {
                record(ProjectionEvent::CallFailed {
                    kind: row.kind(),
                    operation: Operation::Export,
                });
                Err(err)
            }
        }
    }

    // `inherited` is the budget handed down by the parent; `None` marks the
    // top-level row.
    fn export_row(
        &self,
        row: &EntityRow,
        inherited: Option<MaxDepth>,
        walk: &mut Walk<'_>,
    ) -> Result<Document, ProjectionError> {
        let model = self.registry.try_get(row.kind())?;
        let level = walk.level(model, inherited);
        walk.report.rows_visited += 1;

        let mut doc = Document::with_capacity(model.fields().len());

        // Phase 1: owned fields in declaration order
        for field in model.owned_fields() {
            if walk.skips(model, field.name) {
                continue;
            }

            walk.path.push(field.name);
            let value = self.export_owned(model, row, field, &level, walk)?;
            walk.path.pop();

            if let Some(value) = value {
                doc.insert(field.name, value);
            }
        }

        // Phase 2: extra attributes
        let options = walk.options;
        for name in extra_attrs(options, model, inherited.is_none()) {
            if let Some(attr) = model.computed(name) {
                walk.path.push(attr.name);
                let value = compute(model, attr, row, self.store, &walk.path)?;
                walk.path.pop();

                doc.insert(attr.name, value);
            } else if model.field(name).is_none() {
                return Err(ProjectionFieldError {
                    source_name: model.name().to_string(),
                    field: name.to_string(),
                    path: walk.path.render_child(name),
                }
                .into());
            }
        }

        // Phase 3: back-references
        if level.backrefs && level.recurse {
            for field in model.derived_fields() {
                if walk.skips(model, field.name) {
                    continue;
                }

                walk.path.push(field.name);
                let value = self.export_collection(row, field, &level, walk)?;
                walk.path.pop();

                doc.insert(field.name, value);
            }
        }

        Ok(doc)
    }

    fn export_owned(
        &self,
        model: &ClassifiedModel,
        row: &EntityRow,
        field: &ClassifiedField,
        level: &Level,
        walk: &mut Walk<'_>,
    ) -> Result<Option<Value>, ProjectionError> {
        match field.class {
            FieldClass::Scalar { .. } => Ok(Some(row.column(model.primary_key(), field.name))),
            FieldClass::OwnedRef { target, edge, .. } => {
                // without recursion the reference exports as its key
                if !level.recurse {
                    return Ok(Some(row.reference(field.name).cloned().into()));
                }
                if row.reference(field.name).is_none() {
                    return Ok(Some(Value::Null));
                }
                // degraded references are never looked up
                if level.exhausted {
                    walk.degrade(edge, DegradationKind::DepthExhausted);
                    return Ok(Some(Value::Null));
                }
                if walk.trail.contains(edge) {
                    walk.degrade(edge, DegradationKind::CycleSkipped);
                    return Ok(Some(Value::Null));
                }
                let Some(related) = related_one(self.store, row, field.name, target, &walk.path)?
                else {
                    return Ok(Some(Value::Null));
                };

                let mark = walk.trail.mark();
                walk.trail.push(edge);
                let doc = self.export_row(related, Some(level.next), walk);
                walk.trail.truncate(mark);

                Ok(Some(doc?.into()))
            }
            FieldClass::OwnedMultiRef { .. } if walk.options.manytomany => {
                self.export_collection(row, field, level, walk).map(Some)
            }
            FieldClass::OwnedMultiRef { .. } | FieldClass::DerivedCollection { .. } => Ok(None),
        }
    }

    // Many-to-many and derived collections. A many-to-many also marks the
    // join kind's own reference edges so the join rows are not walked back.
    fn export_collection(
        &self,
        row: &EntityRow,
        field: &ClassifiedField,
        level: &Level,
        walk: &mut Walk<'_>,
    ) -> Result<Value, ProjectionError> {
        let Some(edge) = field.class.edge() else {
            return Ok(Value::Null);
        };
        if level.exhausted {
            walk.degrade(edge, DegradationKind::DepthExhausted);
            return Ok(Value::List(Vec::new()));
        }
        if walk.trail.contains(edge) {
            walk.degrade(edge, DegradationKind::CycleSkipped);
            return Ok(Value::List(Vec::new()));
        }

        let related = related_many(self.store, row, &field.class, &walk.path)?;

        let mark = walk.trail.mark();
        walk.trail.push(edge);
        if let FieldClass::OwnedMultiRef {
            through, near, far, ..
        } = field.class
        {
            walk.trail.push(EdgeId::Ref {
                kind: through,
                field: near,
            });
            walk.trail.push(EdgeId::Ref {
                kind: through,
                field: far,
            });
        }

        let mut items = Vec::with_capacity(related.len());
        for (i, item) in related.into_iter().enumerate() {
            walk.path.push(i);
            items.push(self.export_row(item, Some(level.next), walk)?.into());
            walk.path.pop();
        }
        walk.trail.truncate(mark);

        Ok(Value::List(items))
    }
}

// Caller extras apply to the top-level row only; nested rows use their
// model's include list.
fn extra_attrs<'m>(options: &'m ExportOptions, model: &'m ClassifiedModel, top: bool) -> &'m [String] {
    match &options.extra_attrs {
        Setting::Value(names) if top => names,
        Setting::Null if top => &[],
        _ => &model.policy().include,
    }
}

///
/// Level
/// Options of one row after merging the call over the model policy.
///

struct Level {
    recurse: bool,
    backrefs: bool,
    exhausted: bool,
    next: MaxDepth,
}

///
/// Walk
/// Per-call traversal state.
///

struct Walk<'o> {
    options: &'o ExportOptions,
    only: FieldFilter,
    exclude: Option<FieldFilter>,
    trail: Trail,
    path: FieldPath,
    report: ExportReport,
}

impl Walk<'_> {
    fn level(&self, model: &ClassifiedModel, inherited: Option<MaxDepth>) -> Level {
        let policy = model.policy();
        let depth = match (&self.options.max_depth, inherited) {
            (Setting::Unset, Some(budget)) => budget.tighten(policy.max_depth),
            (Setting::Unset, None) => policy.max_depth,
            (_, Some(budget)) => budget,
            (Setting::Null, None) => MaxDepth::Unbounded,
            (Setting::Value(depth), None) => *depth,
        };

        Level {
            recurse: self.options.recurse.resolve(policy.recurse),
            backrefs: self.options.backrefs.resolve(policy.backrefs),
            exhausted: depth.is_exhausted(),
            next: depth.descend(),
        }
    }

    fn skips(&self, model: &ClassifiedModel, field: &str) -> bool {
        let kind = model.name();
        let excluded = match (&self.options.exclude, &self.exclude) {
            (Setting::Unset, _) => model.policy().excludes(field),
            (_, Some(filter)) => filter.matches(kind, field),
            (_, None) => false,
        };

        excluded || !self.only.keeps(kind, field)
    }

    fn degrade(&mut self, edge: EdgeId, kind: DegradationKind) {
        self.report.degradations.push(Degradation {
            path: self.path.render(),
            edge,
            kind,
        });
    }
}
