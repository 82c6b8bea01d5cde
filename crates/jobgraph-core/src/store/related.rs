use crate::{
    error::ProjectionError,
    path::FieldPath,
    registry::FieldClass,
    store::{EntityRow, EntityStore},
};

// Target row of an owned reference, or `None` when the column is null.
pub(crate) fn related_one<'s>(
    store: &'s dyn EntityStore,
    row: &EntityRow,
    field: &'static str,
    target: &'static str,
    path: &FieldPath,
) -> Result<Option<&'s EntityRow>, ProjectionError> {
    let Some(key) = row.reference(field) else {
        return Ok(None);
    };

    store
        .get(target, key)
        .map(Some)
        .ok_or_else(|| ProjectionError::DanglingReference {
            owner: row.kind(),
            field,
            target,
            key: key.clone(),
            path: path.render(),
        })
}

// Rows on the far side of a collection relation, in persistence order.
// Scalar and single-reference classes have no collection and yield nothing.
pub(crate) fn related_many<'s>(
    store: &'s dyn EntityStore,
    row: &EntityRow,
    class: &FieldClass,
    path: &FieldPath,
) -> Result<Vec<&'s EntityRow>, ProjectionError> {
    match *class {
        FieldClass::DerivedCollection { source, via, .. } => {
            Ok(store.referencing(source, via, row.key()))
        }
        FieldClass::OwnedMultiRef {
            target,
            through,
            near,
            far,
            ..
        } => {
            let joins = store.referencing(through, near, row.key());
            let mut rows = Vec::with_capacity(joins.len());

            for join in joins {
                // a join row with a null far column links nothing
                let Some(key) = join.reference(far) else {
                    continue;
                };
                let related = store.get(target, key).ok_or_else(|| {
                    ProjectionError::DanglingReference {
                        owner: through,
                        field: far,
                        target,
                        key: key.clone(),
                        path: path.render(),
                    }
                })?;

                rows.push(related);
            }

            Ok(rows)
        }
        FieldClass::Scalar { .. } | FieldClass::OwnedRef { .. } => Ok(Vec::new()),
    }
}
