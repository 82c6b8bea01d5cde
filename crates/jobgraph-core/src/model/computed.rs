use crate::{
    error::ComputeError,
    store::{EntityRow, EntityStore},
    value::Value,
};
use std::fmt;
use time::OffsetDateTime;

/// Accessor signature of a computed attribute.
pub type ComputeFn = fn(&AttrContext<'_>) -> Result<Value, ComputeError>;

static NULL: Value = Value::Null;

///
/// ComputedAttr
///
/// Named, zero-argument accessor evaluated against one row. Used as an
/// export extra attribute or as the source of a schema field.
///

#[derive(Clone, Copy)]
pub struct ComputedAttr {
    pub name: &'static str,
    pub compute: ComputeFn,
}

impl ComputedAttr {
    #[must_use]
    pub const fn new(name: &'static str, compute: ComputeFn) -> Self {
        Self { name, compute }
    }
}

impl fmt::Debug for ComputedAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedAttr")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

///
/// AttrContext
/// Read-only view handed to computed attributes.
///

pub struct AttrContext<'a> {
    row: &'a EntityRow,
    store: &'a dyn EntityStore,
}

impl<'a> AttrContext<'a> {
    #[must_use]
    pub fn new(row: &'a EntityRow, store: &'a dyn EntityStore) -> Self {
        Self { row, store }
    }

    #[must_use]
    pub const fn row(&self) -> &'a EntityRow {
        self.row
    }

    /// Scalar column value; absent columns read as `Null`.
    #[must_use]
    pub fn value(&self, name: &str) -> &'a Value {
        self.row.value(name).unwrap_or(&NULL)
    }

    pub fn int(&self, name: &str) -> Result<i64, ComputeError> {
        self.value(name)
            .as_int()
            .ok_or_else(|| ComputeError::new(format!("column '{name}' is not an integer")))
    }

    pub fn timestamp(&self, name: &str) -> Result<OffsetDateTime, ComputeError> {
        self.value(name)
            .as_timestamp()
            .ok_or_else(|| ComputeError::new(format!("column '{name}' is not a timestamp")))
    }

    /// Rows of `source` whose `via` reference points at this row.
    #[must_use]
    pub fn referencing(&self, source: &str, via: &str) -> Vec<&'a EntityRow> {
        self.store.referencing(source, via, self.row.key())
    }
}
