use crate::value::Value;
use std::collections::BTreeMap;

static EMPTY: Overrides = Overrides::new();

///
/// Overrides
///
/// Per-call literal values that win over anything derived from the row.
/// Values apply to the level they are set on; nested overrides are applied
/// to every recursive projection of the named field.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    values: BTreeMap<String, Value>,
    nested: BTreeMap<String, Self>,
}

impl Overrides {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            nested: BTreeMap::new(),
        }
    }

    /// Set a literal value for one field at this level.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Overrides for the projections below `field`.
    #[must_use]
    pub fn nest(mut self, field: impl Into<String>, nested: Self) -> Self {
        self.nested.insert(field.into(), nested);
        self
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    #[must_use]
    pub fn nested(&self, field: &str) -> &Self {
        self.nested.get(field).unwrap_or(&EMPTY)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nested.is_empty()
    }
}
