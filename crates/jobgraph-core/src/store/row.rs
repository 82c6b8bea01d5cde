use crate::value::{Key, Value};
use std::collections::BTreeMap;

///
/// EntityRow
///
/// One materialized row. Scalar columns and reference columns are kept
/// apart; a reference column holds the target's key, or `None` for null.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EntityRow {
    kind: &'static str,
    key: Key,
    values: BTreeMap<String, Value>,
    refs: BTreeMap<String, Option<Key>>,
}

impl EntityRow {
    pub fn new(kind: &'static str, key: impl Into<Key>) -> Self {
        Self {
            kind,
            key: key.into(),
            values: BTreeMap::new(),
            refs: BTreeMap::new(),
        }
    }

    /// Set a scalar column.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a reference column to a target key.
    #[must_use]
    pub fn with_ref(mut self, name: impl Into<String>, target: impl Into<Key>) -> Self {
        self.refs.insert(name.into(), Some(target.into()));
        self
    }

    /// Set a reference column to null.
    #[must_use]
    pub fn with_null_ref(mut self, name: impl Into<String>) -> Self {
        self.refs.insert(name.into(), None);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Scalar column as exported. The primary key column reads from the row
    /// key; absent columns read as `Null`.
    #[must_use]
    pub fn column(&self, primary_key: &str, name: &str) -> Value {
        if name == primary_key {
            return Value::from(self.key.clone());
        }

        self.values.get(name).cloned().unwrap_or_default()
    }

    /// Target key of a reference column; absent columns read as null.
    #[must_use]
    pub fn reference(&self, name: &str) -> Option<&Key> {
        self.refs.get(name).and_then(Option::as_ref)
    }
}
