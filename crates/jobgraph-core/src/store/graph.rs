use crate::{
    store::{EntityRow, EntityStore},
    value::Key,
};
use std::collections::{BTreeMap, HashMap};

///
/// KindRows
/// Per-kind key index plus insertion order.
///

#[derive(Debug, Default)]
struct KindRows {
    index: BTreeMap<Key, usize>,
    order: Vec<usize>,
}

///
/// EntityGraph
///
/// In-memory row arena. Insertion order is persistence order.
///

#[derive(Debug, Default)]
pub struct EntityGraph {
    rows: Vec<EntityRow>,
    kinds: HashMap<&'static str, KindRows>,
}

impl EntityGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, replacing (in place) any row with the same kind and key.
    pub fn insert(&mut self, row: EntityRow) -> Option<EntityRow> {
        let entry = self.kinds.entry(row.kind()).or_default();

        if let Some(&slot) = entry.index.get(row.key()) {
            return Some(std::mem::replace(&mut self.rows[slot], row));
        }

        let slot = self.rows.len();
        entry.index.insert(row.key().clone(), slot);
        entry.order.push(slot);
        self.rows.push(row);

        None
    }

    /// Builder-style `insert`.
    #[must_use]
    pub fn with(mut self, row: EntityRow) -> Self {
        self.insert(row);
        self
    }

    /// Rows of one kind in insertion order.
    pub fn rows_of<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a EntityRow> + 'a {
        self.kinds
            .get(kind)
            .into_iter()
            .flat_map(|k| k.order.iter())
            .map(|&slot| &self.rows[slot])
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EntityStore for EntityGraph {
    fn get(&self, kind: &str, key: &Key) -> Option<&EntityRow> {
        let slot = *self.kinds.get(kind)?.index.get(key)?;

        self.rows.get(slot)
    }

    fn referencing(&self, source_kind: &str, via: &str, target: &Key) -> Vec<&EntityRow> {
        self.rows_of(source_kind)
            .filter(|row| row.reference(via) == Some(target))
            .collect()
    }
}
