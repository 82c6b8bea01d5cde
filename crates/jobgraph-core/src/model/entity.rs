use crate::model::{
    computed::ComputedAttr,
    field::{FieldKind, FieldModel},
    policy::ExportPolicy,
};

///
/// EntityModel
/// Static declaration of one entity kind.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable kind name used in rows, relations and diagnostics.
    pub name: &'static str,
    /// Primary key field (must name a scalar entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list; export output follows this order.
    pub fields: &'static [FieldModel],
    pub computed: &'static [ComputedAttr],
    pub policy: ExportPolicy,
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn computed(&self, name: &str) -> Option<&ComputedAttr> {
        self.computed.iter().find(|c| c.name == name)
    }

    /// Owned references declared on this kind.
    pub fn references(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::OwnedRef { target, .. } => Some((f.name, target)),
            _ => None,
        })
    }
}
