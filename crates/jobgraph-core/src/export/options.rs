use crate::{model::MaxDepth, registry::EdgeId};
use std::collections::{BTreeMap, BTreeSet};

///
/// Setting
///
/// Three-state call parameter. `Unset` defers to the model policy, `Null`
/// is an explicit "none", `Value` is an explicit value.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Setting<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Setting<T> {
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }
}

impl Setting<bool> {
    /// Explicit null reads as `false`.
    #[must_use]
    pub const fn resolve(&self, policy: bool) -> bool {
        match self {
            Self::Unset => policy,
            Self::Null => false,
            Self::Value(v) => *v,
        }
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

///
/// ExportOptions
///
/// Immutable per-call options of a graph export. Unset settings fall back
/// to each level's model policy; the policy itself is never modified.
///

#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    pub recurse: Setting<bool>,
    pub backrefs: Setting<bool>,
    /// Bare (`title`) or qualified (`Job.title`) names; empty means all.
    pub only: Vec<String>,
    /// Replaces the model policy's exclude list at every level.
    pub exclude: Setting<Vec<String>>,
    /// Computed attributes of the top-level row.
    pub extra_attrs: Setting<Vec<String>>,
    /// Explicit null is unbounded.
    pub max_depth: Setting<MaxDepth>,
    pub manytomany: bool,
    /// Edges treated as already traversed.
    pub seen: Vec<EdgeId>,
}

impl ExportOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = Setting::Value(recurse);
        self
    }

    #[must_use]
    pub fn backrefs(mut self, backrefs: bool) -> Self {
        self.backrefs = Setting::Value(backrefs);
        self
    }

    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Setting::Value(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn extra_attrs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_attrs = Setting::Value(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Setting::Value(MaxDepth::Limit(depth));
        self
    }

    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_depth = Setting::Null;
        self
    }

    #[must_use]
    pub fn manytomany(mut self, manytomany: bool) -> Self {
        self.manytomany = manytomany;
        self
    }

    #[must_use]
    pub fn seen(mut self, edge: EdgeId) -> Self {
        self.seen.push(edge);
        self
    }
}

///
/// FieldFilter
///
/// Parsed `only` / `exclude` list. Bare names apply to every kind;
/// `Kind.field` applies to that kind only.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldFilter {
    bare: BTreeSet<String>,
    qualified: BTreeMap<String, BTreeSet<String>>,
}

impl FieldFilter {
    #[must_use]
    pub fn parse(names: &[String]) -> Self {
        let mut filter = Self::default();

        for name in names {
            match name.split_once('.') {
                Some((kind, field)) => {
                    filter
                        .qualified
                        .entry(kind.to_string())
                        .or_default()
                        .insert(field.to_string());
                }
                None => {
                    filter.bare.insert(name.clone());
                }
            }
        }

        filter
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bare.is_empty() && self.qualified.is_empty()
    }

    /// Whether the filter names `field` for `kind`.
    #[must_use]
    pub fn matches(&self, kind: &str, field: &str) -> bool {
        self.bare.contains(field)
            || self
                .qualified
                .get(kind)
                .is_some_and(|fields| fields.contains(field))
    }

    /// Whether the filter restricts `kind` at all, read as an `only` list.
    #[must_use]
    pub fn restricts(&self, kind: &str) -> bool {
        !self.bare.is_empty() || self.qualified.contains_key(kind)
    }

    /// `only` semantics: unrestricted kinds keep every field.
    #[must_use]
    pub fn keeps(&self, kind: &str, field: &str) -> bool {
        !self.restricts(kind) || self.matches(kind, field)
    }
}
