use crate::model::{ExportPolicy, MaxDepth};
use jobgraph_config::{DefaultsConfig, PolicyConfig};
use std::collections::BTreeSet;

///
/// EffectivePolicy
///
/// Export policy of one kind after configuration overrides. Built once at
/// registration; per-call options are layered over it, never into it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EffectivePolicy {
    pub recurse: bool,
    pub backrefs: bool,
    pub exclude: BTreeSet<String>,
    pub include: Vec<String>,
    pub max_depth: MaxDepth,
}

impl EffectivePolicy {
    // Precedence: entity config, declared policy, config defaults, unbounded.
    pub(super) fn resolve(
        declared: &ExportPolicy,
        config: Option<&PolicyConfig>,
        defaults: &DefaultsConfig,
    ) -> Self {
        let recurse = config
            .and_then(|c| c.recurse)
            .unwrap_or(declared.recurse);
        let backrefs = config
            .and_then(|c| c.backrefs)
            .unwrap_or(declared.backrefs);

        let exclude = match config.and_then(|c| c.exclude.as_ref()) {
            Some(names) => names.iter().cloned().collect(),
            None => declared.exclude.iter().map(ToString::to_string).collect(),
        };
        let include = match config.and_then(|c| c.include.as_ref()) {
            Some(names) => names.clone(),
            None => declared.include.iter().map(ToString::to_string).collect(),
        };

        let max_depth = config
            .and_then(|c| c.max_depth)
            .and_then(MaxDepth::from_config)
            .or(declared.max_depth)
            .or_else(|| defaults.max_depth.and_then(MaxDepth::from_config))
            .unwrap_or_default();

        Self {
            recurse,
            backrefs,
            exclude,
            include,
            max_depth,
        }
    }

    #[must_use]
    pub fn excludes(&self, field: &str) -> bool {
        self.exclude.contains(field)
    }
}
