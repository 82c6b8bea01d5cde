///
/// MaxDepth
///
/// Recursion budget of a graph export. `Limit(0)` disables recursion.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MaxDepth {
    #[default]
    Unbounded,
    Limit(u32),
}

impl MaxDepth {
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Limit(0))
    }

    /// Budget for the next recursion level.
    #[must_use]
    pub const fn descend(self) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Limit(n) => Self::Limit(n.saturating_sub(1)),
        }
    }

    /// The stricter of two budgets.
    #[must_use]
    pub const fn tighten(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unbounded, other) => other,
            (this, Self::Unbounded) => this,
            (Self::Limit(a), Self::Limit(b)) => Self::Limit(if a < b { a } else { b }),
        }
    }

    /// Configuration form: `-1` is unbounded, other negatives are rejected.
    #[must_use]
    pub fn from_config(depth: i64) -> Option<Self> {
        if depth == jobgraph_config::UNBOUNDED_DEPTH {
            return Some(Self::Unbounded);
        }

        u32::try_from(depth).ok().map(Self::Limit)
    }
}

///
/// ExportPolicy
///
/// Static export defaults declared with a model. Immutable; per-call
/// options are merged over it and never write back.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExportPolicy {
    pub recurse: bool,
    pub backrefs: bool,
    pub exclude: &'static [&'static str],
    /// Extra computed attributes exported by default.
    pub include: &'static [&'static str],
    /// `None` leaves the depth to configuration defaults (unbounded if unset).
    pub max_depth: Option<MaxDepth>,
}

impl ExportPolicy {
    pub const DEFAULT: Self = Self {
        recurse: true,
        backrefs: true,
        exclude: &[],
        include: &[],
        max_depth: None,
    };

    #[must_use]
    pub const fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    #[must_use]
    pub const fn with_backrefs(mut self, backrefs: bool) -> Self {
        self.backrefs = backrefs;
        self
    }

    #[must_use]
    pub const fn with_exclude(mut self, exclude: &'static [&'static str]) -> Self {
        self.exclude = exclude;
        self
    }

    #[must_use]
    pub const fn with_include(mut self, include: &'static [&'static str]) -> Self {
        self.include = include;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(MaxDepth::Limit(depth));
        self
    }
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
