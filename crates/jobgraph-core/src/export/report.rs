use crate::{registry::EdgeId, value::Document};
use derive_more::Display;

///
/// DegradationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum DegradationKind {
    /// The depth budget ran out before this edge.
    DepthExhausted,
    /// The edge was already on the traversal path.
    CycleSkipped,
}

///
/// Degradation
/// One relation emitted as `null` / `[]` instead of being expanded.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Degradation {
    pub path: String,
    pub edge: EdgeId,
    pub kind: DegradationKind,
}

///
/// ExportReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExportReport {
    pub rows_visited: u64,
    pub degradations: Vec<Degradation>,
}

impl ExportReport {
    #[must_use]
    pub fn count(&self, kind: DegradationKind) -> u64 {
        self.degradations.iter().filter(|d| d.kind == kind).count() as u64
    }

    /// Degradation recorded at a rendered path, if any.
    #[must_use]
    pub fn at(&self, path: &str) -> Option<&Degradation> {
        self.degradations.iter().find(|d| d.path == path)
    }
}

///
/// ExportOutcome
///

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOutcome {
    pub document: Document,
    pub report: ExportReport,
}
