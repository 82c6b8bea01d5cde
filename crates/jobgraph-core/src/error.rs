use crate::value::Key;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification hosts use to map projection failures onto their
/// own status space.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Schema and entity disagree; a caller error (4xx-equivalent), never retried.
    Mismatch,
    /// A computed attribute failed.
    Compute,
    /// The loaded graph is inconsistent (dangling reference, unknown kind).
    Corruption,
}

///
/// ProjectionError
///
/// Every failure of a single `project` / `export` call. Errors are local to
/// the call and never touch the registry.
///

#[derive(Debug, ThisError)]
pub enum ProjectionError {
    #[error(transparent)]
    Field(#[from] ProjectionFieldError),

    #[error(transparent)]
    Type(#[from] ProjectionTypeError),

    #[error(transparent)]
    Compute(#[from] ProjectionComputeError),

    #[error("reference '{owner}.{field}' at '{path}' points at missing {target} row '{key}'")]
    DanglingReference {
        owner: &'static str,
        field: &'static str,
        target: &'static str,
        key: Key,
        path: String,
    },

    #[error("entity kind '{0}' is not registered")]
    UnknownKind(String),
}

impl ProjectionError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Field(_) | Self::Type(_) => ErrorClass::Mismatch,
            Self::Compute(_) => ErrorClass::Compute,
            Self::DanglingReference { .. } | Self::UnknownKind(_) => ErrorClass::Corruption,
        }
    }
}

///
/// ProjectionFieldError
/// A requested field has no resolvable source.
///

#[derive(Debug, ThisError)]
#[error("field '{field}' at '{path}' has no source on '{source_name}'")]
pub struct ProjectionFieldError {
    /// Entity kind, or `Kind.attr` for a computed document.
    pub source_name: String,
    pub field: String,
    pub path: String,
}

///
/// ProjectionTypeError
/// Scalar type or shape mismatch between schema and source.
///

#[derive(Debug, ThisError)]
#[error("type mismatch at '{path}': schema expects {expected}, source is {found}")]
pub struct ProjectionTypeError {
    pub path: String,
    pub expected: String,
    pub found: String,
}

///
/// ProjectionComputeError
/// A computed attribute returned an error; the whole call is aborted.
///

#[derive(Debug, ThisError)]
#[error("computed attribute '{kind}.{attr}' failed at '{path}': {source}")]
pub struct ProjectionComputeError {
    pub kind: &'static str,
    pub attr: &'static str,
    pub path: String,
    #[source]
    pub source: ComputeError,
}

///
/// ComputeError
/// Raised by computed attribute accessors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct ComputeError {
    pub message: String,
}

impl ComputeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// ModelDefinitionError
///
/// Registration failed. Carries every structural issue found, not just the
/// first; fatal at startup.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelDefinitionError {
    pub issues: Vec<DefinitionIssue>,
}

impl ModelDefinitionError {
    /// Whether any issue names the given kind and field.
    #[must_use]
    pub fn names(&self, kind: &str, field: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.kind() == kind && issue.field() == Some(field))
    }
}

impl fmt::Display for ModelDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model definition failed with {} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ModelDefinitionError {}

///
/// DefinitionIssue
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum DefinitionIssue {
    #[error("kind '{kind}', field '{field}': two derived collections invert '{source_kind}.{via}'")]
    DuplicateDerived {
        kind: String,
        field: String,
        source_kind: String,
        via: String,
    },

    #[error("kind '{kind}', field '{field}': name is declared more than once")]
    DuplicateField { kind: String, field: String },

    #[error("kind '{kind}' is registered more than once")]
    DuplicateKind { kind: String },

    #[error("kind '{kind}', field '{field}': {message}")]
    InvalidDerived {
        kind: String,
        field: String,
        message: String,
    },

    #[error("kind '{kind}', field '{field}': join kind '{through}' {message}")]
    InvalidJoin {
        kind: String,
        field: String,
        through: String,
        message: String,
    },

    #[error("kind '{kind}': {message}")]
    InvalidName { kind: String, message: String },

    #[error("kind '{kind}': {message}")]
    InvalidPolicy { kind: String, message: String },

    #[error("kind '{kind}': primary key '{field}' {message}")]
    InvalidPrimaryKey {
        kind: String,
        field: String,
        message: String,
    },

    #[error("kind '{kind}', field '{field}': {setting} names an unknown field")]
    UnknownPolicyField {
        kind: String,
        field: String,
        setting: &'static str,
    },

    #[error("kind '{kind}', field '{field}': target kind '{target}' is not registered")]
    UnknownTarget {
        kind: String,
        field: String,
        target: String,
    },
}

impl DefinitionIssue {
    /// Kind the issue is reported against.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::DuplicateDerived { kind, .. }
            | Self::DuplicateField { kind, .. }
            | Self::DuplicateKind { kind }
            | Self::InvalidDerived { kind, .. }
            | Self::InvalidJoin { kind, .. }
            | Self::InvalidName { kind, .. }
            | Self::InvalidPolicy { kind, .. }
            | Self::InvalidPrimaryKey { kind, .. }
            | Self::UnknownPolicyField { kind, .. }
            | Self::UnknownTarget { kind, .. } => kind,
        }
    }

    /// Offending field, when the issue is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::DuplicateDerived { field, .. }
            | Self::DuplicateField { field, .. }
            | Self::InvalidDerived { field, .. }
            | Self::InvalidJoin { field, .. }
            | Self::InvalidPrimaryKey { field, .. }
            | Self::UnknownPolicyField { field, .. }
            | Self::UnknownTarget { field, .. } => Some(field),
            Self::DuplicateKind { .. } | Self::InvalidName { .. } | Self::InvalidPolicy { .. } => {
                None
            }
        }
    }
}
