//! Export-policy configuration for jobgraph registries.
//!
//! The configuration is a TOML document read once at startup, before the
//! model registry is built. It never changes afterwards.
//!
//! ```toml
//! [defaults]
//! max_depth = 4
//!
//! [entity.Job]
//! max_depth = 1
//! exclude = ["requests"]
//! ```

use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error as ThisError;

/// Depth value meaning "no limit" in configuration files.
pub const UNBOUNDED_DEPTH: i64 = -1;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config at '{at}': {message}")]
    Invalid { at: String, message: String },
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Per-kind policy overrides, keyed by entity kind name.
    #[serde(default)]
    pub entity: BTreeMap<String, PolicyConfig>,
}

impl EngineConfig {
    /// Parse and validate a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn policy(&self, kind: &str) -> Option<&PolicyConfig> {
        self.entity.get(kind)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_depth("defaults.max_depth", self.defaults.max_depth)?;

        for (kind, policy) in &self.entity {
            if kind.is_empty() {
                return Err(ConfigError::Invalid {
                    at: "entity".to_string(),
                    message: "entity kind name is empty".to_string(),
                });
            }

            check_depth(&format!("entity.{kind}.max_depth"), policy.max_depth)?;
        }

        Ok(())
    }
}

///
/// DefaultsConfig
/// Fallbacks applied to every kind whose declared policy leaves them open.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub max_depth: Option<i64>,
}

///
/// PolicyConfig
///
/// Overrides for one entity kind. Absent keys keep the declared policy.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default)]
    pub recurse: Option<bool>,

    #[serde(default)]
    pub backrefs: Option<bool>,

    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    #[serde(default)]
    pub include: Option<Vec<String>>,

    #[serde(default)]
    pub max_depth: Option<i64>,
}

// Depths are either -1 (unbounded) or a non-negative u32.
fn check_depth(at: &str, depth: Option<i64>) -> Result<(), ConfigError> {
    let Some(depth) = depth else {
        return Ok(());
    };

    if depth == UNBOUNDED_DEPTH || u32::try_from(depth).is_ok() {
        return Ok(());
    }

    Err(ConfigError::Invalid {
        at: at.to_string(),
        message: format!("max_depth must be -1 or between 0 and {}, got {depth}", u32::MAX),
    })
}

///
/// TESTS
///
