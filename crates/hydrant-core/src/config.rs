use std::path::Path;

use hydrant_store::ResolutionMode;
use serde::{Deserialize, Serialize};

use crate::error::{HydrateError, HydrateResult};

/// Configuration shared by the hydrators.
///
/// ```toml
/// prefer_lightweight_references = false
/// strict_foreign_relations = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydratorConfig {
    /// Bind identifiers to unverified placeholders instead of loading the
    /// referenced objects.
    pub prefer_lightweight_references: bool,
    /// Fail when the foreign relation delegate declines a relation. When
    /// `false` the relation is skipped with a warning.
    pub strict_foreign_relations: bool,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            prefer_lightweight_references: true,
            strict_foreign_relations: true,
        }
    }
}

impl HydratorConfig {
    /// Load every referenced object and leave unknown identifiers unset.
    pub fn verified() -> Self {
        Self {
            prefer_lightweight_references: false,
            ..Default::default()
        }
    }

    /// Resolution mode selected by this configuration.
    pub fn resolution_mode(&self) -> ResolutionMode {
        ResolutionMode::from_preference(self.prefer_lightweight_references)
    }

    pub fn from_toml_str(s: &str) -> HydrateResult<Self> {
        toml::from_str(s).map_err(|e| HydrateError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> HydrateResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| HydrateError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
