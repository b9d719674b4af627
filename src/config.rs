//! Generator configuration
//!
//! Handles loading of the `bapigen.yaml` file that tunes how entities are
//! built and rendered. Every setting has a default, so an empty file (or no
//! file at all) gives the Hibersap conventions.

use crate::error::{Error, Result};
use crate::render::RenderConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up by [`GeneratorConfig::discover`]
pub const CONFIG_FILE: &str = "bapigen.yaml";

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

impl GeneratorConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `bapigen.yaml` from `dir`, falling back to defaults if absent
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading generator config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Settings for the entity builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuilderConfig {
    /// Qualified collection type used for table fields
    #[serde(default = "default_collection_type")]
    pub collection_type: String,

    /// Prefix removed from local names before deriving type names
    #[serde(default = "default_local_name_prefix")]
    pub local_name_prefix: String,

    /// Build a declaration for every structure and table row
    #[serde(default = "default_true")]
    pub generate_structures: bool,
}

fn default_collection_type() -> String {
    "java.util.List".to_string()
}

fn default_local_name_prefix() -> String {
    "_".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            collection_type: default_collection_type(),
            local_name_prefix: default_local_name_prefix(),
            generate_structures: true,
        }
    }
}
