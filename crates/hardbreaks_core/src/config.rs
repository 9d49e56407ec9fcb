//! Transform configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConfigError;
use crate::breaks::Breaks;
use crate::node_test::NodeTest;
use crate::replace::Options;
use crate::transform::{BreaksPlugin, SchemaTransform, TransformList};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".hardbreaks.json";

/// Configuration for the transform pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreaksConfig {
    /// Whether to turn line endings into breaks.
    #[serde(default = "default_breaks")]
    pub breaks: bool,

    /// Node test; text below matching ancestors is left alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Value>,

    /// Find-and-replace schema run after the break rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacements: Option<Value>,
}

fn default_breaks() -> bool {
    true
}

impl BreaksConfig {
    /// Creates the default configuration: breaks on, nothing ignored.
    pub fn new() -> Self {
        Self {
            breaks: true,
            ignore: None,
            replacements: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the configuration file in `dir`, if there is one.
    pub fn find_in(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Find-and-replace options shared by every configured pass.
    pub fn options(&self) -> Result<Options, ConfigError> {
        let mut options = Options::new();
        if let Some(ignore) = &self.ignore {
            options = options.ignore(NodeTest::from_value(ignore)?);
        }
        Ok(options)
    }

    /// Builds the transform list this configuration describes.
    pub fn build(&self) -> Result<TransformList, ConfigError> {
        let options = self.options()?;
        let mut list = TransformList::new();

        if let Some(schema) = &self.replacements {
            list.push(Arc::new(SchemaTransform::new(schema.clone(), options.clone())?));
        }
        if self.breaks {
            BreaksPlugin::with_transform(Breaks::with_options(options)).activate(&mut list);
        }

        Ok(list)
    }
}

impl Default for BreaksConfig {
    fn default() -> Self {
        Self::new()
    }
}
