//! Configuration loader
//!
//! Loads pre-seeded attribute stores from YAML or JSON files.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::attributes::{AttributeStore, ReadOnlyPolicy};

/// Environment variable overriding the config path
pub const CONFIG_PATH_ENV: &str = "OB_SUPPORT_ATTRIBUTES";

/// Config path used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/attributes.yaml";

/// Seed attributes and read-only policy for an [`AttributeStore`].
///
/// ```yaml
/// read_only: [id]
/// attributes:
///   id: 42
///   name: John
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributesConfig {
    #[serde(default)]
    pub read_only: ReadOnlyPolicy,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl AttributesConfig {
    /// Seed a store; the policy applies only to later mutations.
    pub fn into_store(self) -> AttributeStore {
        AttributeStore::seeded(self.attributes, self.read_only)
    }
}

/// Document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` is JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create loader from OB_SUPPORT_ATTRIBUTES or default to "config/attributes.yaml"
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the config file
    pub fn load(&self) -> Result<AttributesConfig> {
        let path = &self.path;
        info!("Loading attribute configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::parse(&content, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!(
            "Loaded {} attributes (read-only policy: {})",
            config.attributes.len(),
            config.read_only
        );
        Ok(config)
    }

    /// Load the config and seed a store from it
    pub fn load_store(&self) -> Result<AttributeStore> {
        let store = self.load()?.into_store();
        debug!(keys = ?store.keys(), "Seeded attribute store");
        Ok(store)
    }

    /// Parse a config document.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<AttributesConfig> {
        let config: AttributesConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .context("Invalid YAML attribute config")?,
            ConfigFormat::Json => serde_json::from_str(content)
                .context("Invalid JSON attribute config")?,
        };
        Ok(config)
    }
}
