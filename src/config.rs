//! Bundle definition loading (bundles.yaml).
//!
//! The definition file maps bundle names to a formatter kind, an ordered
//! decorator list and an ordered path list. A `globals` section supplies
//! `source` / `destination` / `web_path` defaults that merge into every
//! decorator's config unless overridden locally.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BundlerError, Result};
use crate::format::TagKind;

/// Settings merged into every decorator config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Globals {
    /// Root directory of the input files.
    pub source: Option<PathBuf>,

    /// Writable directory for derived artifacts.
    pub destination: Option<PathBuf>,

    /// Web-facing prefix for synthesized paths (e.g. `/assets`).
    pub web_path: Option<String>,
}

/// One decorator entry in a bundle's ordered decorator list.
///
/// Decorators listed later wrap earlier ones, so the last entry's
/// transformation runs first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DecoratorConfig {
    Concatenate {
        #[serde(default)]
        source: Option<PathBuf>,
        #[serde(default)]
        destination: Option<PathBuf>,
        #[serde(default)]
        web_path: Option<String>,
        #[serde(default)]
        bundle_basename: Option<String>,
    },
    Sri {
        #[serde(default)]
        source: Option<PathBuf>,
        /// Digest names in token order. Omitted means `["sha384"]`; an
        /// explicit empty list disables the decorator entirely.
        #[serde(default)]
        algorithms: Option<Vec<String>>,
    },
}

/// One named bundle definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub name: String,
    pub formatter: TagKind,
    #[serde(default)]
    pub decorators: Vec<DecoratorConfig>,
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Full parsed bundle definition file.
///
/// `bundles` is a sequence, so definition order is preserved through the
/// whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub globals: Globals,
    pub bundles: Vec<BundleConfig>,
}

impl Config {
    /// Load a definition file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BundlerError::Parse {
            message: format!("Failed to read {}: {}", path.display(), e),
            help: None,
        })?;
        Self::parse(&content)
    }

    /// Parse a definition from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| BundlerError::Parse {
            message: format!("Invalid bundle definition: {}", e),
            help: Some("Check the bundles.yaml syntax".to_string()),
        })
    }
}
