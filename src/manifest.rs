//! Per-run record of rendered bundles.

use serde::Serialize;

use crate::bundle::PathBundle;
use crate::error::{BundlerError, Result};

/// One rendered bundle: the final markup plus the post-decorator path list.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub html: String,
    pub paths: Vec<String>,
}

/// Mapping of bundle name to rendered result, accumulated across one
/// processor run. Append-only within a run; the next run starts from a
/// fresh or cleared manifest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, html: String, bundle: &PathBundle) {
        self.entries.push(ManifestEntry {
            name: name.to_string(),
            html,
            paths: bundle.paths().map(str::to_string).collect(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pretty-printed JSON form for external tooling.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BundlerError::ManifestExport {
            message: e.to_string(),
        })
    }
}
