//! Concatenation decorator: N input files become one content-addressed file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::PathBundle;
use crate::error::{BundlerError, Result};
use crate::format::{resolve_source, Decorator, Formatter};
use crate::hash;

pub const DEFAULT_BASENAME: &str = "bundle";

/// Replaces the whole bundle with a single synthesized path pointing at a
/// freshly written, content-addressed concatenation of the inputs.
///
/// The output filename is a pure function of the concatenated bytes, so
/// unchanged inputs re-produce the identical file and path.
pub struct Concatenate {
    inner: Box<dyn Formatter>,
    source: PathBuf,
    destination: PathBuf,
    web_path: Option<String>,
    basename: String,
}

impl Concatenate {
    pub fn new(inner: Box<dyn Formatter>, source: PathBuf, destination: PathBuf) -> Self {
        Self {
            inner,
            source,
            destination,
            web_path: None,
            basename: DEFAULT_BASENAME.to_string(),
        }
    }

    /// Web-facing prefix for the synthesized path. Without one the path is
    /// destination-relative.
    pub fn with_web_path(mut self, web_path: impl Into<String>) -> Self {
        self.web_path = Some(web_path.into());
        self
    }

    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = basename.into();
        self
    }

    fn read_inputs(&self, bundle: &PathBundle) -> Result<(Vec<u8>, String)> {
        let mut content = Vec::new();
        let mut extension = None;
        for path in bundle.paths() {
            let resolved = resolve_source(&self.source, path);
            if extension.is_none() {
                extension = Some(
                    resolved
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("")
                        .to_string(),
                );
            }
            // raw bytes: inputs are not required to be UTF-8
            let bytes = fs::read(&resolved)
                .map_err(|_| BundlerError::MissingSource { path: resolved })?;
            if !content.is_empty() {
                content.push(b'\n');
            }
            content.extend_from_slice(&bytes);
        }
        Ok((content, extension.unwrap_or_default()))
    }

    fn public_path(&self, filename: &str) -> String {
        match &self.web_path {
            Some(web_path) => format!("{}/{}", web_path.trim_end_matches('/'), filename),
            None => self.destination.join(filename).display().to_string(),
        }
    }
}

impl Decorator for Concatenate {
    fn inner(&self) -> &dyn Formatter {
        self.inner.as_ref()
    }

    fn modify_paths(&self, bundle: &mut PathBundle) -> Result<()> {
        if bundle.is_empty() {
            return Err(BundlerError::input(
                "cannot concatenate an empty bundle",
            ));
        }
        if !self.destination.is_dir() {
            return Err(BundlerError::InvalidConfig {
                message: format!(
                    "Destination {} is not a valid directory",
                    self.destination.display()
                ),
                help: Some("Create the destination directory before building".to_string()),
            });
        }

        let (content, extension) = self.read_inputs(bundle)?;
        let stem = format!("{}-{}", self.basename, hash::fingerprint(&content));
        let filename = if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{extension}")
        };
        let destination = self.destination.join(&filename);
        write_artifact(&destination, &content)?;

        bundle.clear();
        bundle.add(&self.public_path(&filename))?;
        Ok(())
    }
}

impl Formatter for Concatenate {
    fn render(&self, bundle: &mut PathBundle) -> Result<String> {
        Decorator::render(self, bundle)
    }
}

fn write_artifact(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|e| BundlerError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
