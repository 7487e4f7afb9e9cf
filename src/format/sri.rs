//! Subresource Integrity decorator.
//!
//! Annotates every bundle entry with an `integrity` attribute built from
//! one or more file digests, plus `crossorigin="anonymous"`. The bundle's
//! path set is never changed.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::bundle::PathBundle;
use crate::error::{BundlerError, Result};
use crate::format::{resolve_source, Decorator, Formatter};

/// Digest algorithms accepted in an SRI `integrity` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SriAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl SriAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl FromStr for SriAlgorithm {
    type Err = BundlerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            other => Err(BundlerError::InvalidConfig {
                message: format!("Unknown SRI algorithm '{other}'"),
                help: Some("Expected 'sha256', 'sha384' or 'sha512'".to_string()),
            }),
        }
    }
}

/// Decorator adding `integrity` / `crossorigin` attributes per path.
pub struct Sri {
    inner: Box<dyn Formatter>,
    source: PathBuf,
    algorithms: Vec<SriAlgorithm>,
}

impl Sri {
    /// Default algorithm list when the config names none.
    pub fn default_algorithms() -> Vec<SriAlgorithm> {
        vec![SriAlgorithm::Sha384]
    }

    pub fn new(inner: Box<dyn Formatter>, source: PathBuf) -> Self {
        Self {
            inner,
            source,
            algorithms: Self::default_algorithms(),
        }
    }

    /// Replace the algorithm list. An empty list turns the decorator into a
    /// no-op that adds no attributes at all.
    pub fn with_algorithms(mut self, algorithms: Vec<SriAlgorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }
}

impl Decorator for Sri {
    fn inner(&self) -> &dyn Formatter {
        self.inner.as_ref()
    }

    fn modify_paths(&self, bundle: &mut PathBundle) -> Result<()> {
        if self.algorithms.is_empty() {
            return Ok(());
        }
        let paths: Vec<String> = bundle.paths().map(str::to_string).collect();
        for path in paths {
            let resolved = resolve_source(&self.source, &path);
            let content = fs::read(&resolved)
                .map_err(|_| BundlerError::MissingSource { path: resolved })?;
            let tokens: Vec<String> = self
                .algorithms
                .iter()
                .map(|alg| format!("{}-{}", alg.name(), BASE64.encode(alg.digest(&content))))
                .collect();
            bundle.set_attribute(&path, "integrity", &tokens.join(" "));
            bundle.set_attribute(&path, "crossorigin", "anonymous");
        }
        Ok(())
    }
}

impl Formatter for Sri {
    fn render(&self, bundle: &mut PathBundle) -> Result<String> {
        Decorator::render(self, bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{TagFormatter, TagKind};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn stylesheet() -> Box<dyn Formatter> {
        Box::new(TagFormatter::new(TagKind::Stylesheet))
    }

    #[test]
    fn test_integrity_matches_sha384_of_file_bytes() {
        let dir = tempdir().unwrap();
        let content = b"body { margin: 0 }";
        fs::write(dir.path().join("app.css"), content).unwrap();

        let decorator = Sri::new(stylesheet(), dir.path().to_path_buf());
        let mut bundle = PathBundle::from_paths(["app.css"]).unwrap();
        decorator.modify_paths(&mut bundle).unwrap();

        let expected = format!("sha384-{}", BASE64.encode(Sha384::digest(content)));
        assert_eq!(
            bundle.attributes("app.css"),
            &[
                ("integrity".to_string(), expected),
                ("crossorigin".to_string(), "anonymous".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiple_algorithms_join_with_spaces() {
        let dir = tempdir().unwrap();
        let content = b"let a = 1";
        fs::write(dir.path().join("app.js"), content).unwrap();

        let decorator = Sri::new(stylesheet(), dir.path().to_path_buf())
            .with_algorithms(vec![SriAlgorithm::Sha256, SriAlgorithm::Sha512]);
        let mut bundle = PathBundle::from_paths(["app.js"]).unwrap();
        decorator.modify_paths(&mut bundle).unwrap();

        let expected = format!(
            "sha256-{} sha512-{}",
            BASE64.encode(Sha256::digest(content)),
            BASE64.encode(Sha512::digest(content)),
        );
        let attributes = bundle.attributes("app.js");
        assert_eq!(attributes[0], ("integrity".to_string(), expected));
    }

    #[test]
    fn test_empty_algorithm_list_is_a_no_op() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.css"), "body {}").unwrap();

        let decorator =
            Sri::new(stylesheet(), dir.path().to_path_buf()).with_algorithms(Vec::new());
        let mut bundle = PathBundle::from_paths(["app.css"]).unwrap();
        decorator.modify_paths(&mut bundle).unwrap();

        assert!(bundle.attributes("app.css").is_empty());
    }

    #[test]
    fn test_missing_source_file_fails() {
        let dir = tempdir().unwrap();
        let decorator = Sri::new(stylesheet(), dir.path().to_path_buf());
        let mut bundle = PathBundle::from_paths(["ghost.css"]).unwrap();
        assert!(matches!(
            decorator.modify_paths(&mut bundle),
            Err(BundlerError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_paths_are_never_replaced() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "a").unwrap();
        fs::write(dir.path().join("b.css"), "b").unwrap();

        let decorator = Sri::new(stylesheet(), dir.path().to_path_buf());
        let mut bundle = PathBundle::from_paths(["a.css", "b.css"]).unwrap();
        decorator.modify_paths(&mut bundle).unwrap();

        let paths: Vec<_> = bundle.paths().collect();
        assert_eq!(paths, vec!["a.css", "b.css"]);
    }

    #[test]
    fn test_unknown_algorithm_name_is_rejected() {
        assert!(matches!(
            "md5".parse::<SriAlgorithm>(),
            Err(BundlerError::InvalidConfig { .. })
        ));
    }
}
