use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundler operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundlerError {
    #[error("Invalid input: {message}")]
    #[diagnostic(code(bundler::input))]
    InvalidInput {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bundler::config))]
    InvalidConfig {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Missing source file: {}", path.display())]
    #[diagnostic(code(bundler::missing_source))]
    MissingSource { path: PathBuf },

    #[error("Write failed for {}: {message}", path.display())]
    #[diagnostic(code(bundler::write))]
    WriteError { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(bundler::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Manifest export failed: {message}")]
    #[diagnostic(code(bundler::manifest))]
    ManifestExport { message: String },

    #[error("Processing bundle '{bundle}' failed: {source}")]
    #[diagnostic(code(bundler::process))]
    Processing {
        bundle: String,
        #[source]
        source: Box<BundlerError>,
    },
}

impl BundlerError {
    /// Shorthand for an `InvalidInput` without help text.
    pub fn input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for an `InvalidConfig` without help text.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BundlerError>;
