//! Assembles renderable bundles from a parsed definition.
//!
//! For each named bundle the Builder produces a formatter wrapped in its
//! configured decorator chain plus the [`PathBundle`] of source files,
//! emitting the configuration lifecycle events along the way.

use std::path::PathBuf;

use crate::bundle::PathBundle;
use crate::config::{BundleConfig, Config, DecoratorConfig, Globals};
use crate::error::{BundlerError, Result};
use crate::events::{names, Dispatcher};
use crate::format::{Concatenate, Formatter, Sri, SriAlgorithm, TagFormatter};

/// One named bundle ready for processing.
pub struct BuiltBundle {
    pub name: String,
    pub formatter: Box<dyn Formatter>,
    pub bundle: PathBundle,
}

/// Holds the assembled bundles in definition order.
#[derive(Default)]
pub struct Builder {
    bundles: Vec<BuiltBundle>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every bundle in the definition, in order.
    ///
    /// Emits `config.bundle.start` / `config.bundle.end` around each bundle
    /// and `config.bundle.file.adding` / `config.bundle.file.added` around
    /// each path insertion. Stopping an `adding` event skips the path and
    /// suppresses its `added` event; mutating the event's `path` value
    /// changes what gets stored.
    pub fn from_config(config: &Config, events: &mut Dispatcher) -> Result<Self> {
        let mut builder = Self::new();
        for definition in &config.bundles {
            events.emit(names::CONFIG_BUNDLE_START, &[("bundle", &definition.name)]);

            let formatter = build_chain(definition, &config.globals)?;
            let mut bundle = PathBundle::new();
            for path in &definition.paths {
                let adding = events.emit(
                    names::CONFIG_FILE_ADDING,
                    &[("bundle", &definition.name), ("path", path)],
                );
                if adding.is_stopped() {
                    continue;
                }
                let stored = adding.get("path").unwrap_or(path.as_str()).to_string();
                bundle.add(&stored)?;
                events.emit(
                    names::CONFIG_FILE_ADDED,
                    &[("bundle", &definition.name), ("path", &stored)],
                );
            }

            events.emit(
                names::CONFIG_BUNDLE_END,
                &[
                    ("bundle", &definition.name),
                    ("count", &bundle.count().to_string()),
                ],
            );
            builder.add_bundle(definition.name.clone(), formatter, bundle);
        }
        Ok(builder)
    }

    /// Register a pre-assembled bundle.
    pub fn add_bundle(
        &mut self,
        name: impl Into<String>,
        formatter: Box<dyn Formatter>,
        bundle: PathBundle,
    ) -> &mut Self {
        self.bundles.push(BuiltBundle {
            name: name.into(),
            formatter,
            bundle,
        });
        self
    }

    pub fn bundles(&self) -> &[BuiltBundle] {
        &self.bundles
    }

    pub fn bundles_mut(&mut self) -> &mut [BuiltBundle] {
        &mut self.bundles
    }
}

/// Wrap the tag formatter in the configured decorators, in list order, so
/// the last-listed decorator's transformation runs first.
fn build_chain(definition: &BundleConfig, globals: &Globals) -> Result<Box<dyn Formatter>> {
    let mut formatter: Box<dyn Formatter> = Box::new(TagFormatter::new(definition.formatter));
    for decorator in &definition.decorators {
        formatter = decorate(decorator, globals, formatter)?;
    }
    Ok(formatter)
}

fn decorate(
    decorator: &DecoratorConfig,
    globals: &Globals,
    inner: Box<dyn Formatter>,
) -> Result<Box<dyn Formatter>> {
    match decorator {
        DecoratorConfig::Concatenate {
            source,
            destination,
            web_path,
            bundle_basename,
        } => {
            let source = required_path("concatenate", "source", source, &globals.source)?;
            let destination =
                required_path("concatenate", "destination", destination, &globals.destination)?;
            let mut concatenate = Concatenate::new(inner, source, destination);
            if let Some(web_path) = web_path.as_ref().or(globals.web_path.as_ref()) {
                concatenate = concatenate.with_web_path(web_path.clone());
            }
            if let Some(basename) = bundle_basename {
                concatenate = concatenate.with_basename(basename.clone());
            }
            Ok(Box::new(concatenate))
        }
        DecoratorConfig::Sri { source, algorithms } => {
            let source = required_path("sri", "source", source, &globals.source)?;
            let mut sri = Sri::new(inner, source);
            if let Some(names) = algorithms {
                let algorithms = names
                    .iter()
                    .map(|name| name.parse::<SriAlgorithm>())
                    .collect::<Result<Vec<_>>>()?;
                sri = sri.with_algorithms(algorithms);
            }
            Ok(Box::new(sri))
        }
    }
}

fn required_path(
    decorator: &str,
    key: &str,
    local: &Option<PathBuf>,
    global: &Option<PathBuf>,
) -> Result<PathBuf> {
    local
        .clone()
        .or_else(|| global.clone())
        .ok_or_else(|| BundlerError::InvalidConfig {
            message: format!("Decorator '{decorator}' requires a '{key}' setting"),
            help: Some(format!(
                "Set '{key}' on the decorator or in the globals section"
            )),
        })
}
