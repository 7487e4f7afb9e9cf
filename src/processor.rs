//! Renders all assembled bundles, emitting the processing lifecycle events.

use crate::builder::Builder;
use crate::error::{BundlerError, Result};
use crate::events::{names, Dispatcher};
use crate::manifest::Manifest;

/// Runs every bundle of a [`Builder`] through its formatter chain.
///
/// One bundle's failure aborts the whole run: there is no bundle-level
/// isolation. Entries recorded before the failure stay in the caller's
/// manifest, but the call itself returns the error.
#[derive(Debug, Default)]
pub struct Processor;

impl Processor {
    pub fn new() -> Self {
        Self
    }

    /// Render each bundle in definition order into `manifest`.
    pub fn run(
        &self,
        events: &mut Dispatcher,
        builder: &mut Builder,
        manifest: &mut Manifest,
    ) -> Result<()> {
        for built in builder.bundles_mut() {
            events.emit(names::BUNDLE_PROCESS_BEFORE, &[("bundle", &built.name)]);
            match built.formatter.render(&mut built.bundle) {
                Ok(html) => {
                    events.emit(
                        names::BUNDLE_PROCESS_AFTER,
                        &[("bundle", &built.name), ("rendered", &html)],
                    );
                    manifest.add(&built.name, html, &built.bundle);
                }
                Err(error) => {
                    events.emit(
                        names::BUNDLE_PROCESS_ERROR,
                        &[("bundle", &built.name), ("error", &error.to_string())],
                    );
                    return Err(BundlerError::Processing {
                        bundle: built.name.clone(),
                        source: Box::new(error),
                    });
                }
            }
        }
        Ok(())
    }
}
