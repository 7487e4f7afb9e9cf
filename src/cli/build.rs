//! Build command implementation.
//!
//! Loads the bundle definition, renders every bundle and prints the
//! resulting tags to stdout. Status lines go to stderr.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::builder::Builder;
use crate::config::Config;
use crate::error::{BundlerError, Result};
use crate::events::{names, Dispatcher};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::processor::Processor;

/// Render all bundles from a definition file
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Bundle definition file
    #[arg(long, short, default_value = "bundles.yaml")]
    pub config: PathBuf,

    /// Write a JSON manifest of the rendered bundles
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let mut events = Dispatcher::new();
    register_status_listeners(&mut events);

    let manifest = build(&config, &mut events)?;

    for entry in manifest.iter() {
        println!("{}", entry.html);
    }

    if let Some(path) = &args.manifest {
        fs::write(path, manifest.to_json()?).map_err(|e| BundlerError::WriteError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Printer::new().info("Wrote", &display_path(path));
    }

    Printer::new().status(
        "Finished",
        &plural(manifest.len(), "bundle", "bundles"),
    );
    Ok(())
}

/// Run the Builder → Processor flow for one definition.
pub fn build(config: &Config, events: &mut Dispatcher) -> Result<Manifest> {
    let mut builder = Builder::from_config(config, events)?;
    let mut manifest = Manifest::new();
    Processor::new().run(events, &mut builder, &mut manifest)?;
    Ok(manifest)
}

fn register_status_listeners(events: &mut Dispatcher) {
    let printer = Printer::new();
    events.on(names::BUNDLE_PROCESS_AFTER, move |event| {
        printer.status("Rendered", event.get("bundle").unwrap_or_default());
    });
    let printer = Printer::new();
    events.on(names::BUNDLE_PROCESS_ERROR, move |event| {
        printer.error("Failed", event.get("bundle").unwrap_or_default());
    });
}
