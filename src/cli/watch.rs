//! Watch command implementation.
//!
//! Performs an initial build, then polls every bundle's source files and
//! rebuilds on change. Build failures during a rebuild are reported and
//! watching continues; only the initial build is fatal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;

use crate::cli::build;
use crate::config::Config;
use crate::error::Result;
use crate::events::Dispatcher;
use crate::output::{display_path, plural, Printer};
use crate::watcher::{WatchControl, Watcher};

/// Rebuild bundles whenever a source file changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Bundle definition file
    #[arg(long, short, default_value = "bundles.yaml")]
    pub config: PathBuf,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "500")]
    pub interval_ms: u64,
}

pub fn run(args: WatchArgs) -> Result<()> {
    let printer = Printer::new();
    let config = Config::load(&args.config)?;

    let mut events = Dispatcher::new();
    let manifest = build::build(&config, &mut events)?;
    printer.status("Built", &plural(manifest.len(), "bundle", "bundles"));

    let mut watcher = Watcher::new(Duration::from_millis(args.interval_ms));
    let files = watched_files(&config);
    for file in &files {
        watcher.add_file(file)?;
    }
    printer.status("Watching", &plural(files.len(), "file", "files"));

    let mut watch_events = Dispatcher::new();
    watcher.start(&mut watch_events, move |path, _previous, _current| {
        let printer = Printer::new();
        printer.info("Changed", &display_path(path));
        let mut events = Dispatcher::new();
        match build::build(&config, &mut events) {
            Ok(manifest) => {
                printer.status("Rebuilt", &plural(manifest.len(), "bundle", "bundles"));
            }
            Err(error) => {
                printer.warning("Failed", &error.to_string());
            }
        }
        WatchControl::Continue
    })?;

    Ok(())
}

/// Every bundle path resolved against the global source root, deduplicated
/// in first-seen order.
fn watched_files(config: &Config) -> Vec<PathBuf> {
    let root = config
        .globals
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut files: Vec<PathBuf> = Vec::new();
    for bundle in &config.bundles {
        for path in &bundle.paths {
            let resolved = resolve(&root, path);
            if !files.contains(&resolved) {
                files.push(resolved);
            }
        }
    }
    files
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(path)
    }
}
