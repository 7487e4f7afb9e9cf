//! Catalogue of event names emitted by the pipeline.
//!
//! Configuration / bundle definition lifecycle:
//! - [`CONFIG_BUNDLE_START`] — before a bundle definition is built
//! - [`CONFIG_BUNDLE_END`] — after a bundle has been fully constructed
//! - [`CONFIG_FILE_ADDING`] — before a path is added to a bundle
//!   (cancellable via `Event::stop`, path mutable via the `path` key)
//! - [`CONFIG_FILE_ADDED`] — after a path has been added
//!
//! Processing lifecycle:
//! - [`BUNDLE_PROCESS_BEFORE`] / [`BUNDLE_PROCESS_AFTER`] — around rendering
//! - [`BUNDLE_PROCESS_ERROR`] — a render failed (error in payload)
//!
//! Watcher lifecycle:
//! - [`WATCHER_START`] / [`WATCHER_STOP`] — around the poll loop
//! - [`WATCHER_FILE_MODIFIED`] — a watched file's mtime changed

pub const CONFIG_BUNDLE_START: &str = "config.bundle.start";
pub const CONFIG_BUNDLE_END: &str = "config.bundle.end";
pub const CONFIG_FILE_ADDING: &str = "config.bundle.file.adding";
pub const CONFIG_FILE_ADDED: &str = "config.bundle.file.added";

pub const BUNDLE_PROCESS_BEFORE: &str = "bundle.process.before";
pub const BUNDLE_PROCESS_AFTER: &str = "bundle.process.after";
pub const BUNDLE_PROCESS_ERROR: &str = "bundle.process.error";

pub const WATCHER_START: &str = "watcher.start";
pub const WATCHER_STOP: &str = "watcher.stop";
pub const WATCHER_FILE_MODIFIED: &str = "watcher.file.modified";
