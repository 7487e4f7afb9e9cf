//! bundler - Asset bundling pipeline
//!
//! A library for turning named, ordered sets of asset paths into rendered
//! HTML tags, with decorators for concatenation into content-addressed
//! artifacts and Subresource Integrity annotation, plus a polling watcher
//! for change-driven rebuilds.

pub mod builder;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod hash;
pub mod manifest;
pub mod output;
pub mod processor;
pub mod watcher;

pub use builder::{BuiltBundle, Builder};
pub use bundle::PathBundle;
pub use config::{BundleConfig, Config, DecoratorConfig, Globals};
pub use error::{BundlerError, Result};
pub use events::{Dispatcher, Event, ListenerId};
pub use format::{Concatenate, Decorator, Formatter, Sri, SriAlgorithm, TagFormatter, TagKind};
pub use manifest::{Manifest, ManifestEntry};
pub use processor::Processor;
pub use watcher::{StopReason, WatchControl, WatchHandle, Watcher};
