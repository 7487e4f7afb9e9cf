pub mod build;
pub mod completions;
pub mod watch;

use clap::{Parser, Subcommand};

/// bundler - Asset bundling pipeline
#[derive(Parser, Debug)]
#[command(name = "bundler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render all bundles from a definition file
    Build(build::BuildArgs),

    /// Rebuild bundles whenever a source file changes
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
