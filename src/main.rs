use bundler::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => bundler::cli::build::run(args)?,
        Commands::Watch(args) => bundler::cli::watch::run(args)?,
        Commands::Completions(args) => bundler::cli::completions::run(args)?,
    }

    Ok(())
}
