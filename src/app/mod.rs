use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod completion;
pub mod config;
pub mod generate;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Commentron {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a comment for a feed post.
    Generate(generate::GenerateCommand),
    /// Manage persisted settings.
    Config(config::ConfigCommand),
    /// Validate a provider API key with a minimal request.
    Check(check::CheckCommand),
    /// Generate shell completion scripts.
    Completion(completion::CompletionCommand),
}

pub async fn run_app(cli: Commentron) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => generate::run(args).await?,
        Commands::Config(args) => config::run(args).await?,
        Commands::Check(args) => check::run(args).await?,
        Commands::Completion(args) => completion::run(args).await?,
    }
    Ok(())
}
