use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::{Settings, config_path};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set a configuration value.
    Set { key: String, value: String },
    /// Print a single configuration value.
    Get { key: String },
    /// List all configured values.
    List,
    /// Print the settings file location.
    Path,
}

pub async fn run(args: ConfigCommand) -> Result<()> {
    match args.action {
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load(None)?;
            settings.set(&key, &value)?;
            settings.save(None)?;
            println!("{} {} = {}", "Set".green().bold(), key, settings.get(&key).unwrap_or(value));
        }
        ConfigAction::Get { key } => match Settings::load(None)?.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(anyhow!("Unknown config key: {}", key)),
        },
        ConfigAction::List => {
            let settings = Settings::load(None)?;
            for (key, value) in settings.list() {
                println!("{}: {}", key.blue().bold(), value);
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path(None).display());
        }
    }
    Ok(())
}
