use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::ai::error::GenError;
use crate::ai::{self, Credentials, ProviderKind};
use crate::config::Settings;

const CHECK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Args)]
pub struct CheckCommand {
    /// Provider to check; defaults to the configured one.
    #[arg(value_enum)]
    pub provider: Option<ProviderKind>,
}

pub async fn run(args: CheckCommand) -> Result<()> {
    let settings = Settings::load(None)?;
    let provider = args.provider.unwrap_or(settings.provider);

    let api_key = match provider {
        ProviderKind::Groq => settings.groq_api_key.clone(),
        ProviderKind::Gemini => settings.gemini_api_key.clone(),
    };
    let dispatcher = ai::dispatcher_for(&Credentials::new(provider, api_key))?;

    println!("{} {provider} API key...", "Checking".cyan().bold());
    let sentence = match tokio::time::timeout(CHECK_TIMEOUT, ai::check_key(&dispatcher)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(GenError::Timeout {
                secs: CHECK_TIMEOUT.as_secs(),
            }
            .into());
        }
    };

    println!("{} {provider} responded: {sentence}", "OK".green().bold());
    Ok(())
}
