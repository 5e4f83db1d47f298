use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input};

use crate::ai::error::GenError;
use crate::ai::http::SamplingParams;
use crate::ai::prompt::{GenerationConfig, Length, PostInput, Tone};
use crate::ai::{self, Credentials};
use crate::config::Settings;
use crate::session::{self, Session};

/// Overall ceiling for one generation operation. The in-flight request is
/// abandoned, not cancelled.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Args)]
pub struct GenerateCommand {
    /// Post content. Reads stdin when neither this nor --file is given.
    pub content: Option<String>,

    /// Read the post content from a file.
    #[arg(short, long, conflicts_with = "content")]
    pub file: Option<PathBuf>,

    /// Display name of the post author.
    #[arg(short, long)]
    pub author: Option<String>,

    /// Override the configured comment tone.
    #[arg(short, long, value_enum)]
    pub tone: Option<Tone>,

    /// Override the configured comment length.
    #[arg(short, long, value_enum)]
    pub length: Option<Length>,

    /// Prompt for posts repeatedly, caching one comment per post.
    #[arg(short, long)]
    pub interactive: bool,
}

pub async fn run(args: GenerateCommand) -> Result<()> {
    let settings = Settings::load(None)?;
    let mut config = settings.generation_config();
    if let Some(tone) = args.tone {
        config.tone = tone;
    }
    if let Some(length) = args.length {
        config.length = length;
    }
    let credentials = settings.credentials();
    let params = SamplingParams::with_max_tokens(settings.max_tokens);

    if args.interactive {
        return interactive_loop(&config, &credentials, &params).await;
    }

    let content = read_content(&args)?;
    let post = PostInput::new(content, args.author.clone());
    let comment = generate_once(&post, &config, &credentials, &params).await?;
    println!("{comment}");
    Ok(())
}

fn read_content(args: &GenerateCommand) -> Result<String> {
    let content = if let Some(content) = &args.content {
        content.clone()
    } else if let Some(path) = &args.file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read post file: {}", path.display()))?
    } else {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read post content from stdin")?;
        buffer
    };

    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(anyhow!("Post content is empty"));
    }
    Ok(content)
}

async fn generate_once(
    post: &PostInput,
    config: &GenerationConfig,
    credentials: &Credentials,
    params: &SamplingParams,
) -> Result<String> {
    match tokio::time::timeout(
        GENERATION_TIMEOUT,
        ai::generate_with_params(post, config, credentials, params),
    )
    .await
    {
        Ok(result) => Ok(result?),
        Err(_) => Err(GenError::Timeout {
            secs: GENERATION_TIMEOUT.as_secs(),
        }
        .into()),
    }
}

/// Paste posts one after another; each result is cached by post identifier
/// so asking again offers the cached comment before regenerating.
async fn interactive_loop(
    config: &GenerationConfig,
    credentials: &Credentials,
    params: &SamplingParams,
) -> Result<()> {
    let mut session = Session::new();

    loop {
        let content: String = Input::new()
            .with_prompt("Post content (empty to quit)")
            .allow_empty(true)
            .interact_text()?;
        let content = content.trim().to_string();
        if content.is_empty() {
            break;
        }

        let id = session::post_id(&content);
        if let Some(cached) = session.cached(&id) {
            println!("{} {}", "Cached:".cyan().bold(), cached);
            let regenerate = Confirm::new()
                .with_prompt("Regenerate?")
                .default(false)
                .interact()?;
            if !regenerate {
                continue;
            }
            session.invalidate(&id);
        }

        if !session.try_begin() {
            println!("{}", "A generation is already running.".yellow());
            continue;
        }
        let post = PostInput::new(content, None);
        let outcome = generate_once(&post, config, credentials, params).await;
        session.finish();

        match outcome {
            Ok(comment) => {
                println!("{} {}", "Comment:".green().bold(), comment);
                session.store(id, comment);
            }
            Err(err) => println!("{} {err:#}", "Error:".red().bold()),
        }
    }

    Ok(())
}
