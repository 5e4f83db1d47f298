use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Generator, Shell, generate};

#[derive(Args)]
pub struct CompletionCommand {
    /// The shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub async fn run(args: CompletionCommand) -> Result<()> {
    let mut cmd = super::Commentron::command();
    let script = completion_script(args.shell, &mut cmd)?;
    println!("{script}");
    Ok(())
}

/// Render the completion script as a UTF-8 string.
pub fn completion_script<G: Generator>(shell: G, cmd: &mut clap::Command) -> Result<String> {
    let bin_name = cmd.get_bin_name().unwrap_or("commentron").to_string();

    let mut buffer = Vec::new();
    generate::<G, _>(shell, cmd, bin_name, &mut buffer);

    String::from_utf8(buffer).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_the_binary() {
        let mut cmd = crate::app::Commentron::command();
        let script = completion_script(Shell::Bash, &mut cmd).unwrap();
        assert!(script.contains("commentron"));
    }
}
