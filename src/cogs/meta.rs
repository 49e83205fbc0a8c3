use poise::builtins::{self, autocomplete_command, HelpConfiguration};

use super::Cog;
use crate::Context;

pub fn cog() -> Cog {
    Cog::new(vec![help()], "Meta".to_string())
}

/// Get help on the bot or a command
#[poise::command(prefix_command, slash_command)]
async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help about"]
    #[autocomplete = "autocomplete_command"]
    command: Option<String>,
) -> anyhow::Result<()> {
    let config = HelpConfiguration::default();
    builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}
