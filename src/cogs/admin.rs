use std::time::Duration;

use poise::serenity_prelude as serenity;

use super::Cog;
use crate::{Context, Result};

pub fn cog() -> Cog {
    Cog::new(
        vec![prune(), massnick(), resetnicks(), emoji()],
        "Admin".to_string(),
    )
}

const MAX_PRUNE_DAYS: u8 = 30;
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

fn guild_id(ctx: Context<'_>) -> Result<serenity::GuildId> {
    ctx.guild_id()
        .ok_or_else(|| anyhow::anyhow!("guild-only command invoked outside a guild"))
}

/// Kick members that have been inactive for the given number of days
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
async fn prune(
    ctx: Context<'_>,
    #[description = "Days of inactivity"] days: Option<u8>,
) -> Result<()> {
    let guild_id = guild_id(ctx)?;
    let days = match days.unwrap_or(1) {
        0 => {
            ctx.say("The day count cannot be less than 1, using 1 instead.")
                .await?;
            1
        }
        d if d > MAX_PRUNE_DAYS => {
            ctx.say(format!(
                "Discord does not allow more than {MAX_PRUNE_DAYS} days here, \
                 using {MAX_PRUNE_DAYS} instead."
            ))
            .await?;
            MAX_PRUNE_DAYS
        }
        d => d,
    };

    let estimate = guild_id.prune_count(ctx.http(), days).await?.pruned;
    ctx.say(format!(
        "You are about to kick **{estimate}** members that have been inactive \
         for **{days}** days. Are you sure?\nTo agree, type \"yes\""
    ))
    .await?;

    let confirmation = serenity::MessageCollector::new(ctx.serenity_context().shard.clone())
        .channel_id(ctx.channel_id())
        .author_id(ctx.author().id)
        .timeout(CONFIRM_TIMEOUT)
        .await;

    match confirmation {
        Some(reply) if reply.content.eq_ignore_ascii_case("yes") => {
            let pruned = guild_id.start_prune(ctx.http(), days).await?.pruned;
            ctx.say(format!(
                "**{pruned}**/**{estimate}** inactive members removed.\n\
                 (They were inactive for **{days}** days)"
            ))
            .await?;
        }
        _ => {
            ctx.say("Inactive member cleanup cancelled.").await?;
        }
    }
    Ok(())
}

/// Set everyone's nickname on this server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    guild_cooldown = 60,
    required_permissions = "MANAGE_NICKNAMES",
    required_bot_permissions = "MANAGE_NICKNAMES"
)]
async fn massnick(
    ctx: Context<'_>,
    #[description = "Nickname to apply"] nickname: String,
) -> Result<()> {
    let guild_id = guild_id(ctx)?;
    ctx.defer().await?;

    let members = guild_id
        .members(ctx.http(), None, None::<serenity::UserId>)
        .await?;
    let mut failed = 0usize;
    for mut member in members {
        let edit = serenity::EditMember::new().nickname(nickname.as_str());
        if member.edit(ctx, edit).await.is_err() {
            failed += 1;
        }
    }
    ctx.say(format!(
        "Finished nicknaming the server. {failed} nicknames could not be changed."
    ))
    .await?;
    Ok(())
}

/// Remove every nickname on this server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    guild_cooldown = 60,
    required_permissions = "MANAGE_NICKNAMES",
    required_bot_permissions = "MANAGE_NICKNAMES"
)]
async fn resetnicks(ctx: Context<'_>) -> Result<()> {
    let guild_id = guild_id(ctx)?;
    ctx.defer().await?;

    let members = guild_id
        .members(ctx.http(), None, None::<serenity::UserId>)
        .await?;
    for mut member in members {
        // an empty nickname clears it
        let edit = serenity::EditMember::new().nickname(String::new());
        let _ = member.edit(ctx, edit).await;
    }
    ctx.say("Finished resetting server nicknames").await?;
    Ok(())
}

/// Manage server emoji
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    subcommands("add", "rename", "remove"),
    subcommand_required,
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS"
)]
async fn emoji(_ctx: Context<'_>) -> Result<()> {
    Ok(())
}

/// Create a custom emoji from an image URL
#[poise::command(prefix_command, slash_command)]
async fn add(
    ctx: Context<'_>,
    #[description = "Name for the emoji"] name: String,
    #[description = "Image URL"] url: String,
) -> Result<()> {
    let guild_id = guild_id(ctx)?;

    let fetched = async {
        let response = ctx.data().http.get(&url).send().await?.error_for_status()?;
        response.bytes().await
    }
    .await;
    let image = match fetched {
        Ok(bytes) => bytes,
        Err(e) => {
            ctx.say(format!("Unable to get an emoji from the provided URL: {e}"))
                .await?;
            return Ok(());
        }
    };

    let encoded = serenity::CreateAttachment::bytes(image.to_vec(), "emoji").to_base64();
    match guild_id.create_emoji(ctx.http(), &name, &encoded).await {
        Ok(emoji) => {
            ctx.say(format!("✅ Created {emoji}")).await?;
        }
        Err(e) => {
            ctx.say(format!("An error occurred while adding the emoji: {e}"))
                .await?;
        }
    }
    Ok(())
}

/// Rename an emoji
#[poise::command(prefix_command)]
async fn rename(
    ctx: Context<'_>,
    #[description = "Emoji to rename"] emoji: serenity::Emoji,
    #[description = "New name"] name: String,
) -> Result<()> {
    let guild_id = guild_id(ctx)?;
    let renamed = guild_id.edit_emoji(ctx.http(), emoji.id, &name).await?;
    ctx.say(format!("✅ Renamed {renamed}")).await?;
    Ok(())
}

/// Delete an emoji from this server
#[poise::command(prefix_command)]
async fn remove(
    ctx: Context<'_>,
    #[description = "Emoji to delete"] emoji: serenity::Emoji,
) -> Result<()> {
    let guild_id = guild_id(ctx)?;
    guild_id.delete_emoji(ctx.http(), emoji.id).await?;
    ctx.say(format!("✅ Deleted `{}`", emoji.name)).await?;
    Ok(())
}
