use poise::serenity_prelude::{self as serenity, Mentionable};
use poise::CreateReply;

use super::Cog;
use crate::{util, Context, Result};

pub fn cog() -> Cog {
    Cog::new(
        vec![
            userinfo(),
            memberinfo(),
            serverinfo(),
            bans(),
            invites(),
            channelinfo(),
            channels(),
            roleinfo(),
            roles(),
            rolemembers(),
            chanperms(),
            emojiinfo(),
        ],
        "Data".to_string(),
    )
}

/// Renders a timestamp the way Discord clients display full dates.
fn long_time(ts: serenity::Timestamp) -> String {
    serenity::FormattedTimestamp::new(
        ts,
        Some(serenity::FormattedTimestampStyle::LongDateTime),
    )
    .to_string()
}

fn embed_color(ctx: Context<'_>) -> serenity::Color {
    ctx.data().config.default_embed_color
}

/// Look up any Discord user by their ID
#[poise::command(prefix_command, slash_command, required_bot_permissions = "EMBED_LINKS")]
async fn userinfo(ctx: Context<'_>, #[description = "User ID"] user_id: u64) -> Result<()> {
    if user_id == 0 {
        ctx.say("That is not a valid user ID.").await?;
        return Ok(());
    }
    let user = match ctx.http().get_user(serenity::UserId::new(user_id)).await {
        Ok(user) => user,
        Err(serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)))
            if response.status_code.as_u16() == 404 =>
        {
            ctx.say(format!("Discord user with ID `{user_id}` not found"))
                .await?;
            return Ok(());
        }
        Err(_) => {
            ctx.say(format!(
                "Unable to get data about the user with ID `{user_id}`. Try again later."
            ))
            .await?;
            return Ok(());
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(util::escape_markdown(&user.tag()))
        .color(embed_color(ctx))
        .timestamp(user.created_at())
        .field("ID", user.id.to_string(), true)
        .field("Bot?", util::bool_emoji(user.bot), true)
        .field("Mention", user.mention().to_string(), true)
        .field("Default avatar", user.default_avatar_url(), true)
        .thumbnail(user.default_avatar_url())
        .footer(serenity::CreateEmbedFooter::new("Created at"));
    if let Some(avatar) = user.avatar_url() {
        embed = embed.field("Avatar", avatar.clone(), true).image(avatar);
    }
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show information about a server member
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("uinfo"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn memberinfo(
    ctx: Context<'_>,
    #[description = "Member to inspect"] member: Option<serenity::Member>,
) -> Result<()> {
    let member = match member {
        Some(member) => member,
        None => match ctx.author_member().await {
            Some(member) => member.into_owned(),
            None => {
                ctx.say("Could not resolve you as a member of this server.")
                    .await?;
                return Ok(());
            }
        },
    };

    let role_names: Vec<String> = ctx
        .guild()
        .map(|guild| {
            member
                .roles
                .iter()
                .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    // highest colored role wins, like the member list sidebar
    let color = ctx
        .guild()
        .and_then(|guild| {
            let mut colored: Vec<_> = member
                .roles
                .iter()
                .filter_map(|id| guild.roles.get(id))
                .filter(|role| role.colour.0 != 0)
                .map(|role| (role.position, role.colour))
                .collect();
            colored.sort_by_key(|(position, _)| *position);
            colored.last().map(|(_, colour)| *colour)
        })
        .unwrap_or_else(|| embed_color(ctx));

    let mut embed = serenity::CreateEmbed::new()
        .title(util::escape_markdown(member.display_name()))
        .color(color)
        .field("Name", member.user.name.clone(), true)
        .field("ID", member.user.id.to_string(), true)
        .field("Bot?", util::bool_emoji(member.user.bot), true)
        .field("Has existed since", long_time(member.user.created_at()), true);
    if let Some(joined) = member.joined_at {
        embed = embed.field("Joined server", long_time(joined), true);
    }
    let embed = embed
        .field(
            "Mention",
            format!("{}\n`{}`", member.mention(), member.mention()),
            true,
        )
        .field(
            "Roles",
            if role_names.is_empty() {
                "❌".to_string()
            } else {
                util::truncate(&role_names.join("\n"), 1024)
            },
            false,
        )
        .image(member.face());
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show information about this server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("sinfo"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn serverinfo(ctx: Context<'_>) -> Result<()> {
    let Some(guild) = ctx.guild().map(|guild| guild.clone()) else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };

    let owner = match guild.owner_id.to_user(ctx).await {
        Ok(user) => user.tag(),
        Err(_) => guild.owner_id.to_string(),
    };

    let verification = match guild.verification_level {
        serenity::VerificationLevel::None => "None",
        serenity::VerificationLevel::Low => "Low",
        serenity::VerificationLevel::Medium => "Medium",
        serenity::VerificationLevel::High => "(╯°□°）╯︵ ┻━┻",
        serenity::VerificationLevel::Higher => "┻━┻ ﾐヽ(ಠ益ಠ)ノ彡┻━┻",
        _ => "Unknown",
    };
    let content_filter = match guild.explicit_content_filter {
        serenity::ExplicitContentFilter::None => "Don't scan any messages.",
        serenity::ExplicitContentFilter::WithoutRole => {
            "Scan messages from members without a role."
        }
        serenity::ExplicitContentFilter::All => "Scan messages sent by all members.",
        _ => "Unknown",
    };
    let notifications = match guild.default_message_notifications {
        serenity::DefaultMessageNotificationLevel::All => "All messages",
        serenity::DefaultMessageNotificationLevel::Mentions => "Only @mentions",
        _ => "Unknown",
    };
    let boost = match guild.premium_tier {
        serenity::PremiumTier::Tier0 => "None",
        serenity::PremiumTier::Tier1 => "Level 1",
        serenity::PremiumTier::Tier2 => "Level 2",
        serenity::PremiumTier::Tier3 => "Level 3",
        _ => "Unknown",
    };

    let text_channels = guild
        .channels
        .values()
        .filter(|c| c.kind == serenity::ChannelType::Text)
        .count();
    let voice_channels = guild
        .channels
        .values()
        .filter(|c| c.kind == serenity::ChannelType::Voice)
        .count();

    let has_feature = |feature: &str| guild.features.iter().any(|f| f == feature);

    let mut embed = serenity::CreateEmbed::new()
        .title("Server info")
        .color(embed_color(ctx))
        .field("Name", util::escape_markdown(&guild.name), true)
        .field("Server ID", guild.id.to_string(), true)
        .field("Existed since", long_time(guild.id.created_at()), true)
        .field("Owner", util::escape_markdown(&owner), true)
        .field(
            "AFK channel",
            guild
                .afk_metadata
                .as_ref()
                .map(|afk| afk.afk_channel_id.mention().to_string())
                .unwrap_or_else(|| "❌".to_string()),
            true,
        )
        .field(
            "New member messages channel",
            guild
                .system_channel_id
                .map(|id| id.mention().to_string())
                .unwrap_or_else(|| "❌".to_string()),
            true,
        )
        .field("Verification level", verification, true)
        .field("Explicit content filter", content_filter, true)
        .field("Default notifications", notifications, true)
        .field(
            "2FA admins",
            util::bool_emoji(guild.mfa_level == serenity::MfaLevel::Elevated),
            true,
        )
        .field("Member count", guild.member_count.to_string(), true)
        .field("Role count", guild.roles.len().to_string(), true)
        .field("Channel count", guild.channels.len().to_string(), true)
        .field(
            "Text / voice channels",
            format!("{text_channels} / {voice_channels}"),
            true,
        )
        .field("Boost level", boost, true)
        .field("Vanity URL", util::bool_emoji(has_feature("VANITY_URL")), true)
        .field("Verified", util::bool_emoji(has_feature("VERIFIED")), true);
    match guild.splash_url() {
        Some(splash) => {
            embed = embed.field("Invite splash", format!("✅ [🔗]({splash})"), true);
        }
        None => {
            embed = embed.field("Invite splash", "❌", true);
        }
    }
    if let Some(icon) = guild.icon_url() {
        embed = embed.image(icon);
    }
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// List bans on this server
#[poise::command(
    prefix_command,
    guild_only,
    owners_only,
    required_bot_permissions = "BAN_MEMBERS"
)]
async fn bans(ctx: Context<'_>) -> Result<()> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };
    let bans = guild_id.bans(ctx.http(), None, None).await?;
    if bans.is_empty() {
        ctx.say("The ban list is empty!").await?;
        return Ok(());
    }
    let list = bans
        .iter()
        .map(|ban| format!("{} ({})", ban.user.tag(), ban.user.id))
        .collect::<Vec<_>>()
        .join("\n");
    for page in util::chunk_lines(&list, util::PAGE_LIMIT) {
        ctx.say(util::code_block(&page)).await?;
    }
    Ok(())
}

/// List invites on this server
#[poise::command(
    prefix_command,
    guild_only,
    owners_only,
    required_bot_permissions = "MANAGE_GUILD"
)]
async fn invites(ctx: Context<'_>) -> Result<()> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };
    let invites = guild_id.invites(ctx.http()).await?;
    if invites.is_empty() {
        ctx.say("There are no invites for this server").await?;
        return Ok(());
    }
    let list = invites
        .iter()
        .map(|invite| {
            format!(
                "https://discord.gg/{} ({}, {} uses)",
                invite.code, invite.channel.name, invite.uses
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    for page in util::chunk_lines(&list, util::PAGE_LIMIT) {
        ctx.say(page).await?;
    }
    Ok(())
}

/// Show information about a channel
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("cinfo"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn channelinfo(
    ctx: Context<'_>,
    #[description = "Channel to inspect"] channel: Option<serenity::GuildChannel>,
) -> Result<()> {
    let channel = match channel {
        Some(channel) => channel,
        None => match ctx.guild_channel().await {
            Some(channel) => channel,
            None => {
                ctx.say("This command only works inside a server channel.")
                    .await?;
                return Ok(());
            }
        },
    };

    let kind = match channel.kind {
        serenity::ChannelType::Text | serenity::ChannelType::News => "💬",
        serenity::ChannelType::Voice | serenity::ChannelType::Stage => "🔈",
        serenity::ChannelType::Category => "📑",
        _ => "❔",
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(util::escape_markdown(&channel.name))
        .color(embed_color(ctx))
        .field("ID", channel.id.to_string(), true)
        .field("Type", kind, true)
        .field("Has existed since", long_time(channel.id.created_at()), true)
        .field(
            "Category",
            channel
                .parent_id
                .map(|id| id.mention().to_string())
                .unwrap_or_else(|| "`Not in category`".to_string()),
            true,
        )
        .field("Position", channel.position.to_string(), true)
        .field(
            "Mention",
            format!("{}\n`{}`", channel.mention(), channel.mention()),
            true,
        )
        .field("NSFW", util::bool_emoji(channel.nsfw), true);
    if let Some(topic) = channel.topic.as_deref().filter(|topic| !topic.is_empty()) {
        embed = embed.description(util::truncate(topic, 2048));
    }
    if let Some(delay) = channel.rate_limit_per_user.filter(|delay| *delay > 0) {
        embed = embed.field("Slowmode delay", format!("{delay} seconds"), true);
    }
    if let Some(bitrate) = channel.bitrate {
        embed = embed.field("Bitrate", format!("{}kbps", bitrate / 1000), true);
    }
    if let Some(limit) = channel.user_limit {
        embed = embed.field("User limit", limit.to_string(), true);
    }
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// List all channels on this server
#[poise::command(
    prefix_command,
    guild_only,
    owners_only,
    aliases("channellist", "listchannels"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn channels(ctx: Context<'_>) -> Result<()> {
    let Some(guild) = ctx.guild().map(|guild| guild.clone()) else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };

    let mut categories = Vec::new();
    let mut text_channels = Vec::new();
    let mut voice_channels = Vec::new();
    for channel in guild.channels.values() {
        let name = util::escape_markdown(&channel.name);
        match channel.kind {
            serenity::ChannelType::Category => categories.push(name),
            serenity::ChannelType::Voice | serenity::ChannelType::Stage => {
                voice_channels.push(name)
            }
            _ => text_channels.push(name),
        }
    }
    categories.sort();
    text_channels.sort();
    voice_channels.sort();

    let join_or = |list: Vec<String>, fallback: &str| {
        if list.is_empty() {
            fallback.to_string()
        } else {
            util::truncate(&list.join("\n"), 1024)
        }
    };

    let embed = serenity::CreateEmbed::new()
        .title("Channels list")
        .color(embed_color(ctx))
        .field("Categories:", join_or(categories.clone(), "No categories"), false)
        .field(
            "Text channels:",
            join_or(text_channels.clone(), "No text channels"),
            false,
        )
        .field(
            "Voice channels:",
            join_or(voice_channels.clone(), "No voice channels"),
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Total channels: {} • Categories: {} • Text: {} • Voice: {}",
            guild.channels.len(),
            categories.len(),
            text_channels.len(),
            voice_channels.len(),
        )));
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show information about a role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("rinfo"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn roleinfo(
    ctx: Context<'_>,
    #[description = "Role to inspect"] role: serenity::Role,
) -> Result<()> {
    let members_with_role = ctx
        .guild()
        .map(|guild| {
            guild
                .members
                .values()
                .filter(|member| member.roles.contains(&role.id))
                .count()
        })
        .unwrap_or_default();

    let color = if role.colour.0 == 0 {
        embed_color(ctx)
    } else {
        role.colour
    };

    let embed = serenity::CreateEmbed::new()
        .title(util::escape_markdown(&role.name))
        .color(color)
        .field("ID", role.id.to_string(), true)
        .field(
            "Perms",
            format!(
                "[{0}](https://discordapi.com/permissions.html#{0})",
                role.permissions.bits()
            ),
            true,
        )
        .field("Has existed since", long_time(role.id.created_at()), true)
        .field("Hoist", util::bool_emoji(role.hoist), true)
        .field("Members", members_with_role.to_string(), true)
        .field("Position", role.position.to_string(), true)
        .field("Color", format!("#{}", role.colour.hex()), true)
        .field("Managed", util::bool_emoji(role.managed), true)
        .field("Mentionable", util::bool_emoji(role.mentionable), true)
        .field(
            "Mention",
            format!("{}\n`{}`", role.mention(), role.mention()),
            true,
        );
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// List all roles on this server
#[poise::command(
    prefix_command,
    guild_only,
    owners_only,
    aliases("listroles", "rolelist")
)]
async fn roles(ctx: Context<'_>) -> Result<()> {
    let Some(mut roles) = ctx.guild().map(|guild| {
        guild
            .roles
            .values()
            .map(|role| (role.position, role.name.clone(), role.id))
            .collect::<Vec<_>>()
    }) else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };
    roles.sort_by(|a, b| b.0.cmp(&a.0));

    let list = roles
        .iter()
        .map(|(_, name, id)| format!("{:<32} {id}", util::truncate(name, 32)))
        .collect::<Vec<_>>()
        .join("\n");
    for page in util::chunk_lines(&list, util::PAGE_LIMIT) {
        ctx.say(util::code_block(&page)).await?;
    }
    Ok(())
}

/// List members that have the given role
#[poise::command(prefix_command, slash_command, guild_only)]
async fn rolemembers(
    ctx: Context<'_>,
    #[description = "Role to look up"] role: serenity::Role,
) -> Result<()> {
    let Some(mut members) = ctx.guild().map(|guild| {
        guild
            .members
            .values()
            .filter(|member| member.roles.contains(&role.id))
            .map(|member| (member.joined_at, member.user.tag()))
            .collect::<Vec<_>>()
    }) else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };

    if members.is_empty() {
        ctx.say("Nobody has that role.").await?;
        return Ok(());
    }
    members.sort_by_key(|(joined, _)| *joined);

    let list = members
        .iter()
        .map(|(_, tag)| tag.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    for page in util::chunk_lines(&list, util::PAGE_LIMIT) {
        ctx.say(util::code_block(&page)).await?;
    }
    Ok(())
}

/// Check a member's permissions in a channel
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("cperms"),
    required_permissions = "ADMINISTRATOR"
)]
async fn chanperms(
    ctx: Context<'_>,
    #[description = "Member to check"] member: serenity::Member,
    #[description = "Channel to check in"] channel: Option<serenity::GuildChannel>,
) -> Result<()> {
    let channel = match channel {
        Some(channel) => channel,
        None => match ctx.guild_channel().await {
            Some(channel) => channel,
            None => {
                ctx.say("This command only works inside a server channel.")
                    .await?;
                return Ok(());
            }
        },
    };

    let Some(perms) = ctx
        .guild()
        .map(|guild| guild.user_permissions_in(&channel, &member))
    else {
        ctx.say("This command only works inside a server.").await?;
        return Ok(());
    };

    let names = perms
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join("\n");
    ctx.say(format!(
        "`{}`\n{}",
        perms.bits(),
        util::code_block(&names)
    ))
    .await?;
    Ok(())
}

/// Show information about an emoji
#[poise::command(
    prefix_command,
    guild_only,
    aliases("einfo"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn emojiinfo(
    ctx: Context<'_>,
    #[description = "Emoji to inspect"] emoji: serenity::Emoji,
) -> Result<()> {
    let role_names: Vec<String> = ctx
        .guild()
        .map(|guild| {
            emoji
                .roles
                .iter()
                .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    let mut embed = serenity::CreateEmbed::new()
        .title(util::escape_markdown(&emoji.name))
        .color(embed_color(ctx))
        .field("ID", emoji.id.to_string(), true)
        .field("Animated", util::bool_emoji(emoji.animated), true)
        .field("Has existed since", long_time(emoji.id.created_at()), true)
        .field("\":\" required", util::bool_emoji(emoji.require_colons), true)
        .field("Managed", util::bool_emoji(emoji.managed), true)
        .field("Available", util::bool_emoji(emoji.available), true)
        .image(emoji.url());
    if !role_names.is_empty() {
        embed = embed.field("Roles", util::truncate(&role_names.join("\n"), 1024), true);
    }
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
