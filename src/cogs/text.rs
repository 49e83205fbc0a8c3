use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::Cog;
use crate::{transforms, util, Context, Result};

pub fn cog() -> Cog {
    Cog::new(
        vec![
            eciho(),
            fliptext(),
            fullwidth(),
            leet(),
            base64(),
            emojify(),
            urlencode(),
        ],
        "Text".to_string(),
    )
}

/// Translate text (cyrillic/latin) to "eciho"
#[poise::command(prefix_command, slash_command)]
async fn eciho(
    ctx: Context<'_>,
    #[description = "Text to convert"]
    #[rest]
    text: String,
) -> Result<()> {
    ctx.say(transforms::eciho(&text)).await?;
    Ok(())
}

/// Flip text upside-down
#[poise::command(prefix_command, slash_command)]
async fn fliptext(
    ctx: Context<'_>,
    #[description = "Text to flip"]
    #[rest]
    text: String,
) -> Result<()> {
    ctx.say(transforms::flip(&text)).await?;
    Ok(())
}

/// Switch text to Ｆｕｌｌ－ｗｉｄｔｈ characters
#[poise::command(prefix_command, slash_command)]
async fn fullwidth(
    ctx: Context<'_>,
    #[description = "Text to widen"]
    #[rest]
    text: String,
) -> Result<()> {
    ctx.say(transforms::fullwidth(&text)).await?;
    Ok(())
}

/// Leet (1337) translation commands
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("leet_latin", "leet_cyrillic"),
    subcommand_required
)]
async fn leet(_ctx: Context<'_>) -> Result<()> {
    Ok(())
}

/// Translate text to 1337
#[poise::command(prefix_command, slash_command, rename = "leet", aliases("1337"))]
async fn leet_latin(
    ctx: Context<'_>,
    #[description = "Text to translate"]
    #[rest]
    text: String,
) -> Result<()> {
    let result = transforms::leet(&text, &mut rand::thread_rng());
    ctx.say(util::code_block(&result)).await?;
    Ok(())
}

/// Translate cyrillic text to 1337
#[poise::command(
    prefix_command,
    slash_command,
    rename = "cs",
    aliases("russian", "cyrillic")
)]
async fn leet_cyrillic(
    ctx: Context<'_>,
    #[description = "Text to translate"]
    #[rest]
    text: String,
) -> Result<()> {
    let result = transforms::leet_cyrillic(&text, &mut rand::thread_rng());
    ctx.say(util::code_block(&result)).await?;
    Ok(())
}

/// Base64 text converter
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("encode", "decode"),
    subcommand_required
)]
async fn base64(_ctx: Context<'_>) -> Result<()> {
    Ok(())
}

/// Encode text to base64
#[poise::command(prefix_command, slash_command)]
async fn encode(
    ctx: Context<'_>,
    #[description = "Text to encode"]
    #[rest]
    text: String,
) -> Result<()> {
    let encoded = BASE64.encode(text.as_bytes());
    for page in util::chunk_lines(&encoded, util::PAGE_LIMIT) {
        ctx.say(util::code_block(&page)).await?;
    }
    Ok(())
}

/// Decode text from base64
#[poise::command(prefix_command, slash_command)]
async fn decode(
    ctx: Context<'_>,
    #[description = "Base64 to decode"]
    #[rest]
    encoded: String,
) -> Result<()> {
    let decoded = match BASE64
        .decode(encoded.trim().as_bytes())
        .map(String::from_utf8)
    {
        Ok(Ok(text)) => text,
        _ => {
            ctx.say("That does not look like valid base64 text.").await?;
            return Ok(());
        }
    };
    ctx.say(util::code_block(&decoded)).await?;
    Ok(())
}

/// Spell text out with emoji
#[poise::command(prefix_command, slash_command)]
async fn emojify(
    ctx: Context<'_>,
    #[description = "Text to emojify"]
    #[rest]
    message: String,
) -> Result<()> {
    ctx.say(transforms::emojify(&message)).await?;
    Ok(())
}

/// Encode text to a URL-safe format ('abc def' -> 'abc%20def')
#[poise::command(prefix_command, slash_command, aliases("url"))]
async fn urlencode(
    ctx: Context<'_>,
    #[description = "Text to encode"]
    #[rest]
    text: String,
) -> Result<()> {
    ctx.say(util::code_block(&urlencoding::encode(&text)))
        .await?;
    Ok(())
}
