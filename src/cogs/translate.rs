use poise::{serenity_prelude as serenity, CreateReply};

use super::Cog;
use crate::yandex::TranslateError;
use crate::{util, Context, Result};

pub fn cog() -> Cog {
    Cog::new(vec![translate(), tts(), apikey()], "Translation".to_string())
}

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
const TTS_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const TTS_TEXT_LIMIT: usize = 200;

/// Translate text via Yandex.Translate
///
/// Language may be just "ru" (target language to translate) \
/// or "en-ru" (original text's language - target language)
#[poise::command(
    prefix_command,
    slash_command,
    aliases("ytranslate"),
    required_bot_permissions = "EMBED_LINKS"
)]
async fn translate(
    ctx: Context<'_>,
    #[description = "Target language or source-target pair"] language: String,
    #[description = "Text to translate"]
    #[rest]
    text: String,
) -> Result<()> {
    let Some(translator) = ctx.data().translator.as_ref() else {
        ctx.say(
            "No Yandex.Translate API key is configured. \
             The bot owner can use the `apikey` command for instructions.",
        )
        .await?;
        return Ok(());
    };

    let text = util::escape_markdown(&text);
    match translator.translate(&language, &text).await {
        Ok(translation) => {
            let embed = serenity::CreateEmbed::new()
                .description(format!(
                    "**[{}]**{}",
                    translation.lang.to_uppercase(),
                    util::code_block(&translation.text)
                ))
                .color(ctx.data().config.default_embed_color)
                .author(
                    serenity::CreateEmbedAuthor::new("Translated via Yandex.Translate")
                        .url("https://translate.yandex.com")
                        .icon_url("https://translate.yandex.ru/icons/favicon.png"),
                );
            ctx.send(CreateReply::default().embed(embed)).await?;
        }
        Err(TranslateError::IncorrectLanguage) => {
            ctx.say(format!(
                "An error has occurred: language `{language}` is not supported \
                 or incorrect, check your formatting and try again"
            ))
            .await?;
        }
        Err(TranslateError::TextTooLong) => {
            ctx.say("An error has occurred: the text you provided is too big to translate")
                .await?;
        }
        Err(TranslateError::KeyBlocked) => {
            ctx.say(
                "The API key is blocked. The bot owner needs to get a new key \
                 or unblock the current one.",
            )
            .await?;
        }
        Err(TranslateError::DailyLimitExceeded) => {
            ctx.say("The daily request limit has been reached. Try again later.")
                .await?;
        }
        Err(TranslateError::UnableToTranslate) => {
            ctx.say("An error has occurred: Yandex.Translate is unable to translate your text")
                .await?;
        }
        Err(e @ (TranslateError::Unexpected(_) | TranslateError::Http(_))) => {
            ctx.say(format!("An error has occurred: {e}")).await?;
        }
    }
    Ok(())
}

/// Say something via Google Translate text-to-speech
///
/// Text longer than 200 symbols is cut off
#[poise::command(
    prefix_command,
    slash_command,
    aliases("googlesay"),
    required_bot_permissions = "ATTACH_FILES"
)]
async fn tts(
    ctx: Context<'_>,
    #[description = "Language to speak in"] language: String,
    #[description = "Text to say"]
    #[rest]
    text: String,
) -> Result<()> {
    let text: String = text.chars().take(TTS_TEXT_LIMIT).collect();
    ctx.defer().await?;

    let fetched = async {
        let response = ctx
            .data()
            .http
            .get(TTS_ENDPOINT)
            .query(&[
                ("ie", "utf-8"),
                ("client", "tw-ob"),
                ("tl", language.as_str()),
                ("q", text.as_str()),
            ])
            .header(reqwest::header::USER_AGENT, TTS_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;
        response.bytes().await
    }
    .await;

    let speech = match fetched {
        Ok(bytes) => bytes,
        Err(e) => {
            ctx.say(format!("Unable to get data from Google Translate TTS: {e}"))
                .await?;
            return Ok(());
        }
    };

    let filename = format!("{}.mp3", text.chars().take(32).collect::<String>());
    let attachment = serenity::CreateAttachment::bytes(speech.to_vec(), filename);
    ctx.send(CreateReply::default().attachment(attachment))
        .await?;
    Ok(())
}

/// Instructions for setting up a Yandex.Translate API key
#[poise::command(prefix_command, owners_only, aliases("ytapikey"))]
async fn apikey(ctx: Context<'_>) -> Result<()> {
    ctx.say(
        "To get a Yandex.Translate API key:\n\
         1. Log in to your Yandex account\n\
         2. Visit the <https://translate.yandex.ru/developers/keys> page\n\
         3. Press `Create a new key`\n\
         4. Enter a description for the key\n\
         5. Copy the `trnsl.*` key\n\
         6. Put `YANDEX_API_KEY=<your_apikey>` into the bot's `.env` and restart it",
    )
    .await?;
    Ok(())
}
