//! Client for the Yandex.Translate v1.5 JSON API.
//!
//! The service reports its outcome through a numeric `code` field inside
//! the JSON body rather than the HTTP status line. `parse_payload` keeps
//! the whole code-to-error mapping in one place so callers can match on
//! [`TranslateError`] without knowing the wire format.

use serde::Deserialize;
use thiserror::Error;

const ENDPOINT: &str = "https://translate.yandex.net/api/v1.5/tr.json/translate";

/// Payload code the service uses for a successful translation.
const CODE_OK: u16 = 200;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("the language pair is not supported or malformed")]
    IncorrectLanguage,
    #[error("the text exceeds the maximum supported length")]
    TextTooLong,
    #[error("the API key is blocked")]
    KeyBlocked,
    #[error("the daily request limit has been exceeded")]
    DailyLimitExceeded,
    #[error("the text could not be translated")]
    UnableToTranslate,
    #[error("unexpected reply from the translation service: {0}")]
    Unexpected(String),
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A successful translation: the resolved language (or pair) and the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub lang: String,
    pub text: String,
}

#[derive(Deserialize)]
struct Payload {
    code: u16,
    lang: Option<String>,
    text: Option<Vec<String>>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct YandexTranslator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl YandexTranslator {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Performs one translation request.
    ///
    /// `direction` is either a bare target language code (`"ru"`) or a
    /// source-target pair (`"en-ru"`); it is passed to the service as-is,
    /// which also decides whether it is acceptable. The request is not
    /// retried; transport failures surface as [`TranslateError::Http`].
    pub async fn translate(
        &self,
        direction: &str,
        text: &str,
    ) -> Result<Translation, TranslateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("lang", direction),
                ("text", text),
            ])
            .send()
            .await?;
        let body = response.bytes().await?;
        parse_payload(&body)
    }
}

impl std::fmt::Debug for YandexTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexTranslator")
            .field("api_key", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Maps a documented non-success payload code to its error.
fn error_for_code(code: u16) -> Option<TranslateError> {
    Some(match code {
        402 => TranslateError::KeyBlocked,
        404 => TranslateError::DailyLimitExceeded,
        413 => TranslateError::TextTooLong,
        422 => TranslateError::UnableToTranslate,
        501 => TranslateError::IncorrectLanguage,
        _ => return None,
    })
}

/// Classifies one response body into a translation or an error.
fn parse_payload(body: &[u8]) -> Result<Translation, TranslateError> {
    let payload: Payload = serde_json::from_slice(body)
        .map_err(|e| TranslateError::Unexpected(format!("malformed response body: {e}")))?;

    if payload.code != CODE_OK {
        return Err(error_for_code(payload.code).unwrap_or_else(|| {
            let detail = payload
                .message
                .map(|message| format!(": {message}"))
                .unwrap_or_default();
            TranslateError::Unexpected(format!("status code {}{detail}", payload.code))
        }));
    }

    let lang = payload.lang.ok_or_else(|| {
        TranslateError::Unexpected("response is missing the resolved language".into())
    })?;
    let text = payload
        .text
        .and_then(|mut lines| {
            if lines.is_empty() {
                None
            } else {
                Some(lines.remove(0))
            }
        })
        .ok_or_else(|| {
            TranslateError::Unexpected("response is missing the translated text".into())
        })?;

    Ok(Translation { lang, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::discriminant;

    fn payload(code: u16) -> Vec<u8> {
        format!(r#"{{"code":{code}}}"#).into_bytes()
    }

    #[test]
    fn documented_error_codes_map_to_their_variant() {
        let table = [
            (402, TranslateError::KeyBlocked),
            (404, TranslateError::DailyLimitExceeded),
            (413, TranslateError::TextTooLong),
            (422, TranslateError::UnableToTranslate),
            (501, TranslateError::IncorrectLanguage),
        ];
        for (code, expected) in table {
            let err = parse_payload(&payload(code)).unwrap_err();
            assert_eq!(discriminant(&err), discriminant(&expected), "code {code}");
        }
    }

    #[test]
    fn success_payload_is_extracted() {
        let body = br#"{"code":200,"lang":"en","text":["hello"]}"#;
        let translation = parse_payload(body).unwrap();
        assert_eq!(
            translation,
            Translation {
                lang: "en".into(),
                text: "hello".into(),
            }
        );
    }

    #[test]
    fn undocumented_code_is_unexpected() {
        let err = parse_payload(&payload(418)).unwrap_err();
        assert!(matches!(err, TranslateError::Unexpected(_)));
    }

    #[test]
    fn undocumented_code_keeps_the_service_message() {
        let body = br#"{"code":401,"message":"API key is invalid"}"#;
        match parse_payload(body).unwrap_err() {
            TranslateError::Unexpected(detail) => {
                assert!(detail.contains("401"));
                assert!(detail.contains("API key is invalid"));
            }
            other => panic!("expected Unexpected, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_unexpected() {
        let err = parse_payload(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, TranslateError::Unexpected(_)));
    }

    #[test]
    fn success_without_text_is_unexpected() {
        let err = parse_payload(br#"{"code":200,"lang":"en"}"#).unwrap_err();
        assert!(matches!(err, TranslateError::Unexpected(_)));

        let err = parse_payload(br#"{"code":200,"lang":"en","text":[]}"#).unwrap_err();
        assert!(matches!(err, TranslateError::Unexpected(_)));
    }

    #[test]
    fn success_without_lang_is_unexpected() {
        let err = parse_payload(br#"{"code":200,"text":["hello"]}"#).unwrap_err();
        assert!(matches!(err, TranslateError::Unexpected(_)));
    }

    #[test]
    fn debug_output_masks_the_key() {
        let translator = YandexTranslator::new(reqwest::Client::new(), "trnsl.1.1.secret".into());
        let debug = format!("{translator:?}");
        assert!(debug.contains("***"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn translator_is_shareable_between_tasks() {
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<YandexTranslator>();
    }
}
