use std::time::Duration;

use crate::config::Config;
use crate::yandex::YandexTranslator;
use crate::Result;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// Shared state
pub struct Data {
    pub config: Config,
    pub http: reqwest::Client,
    pub translator: Option<YandexTranslator>,
}

impl Data {
    pub fn from_config(config: Config) -> Result<Self> {
        // One session for everything that leaves through plain HTTP:
        // the translator, TTS fetches and emoji uploads.
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let translator = config
            .secrets
            .yandex_api_key
            .clone()
            .map(|key| YandexTranslator::new(http.clone(), key));

        Ok(Self {
            config,
            http,
            translator,
        })
    }
}
