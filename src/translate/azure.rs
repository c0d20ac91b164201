use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::TranslatorConfig;
use crate::error::{BisubError, Result};
use super::Translator;

#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequestItem {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResponseItem {
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    pub text: String,
}

/// Microsoft Translator v3 client. Stateless: every call is one independent
/// POST with a fresh trace id.
pub struct AzureTranslator {
    client: Client,
    config: TranslatorConfig,
}

impl AzureTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BisubError::Translation(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate_text(&self, text: &str) -> Result<String> {
        let url = self.translate_url();
        let body = vec![TranslationRequestItem {
            text: text.to_string(),
        }];

        debug!("Sending translation request to: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("api-version", "3.0"),
                ("from", self.config.source_lang.as_str()),
                ("to", self.config.target_lang.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .header("X-ClientTraceId", Uuid::new_v4().to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| BisubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BisubError::Translation(format!(
                "Translator API error {}: {}",
                status, error_text
            )));
        }

        let items: Vec<TranslationResponseItem> = response
            .json()
            .await
            .map_err(|e| BisubError::Translation(format!("Failed to parse response: {}", e)))?;

        extract_translation(&items).ok_or_else(|| {
            BisubError::Translation("Response missing translations".to_string())
        })
    }
}

/// Pull the translated text out of the response body; `None` when the
/// expected `[{translations: [{text}]}]` structure is absent.
fn extract_translation(items: &[TranslationResponseItem]) -> Option<String> {
    items
        .first()
        .and_then(|item| item.translations.first())
        .map(|translation| translation.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let body = r#"[{"translations":[{"text":"你好","to":"zh-Hans"}]}]"#;
        let items: Vec<TranslationResponseItem> = serde_json::from_str(body).unwrap();
        assert_eq!(extract_translation(&items).as_deref(), Some("你好"));
    }

    #[test]
    fn test_empty_translations_is_missing() {
        let body = r#"[{"translations":[]}]"#;
        let items: Vec<TranslationResponseItem> = serde_json::from_str(body).unwrap();
        assert_eq!(extract_translation(&items), None);
    }

    #[test]
    fn test_empty_body_is_missing() {
        let items: Vec<TranslationResponseItem> = serde_json::from_str("[]").unwrap();
        assert_eq!(extract_translation(&items), None);
    }

    #[test]
    fn test_malformed_body_does_not_parse() {
        let body = r#"[{"detectedLanguage":{"language":"en"}}]"#;
        assert!(serde_json::from_str::<Vec<TranslationResponseItem>>(body).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let body = vec![TranslationRequestItem {
            text: "Hello".to_string(),
        }];
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"[{"text":"Hello"}]"#);
    }

    #[test]
    fn test_translate_url_strips_trailing_slash() {
        let config = TranslatorConfig {
            endpoint: "https://api.cognitive.microsofttranslator.com/".to_string(),
            key: "k".to_string(),
            region: "r".to_string(),
            source_lang: "en".to_string(),
            target_lang: "zh-Hans".to_string(),
            timeout_secs: 10,
        };
        let translator = AzureTranslator::new(config).unwrap();
        assert_eq!(
            translator.translate_url(),
            "https://api.cognitive.microsofttranslator.com/translate"
        );
    }
}
