use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BisubError, Result};

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper binary
    pub binary_path: String,
    /// Model to use for transcription
    pub model: String,
    /// Source language hint passed to the recognizer
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translator API endpoint URL
    pub endpoint: String,
    /// Subscription key for the translator API
    pub key: String,
    /// Service region identifier
    pub region: String,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Upper bound for a single translation request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcriber: TranscriberConfig {
                binary_path: "whisper".to_string(),
                model: "medium".to_string(),
                language: "en".to_string(),
            },
            translator: TranslatorConfig {
                endpoint: String::new(),
                key: String::new(),
                region: String::new(),
                source_lang: "en".to_string(),
                target_lang: "zh-Hans".to_string(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BisubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| BisubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BisubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BisubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

impl TranslatorConfig {
    /// Fill in credentials from the environment where the config file left
    /// them blank: `TRANSLATE_ENDPOINT` (or plain `endpoint`),
    /// `TRANSLATE_KEY`, and `SERVICE_REGION`.
    pub fn apply_env_overrides(&mut self) {
        if self.endpoint.is_empty() {
            if let Some(endpoint) = read_env("TRANSLATE_ENDPOINT").or_else(|| read_env("endpoint")) {
                self.endpoint = endpoint;
            }
        }
        if self.key.is_empty() {
            if let Some(key) = read_env("TRANSLATE_KEY") {
                self.key = key;
            }
        }
        if self.region.is_empty() {
            if let Some(region) = read_env("SERVICE_REGION") {
                self.region = region;
            }
        }
    }

    /// Check that every parameter the translator API requires is present.
    /// Called once at startup; a failure here is fatal before any
    /// processing begins.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.endpoint.is_empty() {
            missing.push("endpoint");
        }
        if self.key.is_empty() {
            missing.push("key");
        }
        if self.region.is_empty() {
            missing.push("region");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BisubError::Config(format!(
                "Missing translator settings: {}. Set them in config.toml or via \
                 TRANSLATE_ENDPOINT / TRANSLATE_KEY / SERVICE_REGION",
                missing.join(", ")
            )))
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
