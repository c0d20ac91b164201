use thiserror::Error;

#[derive(Error, Debug)]
pub enum BisubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcription error: {0}")]
    Transcribe(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Invalid segment: {0}")]
    Segment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, BisubError>;
