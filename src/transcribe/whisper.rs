use std::path::Path;
use std::process::Command;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{BisubError, Result};
use crate::segment::RawSegment;
use super::Transcriber;

/// Whisper JSON output document. Only the segment list matters here; the
/// recognizer's own metadata is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub segments: Vec<RawSegment>,
    pub language: Option<String>,
}

/// Recognizer implementation shelling out to an OpenAI-Whisper-style CLI
/// that writes a JSON transcript next to the audio file name.
pub struct WhisperTranscriber {
    config: TranscriberConfig,
}

impl WhisperTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    /// Check that the whisper binary responds on this machine.
    pub fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--help")
            .output()
            .map_err(|e| {
                BisubError::Transcribe(format!(
                    "whisper command '{}' not found: {}",
                    self.config.binary_path, e
                ))
            })?;

        if output.status.success() {
            info!("Whisper binary '{}' is available", self.config.binary_path);
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(BisubError::Transcribe(format!(
                "Whisper binary '{}' is not usable: {}",
                self.config.binary_path, stderr
            )))
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Vec<RawSegment>> {
        if !audio_path.exists() {
            return Err(BisubError::FileNotFound(audio_path.display().to_string()));
        }

        info!(
            "Transcribing {} with whisper model '{}'",
            audio_path.display(),
            self.config.model
        );

        // Whisper writes its JSON next to the audio stem inside --output_dir.
        let temp_dir = tempfile::tempdir()
            .map_err(|e| BisubError::Transcribe(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(audio_path)
            .arg("--model")
            .arg(&self.config.model)
            .arg("--output_dir")
            .arg(output_dir)
            .arg("--output_format")
            .arg("json");

        if let Some(lang) = language {
            cmd.arg("--language").arg(lang);
        }

        debug!("Running whisper command: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| BisubError::Transcribe(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BisubError::Transcribe(format!(
                "Whisper transcription failed: {}",
                stderr
            )));
        }

        let audio_stem = audio_path
            .file_stem()
            .ok_or_else(|| BisubError::Transcribe("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_stem.to_string_lossy()));

        if !json_file.exists() {
            return Err(BisubError::Transcribe(
                "Whisper JSON output file not found".to_string(),
            ));
        }

        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| BisubError::Transcribe(format!("Failed to read JSON output: {}", e)))?;

        let whisper_output = parse_whisper_output(&json_content)?;

        info!(
            "Transcription produced {} segments (language: {})",
            whisper_output.segments.len(),
            whisper_output.language.as_deref().unwrap_or("unknown")
        );

        Ok(whisper_output.segments)
    }
}

fn parse_whisper_output(json_content: &str) -> Result<WhisperOutput> {
    serde_json::from_str(json_content)
        .map_err(|e| BisubError::Transcribe(format!("Failed to parse whisper JSON: {}", e)))
}
