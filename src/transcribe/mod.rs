// Transcription seam
//
// The speech recognizer is an external collaborator: given an audio path it
// returns ordered, timed transcript segments. The trait keeps the pipeline
// independent of the recognizer binary; the one implementation shells out to
// an OpenAI-Whisper-style CLI.

pub mod whisper;

use async_trait::async_trait;
use std::path::Path;

pub use whisper::WhisperTranscriber;
use crate::error::Result;
use crate::segment::RawSegment;

/// Produce the ordered segment sequence for an audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Vec<RawSegment>>;
}
