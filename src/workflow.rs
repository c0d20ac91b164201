use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{BisubError, Result};
use crate::pipeline::SubtitlePipeline;
use crate::segment::TranscriptSegment;
use crate::subtitle::write_plain_srt;
use crate::transcribe::{Transcriber, WhisperTranscriber};
use crate::translate::AzureTranslator;

const AUDIO_EXTENSIONS: [&str; 6] = ["wav", "mp3", "m4a", "flac", "ogg", "aac"];

pub struct Workflow {
    config: Config,
    transcriber: Box<dyn Transcriber>,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        let transcriber = Box::new(WhisperTranscriber::new(config.transcriber.clone()));
        Self {
            config,
            transcriber,
        }
    }

    /// Transcribe one audio file and write the bilingual SRT track.
    pub async fn generate<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        info!("Generating bilingual subtitles for {}", input_path.display());

        if !input_path.exists() {
            return Err(BisubError::FileNotFound(input_path.display().to_string()));
        }

        let srt_path = match output_path {
            Some(path) => path,
            None => self.default_output_path(input_path)?,
        };

        let segments = self
            .transcriber
            .transcribe(input_path, Some(&self.config.translator.source_lang))
            .await?;

        let translator = AzureTranslator::new(self.config.translator.clone())?;
        let pipeline = SubtitlePipeline::new(Box::new(translator));

        let file = File::create(&srt_path)?;
        let mut writer = BufWriter::new(file);
        let count = pipeline.run(&segments, &mut writer).await?;

        info!("Saved {} cues to {}", count, srt_path.display());
        Ok(srt_path)
    }

    /// Process every audio file under a directory. A failing file is logged
    /// and skipped so the rest of the batch still runs.
    pub async fn generate_batch<P: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<PathBuf>,
    ) -> Result<()> {
        let input_dir = input_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(BisubError::Config(
                "Input path is not a directory".to_string(),
            ));
        }

        if let Some(dir) = &output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut audio_files = Vec::new();
        for entry in WalkDir::new(input_dir).into_iter().filter_map(|e| e.ok()) {
            if let Some(extension) = entry.path().extension() {
                if let Some(ext_str) = extension.to_str() {
                    if AUDIO_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()) {
                        audio_files.push(entry.path().to_path_buf());
                    }
                }
            }
        }

        info!("Found {} audio files to process", audio_files.len());

        for audio_path in audio_files {
            let output_path = match &output_dir {
                Some(dir) => Some(dir.join(self.default_output_name(&audio_path)?)),
                None => None,
            };
            match self.generate(&audio_path, output_path).await {
                Ok(srt_path) => info!(
                    "Successfully processed {} -> {}",
                    audio_path.display(),
                    srt_path.display()
                ),
                Err(e) => warn!("Failed to process {}: {}", audio_path.display(), e),
            }
        }

        Ok(())
    }

    /// Transcribe one audio file to a monolingual SRT track, no translation.
    pub async fn transcribe_only<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: P,
        language: Option<&str>,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let raw_segments = self.transcriber.transcribe(input_path, language).await?;

        let segments = raw_segments
            .iter()
            .enumerate()
            .map(|(idx, raw)| TranscriptSegment::from_raw(idx + 1, raw))
            .collect::<Result<Vec<_>>>()?;

        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        let count = write_plain_srt(&segments, &mut writer)?;

        info!("Saved {} cues to {}", count, output_path.display());
        Ok(())
    }

    fn default_output_name(&self, input_path: &Path) -> Result<String> {
        let stem = input_path
            .file_stem()
            .ok_or_else(|| BisubError::Config("Invalid audio filename".to_string()))?
            .to_string_lossy();
        Ok(format!("{}_{}.srt", stem, self.config.translator.target_lang))
    }

    fn default_output_path(&self, input_path: &Path) -> Result<PathBuf> {
        let parent = input_path
            .parent()
            .ok_or_else(|| BisubError::Config("Cannot determine output directory".to_string()))?;
        Ok(parent.join(self.default_output_name(input_path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_stem_and_target_lang() {
        let workflow = Workflow::new(Config::default());
        let path = workflow
            .default_output_path(Path::new("/audio/meeting.wav"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/audio/meeting_zh-Hans.srt"));
    }
}
