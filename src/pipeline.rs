use std::io::Write;

use tracing::{info, warn};

use crate::error::Result;
use crate::segment::{RawSegment, TranscriptSegment};
use crate::subtitle::SubtitleCue;
use crate::translate::Translator;

/// Drives the segment-to-subtitle pipeline: validates each recognizer record
/// in input order, translates it with the fail-soft fallback, and streams one
/// complete cue block per segment to the sink.
pub struct SubtitlePipeline {
    translator: Box<dyn Translator>,
}

impl SubtitlePipeline {
    pub fn new(translator: Box<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Process segments sequentially and return the number of cues written.
    ///
    /// Each cue is written as one block and flushed before the next segment
    /// is processed, so an interrupted run never leaves a partial cue behind
    /// the last flush. Translation failures fall back to the source text and
    /// never abort the run; malformed segment data and sink write failures
    /// do, leaving previously flushed cues in place.
    pub async fn run<W: Write>(&self, segments: &[RawSegment], sink: &mut W) -> Result<usize> {
        let total = segments.len();
        info!("Starting subtitle pipeline for {} segments", total);

        for (idx, raw) in segments.iter().enumerate() {
            let index = idx + 1;
            let segment = TranscriptSegment::from_raw(index, raw)?;

            info!("┌─ Translating segment {}/{} ────────", index, total);
            info!("│ Source: {}", segment.text);

            let translated = match self.translator.translate_text(&segment.text).await {
                Ok(translation) => {
                    info!("│ Target: {}", translation);
                    translation
                }
                Err(e) => {
                    warn!("│ Failed, keeping source text: {}", e);
                    segment.text.clone()
                }
            };
            info!("└─────────────────────────────────────");

            let cue = SubtitleCue::new(index, &segment, translated);
            sink.write_all(cue.to_block().as_bytes())?;
            sink.flush()?;
        }

        info!("Pipeline completed, {} cues written", total);
        Ok(total)
    }
}
