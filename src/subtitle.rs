use std::io::Write;

use crate::error::Result;
use crate::segment::TranscriptSegment;

/// Format a seconds offset as an SRT time code (HH:MM:SS,mmm).
///
/// The offset is converted to whole milliseconds with round-with-carry: a
/// fractional part that rounds up to 1000 ms carries into the seconds field,
/// so the millisecond field is always in 000..=999. Hours widen beyond two
/// digits when needed. The comma separator is required by SRT consumers.
pub fn format_timecode(seconds: f64) -> String {
    let total_milliseconds = (seconds * 1000.0).round() as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// One subtitle entry: sequence number, time range, the source-language line
/// and its translation. Constructed, serialized, and discarded per segment;
/// never retained by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// 1-based position in the segment sequence
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub source_text: String,
    pub translated_text: String,
}

impl SubtitleCue {
    pub fn new(
        index: usize,
        segment: &TranscriptSegment,
        translated_text: String,
    ) -> Self {
        Self {
            index,
            start: segment.start,
            end: segment.end,
            source_text: segment.text.clone(),
            translated_text,
        }
    }

    /// Render the four-line SRT block followed by the blank-line separator.
    /// This exact structure is the on-disk contract consumed by players.
    pub fn to_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n{}\n{}\n\n",
            self.index,
            format_timecode(self.start),
            format_timecode(self.end),
            self.source_text,
            self.translated_text
        )
    }
}

/// Write a monolingual SRT track for already-validated segments. Used by the
/// transcribe-only command, where no translation line is wanted.
pub fn write_plain_srt<W: Write>(segments: &[TranscriptSegment], sink: &mut W) -> Result<usize> {
    for (idx, segment) in segments.iter().enumerate() {
        let block = format!(
            "{}\n{} --> {}\n{}\n\n",
            idx + 1,
            format_timecode(segment.start),
            format_timecode(segment.end),
            segment.text
        );
        sink.write_all(block.as_bytes())?;
    }
    sink.flush()?;
    Ok(segments.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00:00,000");
        assert_eq!(format_timecode(65.123), "00:01:05,123");
        assert_eq!(format_timecode(3661.25), "01:01:01,250");
        assert_eq!(format_timecode(3661.500), "01:01:01,500");
    }

    #[test]
    fn test_format_timecode_rounds_with_carry() {
        assert_eq!(format_timecode(59.999), "00:00:59,999");
        assert_eq!(format_timecode(59.9996), "00:01:00,000");
        assert_eq!(format_timecode(3599.9999), "01:00:00,000");
    }

    #[test]
    fn test_format_timecode_hours_widen() {
        assert_eq!(format_timecode(359_999.999), "99:59:59,999");
        assert_eq!(format_timecode(360_000.0), "100:00:00,000");
    }

    #[test]
    fn test_cue_block_format() {
        let segment = TranscriptSegment {
            start: 1.0,
            end: 2.5,
            text: "Hello".to_string(),
        };
        let cue = SubtitleCue::new(3, &segment, "你好".to_string());
        assert_eq!(
            cue.to_block(),
            "3\n00:00:01,000 --> 00:00:02,500\nHello\n你好\n\n"
        );
    }

    #[test]
    fn test_write_plain_srt() {
        let segments = vec![
            TranscriptSegment {
                start: 0.0,
                end: 1.0,
                text: "One".to_string(),
            },
            TranscriptSegment {
                start: 1.0,
                end: 2.0,
                text: "Two".to_string(),
            },
        ];

        let mut buffer = Vec::new();
        let count = write_plain_srt(&segments, &mut buffer).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "1\n00:00:00,000 --> 00:00:01,000\nOne\n\n\
             2\n00:00:01,000 --> 00:00:02,000\nTwo\n\n"
        );
    }
}
