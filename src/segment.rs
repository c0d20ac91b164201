use serde::{Deserialize, Serialize};

use crate::error::{BisubError, Result};

/// Timed transcript segment as it arrives from the recognizer, before
/// validation. All fields are optional because the JSON document is produced
/// by an external tool; the pipeline promotes each record to a
/// [`TranscriptSegment`] and treats missing fields as a fatal input error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegment {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: Option<String>,
}

/// Validated transcript segment consumed by the subtitle pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Start offset in seconds, finite and non-negative
    pub start: f64,
    /// End offset in seconds, finite and not before `start`
    pub end: f64,
    /// Source-language text; may be empty after trimming
    pub text: String,
}

impl TranscriptSegment {
    /// Promote a raw recognizer record to a validated segment. `index` is the
    /// 1-based position in the input sequence, used only for error reporting.
    pub fn from_raw(index: usize, raw: &RawSegment) -> Result<Self> {
        let start = raw
            .start
            .ok_or_else(|| BisubError::Segment(format!("segment {}: missing start time", index)))?;
        let end = raw
            .end
            .ok_or_else(|| BisubError::Segment(format!("segment {}: missing end time", index)))?;
        let text = raw
            .text
            .as_ref()
            .ok_or_else(|| BisubError::Segment(format!("segment {}: missing text", index)))?;

        if !start.is_finite() || start < 0.0 {
            return Err(BisubError::Segment(format!(
                "segment {}: invalid start time {}",
                index, start
            )));
        }
        if !end.is_finite() || end < start {
            return Err(BisubError::Segment(format!(
                "segment {}: invalid end time {} (start {})",
                index, end, start
            )));
        }

        Ok(Self {
            start,
            end,
            text: text.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: Option<f64>, end: Option<f64>, text: Option<&str>) -> RawSegment {
        RawSegment {
            start,
            end,
            text: text.map(|t| t.to_string()),
        }
    }

    #[test]
    fn test_valid_segment_is_trimmed() {
        let segment = TranscriptSegment::from_raw(1, &raw(Some(0.5), Some(2.0), Some(" Hello "))).unwrap();
        assert_eq!(segment.start, 0.5);
        assert_eq!(segment.end, 2.0);
        assert_eq!(segment.text, "Hello");
    }

    #[test]
    fn test_empty_text_is_allowed() {
        let segment = TranscriptSegment::from_raw(1, &raw(Some(0.0), Some(1.0), Some("  "))).unwrap();
        assert_eq!(segment.text, "");
    }

    #[test]
    fn test_missing_fields_are_fatal() {
        assert!(TranscriptSegment::from_raw(1, &raw(None, Some(1.0), Some("a"))).is_err());
        assert!(TranscriptSegment::from_raw(2, &raw(Some(0.0), None, Some("a"))).is_err());
        assert!(TranscriptSegment::from_raw(3, &raw(Some(0.0), Some(1.0), None)).is_err());
    }

    #[test]
    fn test_error_names_the_offending_segment() {
        let err = TranscriptSegment::from_raw(7, &raw(Some(0.0), None, Some("a"))).unwrap_err();
        assert!(err.to_string().contains("segment 7"));
    }

    #[test]
    fn test_invalid_times_are_fatal() {
        assert!(TranscriptSegment::from_raw(1, &raw(Some(-1.0), Some(1.0), Some("a"))).is_err());
        assert!(TranscriptSegment::from_raw(1, &raw(Some(2.0), Some(1.0), Some("a"))).is_err());
        assert!(TranscriptSegment::from_raw(1, &raw(Some(f64::NAN), Some(1.0), Some("a"))).is_err());
    }
}
