use std::path::Path;

use tracing::debug;

use crate::error::{CorpusError, CorpusResult};
use crate::io::{parse_segments_file, parse_words_file, CorpusLayout};
use crate::models::{SegmentBoundary, WordTimeline};

/// Parsed annotations for one speaker of one meeting
#[derive(Debug, Clone)]
pub struct SpeakerAnnotations {
    pub label: String,
    pub timeline: WordTimeline,
    pub boundaries: Vec<SegmentBoundary>,
}

/// Stage 0: read a speaker's words and segments files
///
/// Both files are checked for existence before either is parsed.
pub fn load_speaker(
    root: &Path,
    layout: &CorpusLayout,
    meeting_id: &str,
    label: &str,
) -> CorpusResult<SpeakerAnnotations> {
    let segments_path = layout.segments_file(root, meeting_id, label);
    let words_path = layout.words_file(root, meeting_id, label);

    for path in [&segments_path, &words_path] {
        if !path.is_file() {
            return Err(CorpusError::NotFound { path: path.clone() });
        }
    }

    let boundaries = parse_segments_file(&segments_path)?;
    let timeline = parse_words_file(&words_path)?;

    debug!(
        "{}.{}: {} timeline entries, {} segments",
        meeting_id,
        label,
        timeline.len(),
        boundaries.len()
    );

    Ok(SpeakerAnnotations {
        label: label.to_string(),
        timeline,
        boundaries,
    })
}
