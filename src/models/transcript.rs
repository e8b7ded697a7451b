use serde::{Deserialize, Serialize};

/// A contiguous stretch of speech rebuilt from one segment's words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Start of the first timed word, in seconds
    pub start: f64,
    /// End of the last timed word, in seconds
    pub end: f64,
    /// Space-joined word text
    pub content: String,
    /// Number of timed words in the span
    pub word_count: usize,
}

impl Utterance {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One speaker turn in a meeting, ordered globally by start time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Start time in seconds
    pub start: f64,
    /// `end - start`, in seconds
    pub duration: f64,
    /// Corpus-wide speaker name (`global_name`)
    pub speaker_identity: String,
    /// Per-meeting label (`nxt_agent`)
    pub speaker_label: String,
    pub content: String,
}

impl Turn {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// The utterances of one speaker within a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerTranscript {
    pub label: String,
    pub utterances: Vec<Utterance>,
}

/// A processed meeting: per-speaker utterances plus the merged turn list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    /// In roster speaker order
    pub speakers: Vec<SpeakerTranscript>,
    /// Sorted by start time
    pub turns: Vec<Turn>,
}

impl Meeting {
    pub fn utterance_count(&self) -> usize {
        self.speakers.iter().map(|s| s.utterances.len()).sum()
    }

    /// Span covered by the turns, in seconds
    pub fn speech_extent(&self) -> f64 {
        let first = self.turns.first().map(|t| t.start).unwrap_or(0.0);
        let last = self
            .turns
            .iter()
            .map(Turn::end)
            .fold(first, f64::max);
        last - first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_extent() {
        let turn = |start: f64, duration: f64| Turn {
            start,
            duration,
            speaker_identity: "FEE005".to_string(),
            speaker_label: "A".to_string(),
            content: String::new(),
        };
        let meeting = Meeting {
            id: "ES2002a".to_string(),
            speakers: vec![],
            turns: vec![turn(1.0, 5.0), turn(2.0, 1.0), turn(4.0, 0.5)],
        };
        assert!((meeting.speech_extent() - 5.0).abs() < 1e-9);

        let empty = Meeting {
            id: "ES2002b".to_string(),
            speakers: vec![],
            turns: vec![],
        };
        assert_eq!(empty.speech_extent(), 0.0);
    }
}
