use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};

/// A timed lexical word from a speaker's words file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// NXT identifier (e.g. `IS1000a.A.words12`)
    pub word_id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word text, empty when the node carries none
    pub content: String,
    /// Whether the node is marked as punctuation
    pub is_punctuation: bool,
}

/// One position in a word timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Word(WordEntry),
    /// Non-lexical node, or a word without timing. Holds its slot so
    /// positional indices stay aligned with the document.
    Gap { word_id: String },
}

impl TimelineEntry {
    pub fn word_id(&self) -> &str {
        match self {
            Self::Word(word) => &word.word_id,
            Self::Gap { word_id } => word_id,
        }
    }

    pub fn as_word(&self) -> Option<&WordEntry> {
        match self {
            Self::Word(word) => Some(word),
            Self::Gap { .. } => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }
}

/// Document-ordered word timeline for a single speaker
#[derive(Debug, Clone, Default)]
pub struct WordTimeline {
    entries: Vec<TimelineEntry>,
    positions: HashMap<String, usize>,
}

impl WordTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, rejecting a word id already present
    pub fn push(&mut self, entry: TimelineEntry) -> CorpusResult<()> {
        if self.positions.contains_key(entry.word_id()) {
            return Err(CorpusError::parse(
                format!("word {}", entry.word_id()),
                "duplicate word id",
            ));
        }
        self.positions
            .insert(entry.word_id().to_string(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    /// Position of a word id in document order
    pub fn position(&self, word_id: &str) -> Option<usize> {
        self.positions.get(word_id).copied()
    }

    pub fn gap_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_gap()).count()
    }

    /// Inclusive positional slice `[from, to]`, gaps included.
    ///
    /// An inverted range is empty. An end past the timeline is rejected
    /// rather than clamped.
    pub fn span(&self, from: usize, to: usize) -> CorpusResult<&[TimelineEntry]> {
        if from > to {
            return Ok(&[]);
        }
        if to >= self.entries.len() {
            return Err(CorpusError::DataConsistency(format!(
                "word range {}..{} exceeds timeline of {} entries",
                from,
                to,
                self.entries.len()
            )));
        }
        Ok(&self.entries[from..=to])
    }
}
