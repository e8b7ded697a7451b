use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ExtractError;
use crate::models::{Meeting, Turn};

type OutputResult = Result<(), ExtractError>;

fn output_error(path: &Path, source: std::io::Error) -> ExtractError {
    ExtractError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Fixed RTTM field values
#[derive(Debug, Clone)]
pub struct RttmConfig {
    /// Row type tag
    pub type_tag: String,
    /// Channel field
    pub channel: String,
    /// Token for unused fields
    pub placeholder: String,
}

impl Default for RttmConfig {
    fn default() -> Self {
        Self {
            type_tag: "SPEAKER".to_string(),
            channel: "1".to_string(),
            placeholder: "<NA>".to_string(),
        }
    }
}

/// Format one turn as an RTTM row.
///
/// Fields: type, file id, channel, onset, duration, orthography, speaker
/// type, speaker name, confidence, lookahead.
pub fn format_rttm_line(meeting_id: &str, turn: &Turn, config: &RttmConfig) -> String {
    let na = config.placeholder.as_str();
    format!(
        "{} {} {} {:.3} {:.3} {} {} {} {} {}",
        config.type_tag,
        meeting_id,
        config.channel,
        turn.start,
        turn.duration,
        na,
        na,
        turn.speaker_identity,
        na,
        na
    )
}

/// Render a meeting's turns as RTTM text, in turn order, without a trailing newline
pub fn format_rttm(meeting_id: &str, turns: &[Turn], config: &RttmConfig) -> String {
    turns
        .iter()
        .map(|turn| format_rttm_line(meeting_id, turn, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Numeric and identity fields read back from an RTTM row
#[derive(Debug, Clone, PartialEq)]
pub struct RttmRecord {
    pub meeting_id: String,
    pub start: f64,
    pub duration: f64,
    pub speaker: String,
}

/// Read an RTTM row back. Returns `None` for rows that are not ten fields.
pub fn parse_rttm_line(line: &str) -> Option<RttmRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 10 {
        return None;
    }
    Some(RttmRecord {
        meeting_id: fields[1].to_string(),
        start: fields[3].parse().ok()?,
        duration: fields[4].parse().ok()?,
        speaker: fields[7].to_string(),
    })
}

pub fn write_rttm(meeting: &Meeting, path: &Path, config: &RttmConfig) -> OutputResult {
    std::fs::write(path, format_rttm(&meeting.id, &meeting.turns, config))
        .map_err(|e| output_error(path, e))
}

/// Machine-readable transcript for one meeting
#[derive(Debug, Clone, Serialize)]
pub struct MachineTranscript<'a> {
    pub meeting_id: &'a str,
    pub metadata: TranscriptMetadata,
    pub turns: &'a [Turn],
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMetadata {
    pub speakers: Vec<String>,
    pub total_turns: usize,
    pub total_words: usize,
    pub speech_extent_seconds: f64,
    pub generated_at: String,
}

impl<'a> MachineTranscript<'a> {
    pub fn from_meeting(meeting: &'a Meeting) -> Self {
        let metadata = TranscriptMetadata {
            speakers: meeting.speakers.iter().map(|s| s.label.clone()).collect(),
            total_turns: meeting.turns.len(),
            total_words: meeting
                .speakers
                .iter()
                .flat_map(|s| s.utterances.iter())
                .map(|u| u.word_count)
                .sum(),
            speech_extent_seconds: meeting.speech_extent(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        };

        Self {
            meeting_id: &meeting.id,
            metadata,
            turns: &meeting.turns,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> OutputResult {
        let file = std::fs::File::create(path).map_err(|e| output_error(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| output_error(path, e.into()))?;
        writer.flush().map_err(|e| output_error(path, e))
    }
}

/// Human-readable transcript format
pub struct HumanTranscript<'a> {
    meeting: &'a Meeting,
}

impl<'a> HumanTranscript<'a> {
    pub fn new(meeting: &'a Meeting) -> Self {
        Self { meeting }
    }

    /// One block per turn: a `[H:MM:SS.mmm] NAME (label):` header with the
    /// text wrapped beside it
    pub fn format(&self) -> String {
        let mut output = String::new();

        for turn in &self.meeting.turns {
            let header = format!(
                "[{}] {} ({}):",
                format_timestamp(turn.start),
                turn.speaker_identity,
                turn.speaker_label
            );
            output.push_str(&wrap_under_header(&header, &turn.content, LINE_WIDTH));
            output.push('\n');
        }

        output
    }

    pub fn write_file(&self, path: &Path) -> OutputResult {
        let mut file = std::fs::File::create(path).map_err(|e| output_error(path, e))?;
        file.write_all(self.format().as_bytes())
            .map_err(|e| output_error(path, e))
    }
}

const LINE_WIDTH: usize = 100;

/// Format seconds as H:MM:SS.mmm
fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let (total_secs, ms) = (total_ms / 1000, total_ms % 1000);
    format!(
        "{}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        total_secs / 60 % 60,
        total_secs % 60,
        ms
    )
}

/// Lay `text` out after `header`, breaking before `width` columns.
/// Continuation lines are indented so words line up under the first one.
fn wrap_under_header(header: &str, text: &str, width: usize) -> String {
    let indent = header.chars().count();
    let mut result = String::from(header);
    let mut column = indent;
    let mut line_has_words = false;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if line_has_words && column + 1 + word_width > width {
            result.push('\n');
            result.push_str(&" ".repeat(indent));
            column = indent;
        }
        result.push(' ');
        result.push_str(word);
        column += 1 + word_width;
        line_has_words = true;
    }

    result
}
