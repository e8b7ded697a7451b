use serde::{Deserialize, Serialize};

/// A meeting participant as listed in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    /// Per-meeting label used in annotation file names (`nxt_agent`)
    pub label: String,
    /// Corpus-wide identity (`global_name`)
    pub global_name: String,
    /// Recording channel
    pub channel: u32,
}

/// Roster entry for a single meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingInfo {
    /// Meeting id (`observation`)
    pub id: String,
    pub duration: String,
    pub meeting_type: String,
    /// Speakers in document order
    pub speakers: Vec<Speaker>,
}

impl MeetingInfo {
    pub fn speaker(&self, label: &str) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.label == label)
    }
}

/// All meetings listed in the corpus roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub meetings: Vec<MeetingInfo>,
}

impl Roster {
    pub fn get(&self, meeting_id: &str) -> Option<&MeetingInfo> {
        self.meetings.iter().find(|m| m.id == meeting_id)
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Keep only the named meetings, preserving roster order
    pub fn retain_ids(&mut self, ids: &[String]) {
        self.meetings.retain(|m| ids.iter().any(|id| id == &m.id));
    }
}
