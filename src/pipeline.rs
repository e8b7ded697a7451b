use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::error::{CorpusError, CorpusResult, ExtractError};
use crate::io::{parse_roster_file, CorpusLayout};
use crate::models::{Meeting, MeetingInfo, Roster, SpeakerTranscript};
use crate::stages::{load_speaker, merge_turns, reconstruct_utterances, SpeakerAnnotations};

/// Configuration for a corpus run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub layout: CorpusLayout,
    /// Number of meetings processed at once
    pub jobs: usize,
    /// Restrict the run to these meeting ids (all when empty)
    pub meeting_ids: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            layout: CorpusLayout::default(),
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            meeting_ids: Vec::new(),
        }
    }
}

/// Outcome of a corpus run, in roster order
#[derive(Debug, Default)]
pub struct CorpusReport {
    pub meetings: Vec<Meeting>,
    pub failures: Vec<ExtractError>,
}

impl CorpusReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run load, reconstruct and merge for a single meeting
pub fn process_meeting(
    root: &Path,
    layout: &CorpusLayout,
    info: &MeetingInfo,
) -> CorpusResult<Meeting> {
    build_meeting(root, layout, info, |_| {})
}

fn build_meeting(
    root: &Path,
    layout: &CorpusLayout,
    info: &MeetingInfo,
    mut inspect: impl FnMut(&SpeakerAnnotations),
) -> CorpusResult<Meeting> {
    let mut speakers = Vec::with_capacity(info.speakers.len());

    for speaker in &info.speakers {
        let annotations = load_speaker(root, layout, &info.id, &speaker.label)?;
        inspect(&annotations);

        let utterances = reconstruct_utterances(&annotations.boundaries, &annotations.timeline)
            .map_err(|e| match e {
                CorpusError::DataConsistency(message) => CorpusError::DataConsistency(format!(
                    "{}.{}: {}",
                    info.id, speaker.label, message
                )),
                other => other,
            })?;

        debug!(
            "{}.{}: {} utterances from {} segments",
            info.id,
            speaker.label,
            utterances.len(),
            annotations.boundaries.len()
        );

        speakers.push(SpeakerTranscript {
            label: speaker.label.clone(),
            utterances,
        });
    }

    let turns = merge_turns(info, &speakers)?;

    Ok(Meeting {
        id: info.id.clone(),
        speakers,
        turns,
    })
}

/// Check the annotation directory and load its roster
pub fn load_roster(root: &Path, config: &ExtractConfig) -> Result<Roster, ExtractError> {
    if !root.is_dir() {
        return Err(ExtractError::AnnotationDirNotFound(root.to_path_buf()));
    }

    let mut roster =
        parse_roster_file(&config.layout.roster_file(root)).map_err(ExtractError::Roster)?;

    if !config.meeting_ids.is_empty() {
        roster.retain_ids(&config.meeting_ids);
        for id in &config.meeting_ids {
            if roster.get(id).is_none() {
                warn!("Meeting {} is not in the roster", id);
            }
        }
    }

    Ok(roster)
}

/// Process every roster meeting on a bounded worker pool
///
/// A failing meeting is recorded in the report and does not stop the others.
pub async fn process_corpus(
    root: &Path,
    config: &ExtractConfig,
) -> Result<CorpusReport, ExtractError> {
    let roster = load_roster(root, config)?;
    info!(
        "Processing {} meetings with {} workers",
        roster.len(),
        config.jobs.max(1)
    );

    let root: Arc<PathBuf> = Arc::new(root.to_path_buf());
    let layout = Arc::new(config.layout.clone());
    let permits = Arc::new(Semaphore::new(config.jobs.max(1)));
    let mut tasks = JoinSet::new();
    let mut task_meetings = HashMap::new();

    for (index, meeting) in roster.meetings.into_iter().enumerate() {
        let root = Arc::clone(&root);
        let layout = Arc::clone(&layout);
        let permits = Arc::clone(&permits);
        let meeting_id = meeting.id.clone();

        let handle = tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            tokio::task::spawn_blocking(move || process_meeting(&root, &layout, &meeting)).await
        });
        task_meetings.insert(handle.id(), (index, meeting_id));
    }

    let mut outcomes = Vec::with_capacity(task_meetings.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        let (task_id, result) = match joined {
            Ok((task_id, result)) => (task_id, result),
            Err(e) => (e.id(), Err(e)),
        };
        if let Some((index, meeting_id)) = task_meetings.remove(&task_id) {
            outcomes.push(MeetingOutcome {
                index,
                meeting_id,
                result,
            });
        }
    }

    let report = build_report(outcomes);

    info!(
        "Processed {} meetings, {} failed",
        report.meetings.len(),
        report.failures.len()
    );

    Ok(report)
}

/// A finished (or lost) meeting task
struct MeetingOutcome {
    /// Position in the roster
    index: usize,
    meeting_id: String,
    result: Result<CorpusResult<Meeting>, JoinError>,
}

/// Sort outcomes back into roster order and split successes from failures
fn build_report(mut outcomes: Vec<MeetingOutcome>) -> CorpusReport {
    outcomes.sort_by_key(|outcome| outcome.index);

    let mut report = CorpusReport::default();
    for MeetingOutcome {
        meeting_id, result, ..
    } in outcomes
    {
        match result {
            Ok(Ok(meeting)) => {
                debug!("{}: {} turns", meeting.id, meeting.turns.len());
                report.meetings.push(meeting);
            }
            Ok(Err(source)) => {
                warn!("Meeting {} failed ({:?}): {}", meeting_id, source.kind(), source);
                report.failures.push(ExtractError::Meeting { meeting_id, source });
            }
            Err(e) => {
                let reason = if e.is_panic() { "panicked" } else { "was cancelled" };
                warn!("Meeting {} worker {}", meeting_id, reason);
                report.failures.push(ExtractError::Worker {
                    meeting_id,
                    reason: reason.to_string(),
                });
            }
        }
    }

    report
}

/// Per-meeting statistics for the `analyze` command
#[derive(Debug, Clone)]
pub struct MeetingStats {
    pub meeting_id: String,
    pub speakers: usize,
    pub timeline_entries: usize,
    pub gaps: usize,
    pub segments: usize,
    pub utterances: usize,
    pub speech_extent: f64,
}

/// Gather statistics for one meeting without writing anything
pub fn analyze_meeting(
    root: &Path,
    layout: &CorpusLayout,
    info: &MeetingInfo,
) -> CorpusResult<MeetingStats> {
    let mut stats = MeetingStats {
        meeting_id: info.id.clone(),
        speakers: info.speakers.len(),
        timeline_entries: 0,
        gaps: 0,
        segments: 0,
        utterances: 0,
        speech_extent: 0.0,
    };

    let meeting = build_meeting(root, layout, info, |annotations| {
        stats.timeline_entries += annotations.timeline.len();
        stats.gaps += annotations.timeline.gap_count();
        stats.segments += annotations.boundaries.len();
    })?;
    stats.utterances = meeting.utterance_count();
    stats.speech_extent = meeting.speech_extent();

    Ok(stats)
}
