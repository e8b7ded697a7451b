use tracing::debug;

use crate::error::{CorpusError, CorpusResult};
use crate::models::{MeetingInfo, SpeakerTranscript, Turn};

/// Stage 2: merge every speaker's utterances into one time-ordered turn list
///
/// Turns are collected in speaker order, then utterance order, and
/// stable-sorted by start time, so equal starts keep that order.
pub fn merge_turns(meeting: &MeetingInfo, speakers: &[SpeakerTranscript]) -> CorpusResult<Vec<Turn>> {
    let mut turns = Vec::with_capacity(speakers.iter().map(|s| s.utterances.len()).sum());

    for transcript in speakers {
        let speaker = meeting.speaker(&transcript.label).ok_or_else(|| {
            CorpusError::DataConsistency(format!(
                "speaker {} is not in the roster for meeting {}",
                transcript.label, meeting.id
            ))
        })?;

        turns.extend(transcript.utterances.iter().map(|utterance| Turn {
            start: utterance.start,
            duration: utterance.duration(),
            speaker_identity: speaker.global_name.clone(),
            speaker_label: speaker.label.clone(),
            content: utterance.content.clone(),
        }));
    }

    turns.sort_by(|a, b| a.start.total_cmp(&b.start));

    debug!(
        "{}: merged {} turns from {} speakers",
        meeting.id,
        turns.len(),
        speakers.len()
    );

    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Speaker, Utterance};

    fn meeting_info() -> MeetingInfo {
        MeetingInfo {
            id: "ES2002a".to_string(),
            duration: "1268.0".to_string(),
            meeting_type: "scenario".to_string(),
            speakers: vec![
                Speaker {
                    label: "A".to_string(),
                    global_name: "FEE005".to_string(),
                    channel: 1,
                },
                Speaker {
                    label: "B".to_string(),
                    global_name: "MEE006".to_string(),
                    channel: 0,
                },
            ],
        }
    }

    fn utterance(start: f64, end: f64, content: &str) -> Utterance {
        Utterance {
            start,
            end,
            content: content.to_string(),
            word_count: content.split_whitespace().count(),
        }
    }

    fn transcript(label: &str, utterances: Vec<Utterance>) -> SpeakerTranscript {
        SpeakerTranscript {
            label: label.to_string(),
            utterances,
        }
    }

    #[test]
    fn test_merge_orders_across_speakers() {
        let speakers = vec![
            transcript("A", vec![utterance(2.0, 3.0, "second")]),
            transcript("B", vec![utterance(1.0, 1.5, "first")]),
        ];

        let turns = merge_turns(&meeting_info(), &speakers).unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].start, 1.0);
        assert_eq!(turns[0].speaker_identity, "MEE006");
        assert_eq!(turns[0].duration, 0.5);
        assert_eq!(turns[1].speaker_identity, "FEE005");
    }

    #[test]
    fn test_merge_ties_keep_insertion_order() {
        let speakers = vec![
            transcript(
                "A",
                vec![utterance(5.0, 6.0, "a1"), utterance(5.0, 5.5, "a2")],
            ),
            transcript("B", vec![utterance(5.0, 7.0, "b1"), utterance(0.5, 1.0, "b0")]),
        ];

        let turns = merge_turns(&meeting_info(), &speakers).unwrap();

        let order: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(order, vec!["b0", "a1", "a2", "b1"]);
        assert!(turns.windows(2).all(|w| w[0].start <= w[1].start));
        assert!(turns.iter().all(|t| t.duration >= 0.0));
    }

    #[test]
    fn test_unknown_speaker_fails() {
        let speakers = vec![transcript("Z", vec![utterance(0.0, 1.0, "who")])];

        let err = merge_turns(&meeting_info(), &speakers).unwrap_err();
        assert!(matches!(err, CorpusError::DataConsistency(_)));
    }

    #[test]
    fn test_speaker_without_utterances() {
        let speakers = vec![transcript("A", vec![]), transcript("B", vec![])];
        assert!(merge_turns(&meeting_info(), &speakers).unwrap().is_empty());
    }
}
