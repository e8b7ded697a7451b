use crate::error::CorpusResult;
use crate::models::{SegmentBoundary, TimelineEntry, Utterance, WordTimeline};

/// Stage 1: rebuild utterances from segment boundaries
///
/// For each boundary, in order:
/// 1. Take the inclusive word span `[from, to]` of the timeline
/// 2. Drop gaps
/// 3. Skip the boundary if nothing is left
/// 4. Otherwise emit first start, last end and the space-joined text
///
/// An inverted range yields nothing. A span ending past the timeline
/// fails the whole speaker.
pub fn reconstruct_utterances(
    boundaries: &[SegmentBoundary],
    timeline: &WordTimeline,
) -> CorpusResult<Vec<Utterance>> {
    let mut utterances = Vec::with_capacity(boundaries.len());

    for boundary in boundaries {
        let span = timeline.span(boundary.from_word_index, boundary.to_word_index)?;
        if let Some(utterance) = utterance_from_span(span) {
            utterances.push(utterance);
        }
    }

    Ok(utterances)
}

fn utterance_from_span(span: &[TimelineEntry]) -> Option<Utterance> {
    let words: Vec<_> = span.iter().filter_map(TimelineEntry::as_word).collect();
    let (first, last) = (words.first()?, words.last()?);

    Some(Utterance {
        start: first.start,
        end: last.end,
        content: words
            .iter()
            .map(|w| w.content.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        word_count: words.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusError;
    use crate::models::WordEntry;

    fn timeline(entries: &[Option<(f64, f64, &str)>]) -> WordTimeline {
        let mut timeline = WordTimeline::new();
        for (i, entry) in entries.iter().enumerate() {
            let word_id = format!("M.A.words{}", i);
            let entry = match entry {
                Some((start, end, content)) => TimelineEntry::Word(WordEntry {
                    word_id,
                    start: *start,
                    end: *end,
                    content: content.to_string(),
                    is_punctuation: false,
                }),
                None => TimelineEntry::Gap { word_id },
            };
            timeline.push(entry).unwrap();
        }
        timeline
    }

    fn boundary(from: usize, to: usize) -> SegmentBoundary {
        SegmentBoundary {
            turn_start: 0.0,
            turn_end: 0.0,
            from_word_index: from,
            to_word_index: to,
        }
    }

    #[test]
    fn test_span_skips_gaps() {
        let words = timeline(&[Some((1.0, 1.2, "hello")), None, Some((1.5, 1.8, "world"))]);

        let utterances = reconstruct_utterances(&[boundary(0, 2)], &words).unwrap();

        assert_eq!(
            utterances,
            vec![Utterance {
                start: 1.0,
                end: 1.8,
                content: "hello world".to_string(),
                word_count: 2,
            }]
        );
    }

    #[test]
    fn test_gap_only_span_dropped() {
        let words = timeline(&[Some((1.0, 1.2, "hello")), None, Some((1.5, 1.8, "world"))]);

        let utterances =
            reconstruct_utterances(&[boundary(1, 1), boundary(2, 2)], &words).unwrap();

        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].content, "world");
    }

    #[test]
    fn test_boundary_order_preserved() {
        let words = timeline(&[
            Some((0.0, 0.5, "a")),
            Some((0.6, 0.9, "b")),
            None,
            Some((2.0, 2.4, "c")),
            Some((2.5, 2.7, "d")),
        ]);

        let utterances =
            reconstruct_utterances(&[boundary(3, 4), boundary(0, 1), boundary(2, 3)], &words)
                .unwrap();

        let contents: Vec<&str> = utterances.iter().map(|u| u.content.as_str()).collect();
        assert_eq!(contents, vec!["c d", "a b", "c"]);
        assert_eq!(utterances[2].start, 2.0);
        assert_eq!(utterances[2].end, 2.4);
    }

    #[test]
    fn test_span_edges_trimmed_of_gaps() {
        let words = timeline(&[None, Some((3.0, 3.5, "yes")), Some((3.6, 4.0, "okay")), None]);

        let utterances = reconstruct_utterances(&[boundary(0, 3)], &words).unwrap();

        assert_eq!(utterances[0].start, 3.0);
        assert_eq!(utterances[0].end, 4.0);
        assert!(utterances[0].duration() >= 0.0);
    }

    #[test]
    fn test_inverted_range_dropped() {
        let words = timeline(&[Some((1.0, 1.2, "hello")), Some((1.5, 1.8, "world"))]);

        let utterances =
            reconstruct_utterances(&[boundary(1, 0), boundary(0, 0)], &words).unwrap();

        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].content, "hello");
    }

    #[test]
    fn test_out_of_range_is_error() {
        let words = timeline(&[Some((1.0, 1.2, "hello"))]);

        let err = reconstruct_utterances(&[boundary(0, 5)], &words).unwrap_err();
        assert!(matches!(err, CorpusError::DataConsistency(_)));
    }

    #[test]
    fn test_empty_input() {
        let words = timeline(&[]);
        assert!(reconstruct_utterances(&[], &words).unwrap().is_empty());
    }
}
