use std::path::Path;

use tracing::debug;

use super::input::{
    element_children, parse_document, parse_seconds, read_annotation_file, NITE_NAMESPACE,
};
use crate::error::{CorpusError, CorpusResult};
use crate::models::{TimelineEntry, WordEntry, WordTimeline};

/// Parse a speaker's words file into a timeline
pub fn parse_words_file(path: &Path) -> CorpusResult<WordTimeline> {
    let xml = read_annotation_file(path)?;
    let timeline = parse_words_str(&xml, path)?;
    debug!(
        "Parsed {} timeline entries ({} gaps) from {:?}",
        timeline.len(),
        timeline.gap_count(),
        path
    );
    Ok(timeline)
}

/// Parse words XML text into a timeline
pub fn parse_words_xml(xml: &str) -> CorpusResult<WordTimeline> {
    parse_words_str(xml, Path::new("<memory>"))
}

fn parse_words_str(xml: &str, source: &Path) -> CorpusResult<WordTimeline> {
    let doc = parse_document(xml, source)?;
    let mut timeline = WordTimeline::new();

    for (position, node) in element_children(doc.root_element()).enumerate() {
        let word_id = node
            .attribute((NITE_NAMESPACE, "id"))
            .ok_or_else(|| {
                CorpusError::parse(
                    format!("node {} <{}>", position, node.tag_name().name()),
                    "missing nite:id",
                )
            })?
            .to_string();

        timeline.push(timeline_entry(node, word_id)?)?;
    }

    Ok(timeline)
}

fn timeline_entry(node: roxmltree::Node<'_, '_>, word_id: String) -> CorpusResult<TimelineEntry> {
    if node.tag_name().name() != "w" {
        return Ok(TimelineEntry::Gap { word_id });
    }

    let (Some(start), Some(end)) = (node.attribute("starttime"), node.attribute("endtime")) else {
        return Ok(TimelineEntry::Gap { word_id });
    };

    let context = format!("word {}", word_id);
    let start = parse_seconds(start, "starttime", &context)?;
    let end = parse_seconds(end, "endtime", &context)?;

    Ok(TimelineEntry::Word(WordEntry {
        start,
        end,
        content: node.text().unwrap_or_default().to_string(),
        is_punctuation: node.has_attribute("punc"),
        word_id,
    }))
}
