use std::path::Path;

use tracing::{debug, warn};

use super::input::{element_children, parse_document, read_annotation_file, required_attr};
use crate::error::{CorpusError, CorpusResult};
use crate::models::{MeetingInfo, Roster, Speaker};

/// Parse the corpus meeting roster (`corpusResources/meetings.xml`)
pub fn parse_roster_file(path: &Path) -> CorpusResult<Roster> {
    let xml = read_annotation_file(path)?;
    let roster = parse_roster_str(&xml, path)?;
    debug!("Roster lists {} meetings", roster.len());
    Ok(roster)
}

pub fn parse_roster_xml(xml: &str) -> CorpusResult<Roster> {
    parse_roster_str(xml, Path::new("<memory>"))
}

fn parse_roster_str(xml: &str, source: &Path) -> CorpusResult<Roster> {
    let doc = parse_document(xml, source)?;
    let mut meetings = Vec::new();

    for (position, node) in element_children(doc.root_element())
        .filter(|n| n.tag_name().name() == "meeting")
        .enumerate()
    {
        let context = format!("meeting {}", position);
        let id = required_attr(node, "observation", &context)?.to_string();
        let context = format!("meeting {}", id);

        let mut speakers: Vec<Speaker> = Vec::new();
        for speaker in element_children(node).filter(|n| n.tag_name().name() == "speaker") {
            let speaker = parse_speaker(speaker, &context)?;
            // A repeated label replaces the earlier entry but keeps its position
            match speakers.iter_mut().find(|s| s.label == speaker.label) {
                Some(existing) => {
                    warn!("{}: speaker {} listed more than once", context, speaker.label);
                    *existing = speaker;
                }
                None => speakers.push(speaker),
            }
        }

        meetings.push(MeetingInfo {
            duration: required_attr(node, "duration", &context)?.to_string(),
            meeting_type: required_attr(node, "type", &context)?.to_string(),
            speakers,
            id,
        });
    }

    Ok(Roster { meetings })
}

fn parse_speaker(node: roxmltree::Node<'_, '_>, context: &str) -> CorpusResult<Speaker> {
    let label = required_attr(node, "nxt_agent", context)?.to_string();
    let context = format!("{} speaker {}", context, label);
    let channel = required_attr(node, "channel", &context)?;

    Ok(Speaker {
        global_name: required_attr(node, "global_name", &context)?.to_string(),
        channel: channel.trim().parse().map_err(|_| {
            CorpusError::parse(&context, format!("invalid channel {:?}", channel))
        })?,
        label,
    })
}
