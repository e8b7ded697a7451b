use std::path::Path;

use tracing::{debug, trace};

use super::input::{
    element_children, parse_document, parse_seconds, read_annotation_file, required_attr,
};
use crate::error::{CorpusError, CorpusResult};
use crate::models::{parse_boundary_ref, BoundaryRef, SegmentBoundary};

/// Parse a speaker's segments file into range boundaries
pub fn parse_segments_file(path: &Path) -> CorpusResult<Vec<SegmentBoundary>> {
    let xml = read_annotation_file(path)?;
    let segments = parse_segments_str(&xml, path)?;
    debug!("Parsed {} range segments from {:?}", segments.len(), path);
    Ok(segments)
}

/// Parse segments XML text. Single-anchor segments are dropped.
pub fn parse_segments_xml(xml: &str) -> CorpusResult<Vec<SegmentBoundary>> {
    parse_segments_str(xml, Path::new("<memory>"))
}

fn parse_segments_str(xml: &str, source: &Path) -> CorpusResult<Vec<SegmentBoundary>> {
    let doc = parse_document(xml, source)?;
    let mut segments = Vec::new();

    for (position, node) in element_children(doc.root_element()).enumerate() {
        let context = format!("segment {}", position);

        let href = element_children(node)
            .next()
            .and_then(|child| child.attribute("href"))
            .ok_or_else(|| CorpusError::parse(&context, "missing word reference"))?;

        let (from, to) = match parse_boundary_ref(href) {
            BoundaryRef::Range { from, to } => (from, to),
            BoundaryRef::SingleAnchor => {
                trace!("Skipping single-anchor {}: {}", context, href);
                continue;
            }
            BoundaryRef::Malformed(reason) => {
                return Err(CorpusError::parse(context, reason.to_string()));
            }
        };

        let turn_start = parse_seconds(
            required_attr(node, "transcriber_start", &context)?,
            "transcriber_start",
            &context,
        )?;
        let turn_end = parse_seconds(
            required_attr(node, "transcriber_end", &context)?,
            "transcriber_end",
            &context,
        )?;

        segments.push(SegmentBoundary {
            turn_start,
            turn_end,
            from_word_index: from,
            to_word_index: to,
        });
    }

    Ok(segments)
}
