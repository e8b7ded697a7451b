use serde::{Deserialize, Serialize};

/// Annotator-marked speech segment, resolved to positions in the word timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBoundary {
    /// Annotator start time in seconds (not the word timing)
    pub turn_start: f64,
    /// Annotator end time in seconds
    pub turn_end: f64,
    /// First word position, inclusive
    pub from_word_index: usize,
    /// Last word position, inclusive
    pub to_word_index: usize,
}

/// Outcome of reading a segment's word reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryRef {
    /// `file#id(x)`: points at one anchor, carries no speech span
    SingleAnchor,
    /// `file#id(x)..id(y)`: inclusive range of word positions
    Range { from: usize, to: usize },
    Malformed(MalformedRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRef {
    /// More than two `..`-separated components
    UnknownBoundaryType { components: usize },
    /// A range end without a `words<digits>` suffix
    MissingWordIndex { token: String },
}

impl std::fmt::Display for MalformedRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBoundaryType { components } => {
                write!(f, "unknown boundary type ({} components)", components)
            }
            Self::MissingWordIndex { token } => {
                write!(f, "could not extract word index from {:?}", token)
            }
        }
    }
}

/// Parse an NXT href such as `IS1000a.D.words.xml#id(IS1000a.D.words24)..id(IS1000a.D.words30)`
pub fn parse_boundary_ref(href: &str) -> BoundaryRef {
    let id_part = href.rsplit('#').next().unwrap_or(href);
    let tokens: Vec<&str> = id_part.split("..").collect();

    match tokens.as_slice() {
        [_] => BoundaryRef::SingleAnchor,
        [from, to] => {
            let Some(from_index) = extract_word_index(from) else {
                return BoundaryRef::Malformed(MalformedRef::MissingWordIndex {
                    token: from.to_string(),
                });
            };
            let Some(to_index) = extract_word_index(to) else {
                return BoundaryRef::Malformed(MalformedRef::MissingWordIndex {
                    token: to.to_string(),
                });
            };
            BoundaryRef::Range {
                from: from_index,
                to: to_index,
            }
        }
        _ => BoundaryRef::Malformed(MalformedRef::UnknownBoundaryType {
            components: tokens.len(),
        }),
    }
}

/// First `words<digits>` occurrence in a token, as a number
fn extract_word_index(token: &str) -> Option<usize> {
    token.match_indices("words").find_map(|(pos, marker)| {
        let rest = &token[pos + marker.len()..];
        let digits_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_len == 0 {
            None
        } else {
            rest[..digits_len].parse().ok()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_reference() {
        let href = "IS1000a.D.words.xml#id(IS1000a.D.words24)..id(IS1000a.D.words30)";
        assert_eq!(
            parse_boundary_ref(href),
            BoundaryRef::Range { from: 24, to: 30 }
        );
    }

    #[test]
    fn test_single_anchor_reference() {
        let href = "IS1000a.D.words.xml#id(IS1000a.D.words24)";
        assert_eq!(parse_boundary_ref(href), BoundaryRef::SingleAnchor);
    }

    #[test]
    fn test_file_name_does_not_match_index() {
        // The `words.xml` file part has no digits after `words`
        assert_eq!(extract_word_index("ES2002a.B.words.xml"), None);
        assert_eq!(extract_word_index("id(ES2002a.B.words.xml.words7)"), Some(7));
    }

    #[test]
    fn test_missing_word_index() {
        let href = "IS1000a.D.words.xml#id(IS1000a.D.w24)..id(IS1000a.D.words30)";
        assert_eq!(
            parse_boundary_ref(href),
            BoundaryRef::Malformed(MalformedRef::MissingWordIndex {
                token: "id(IS1000a.D.w24)".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_boundary_type() {
        let href = "x.xml#id(a.words1)..id(a.words2)..id(a.words3)";
        assert_eq!(
            parse_boundary_ref(href),
            BoundaryRef::Malformed(MalformedRef::UnknownBoundaryType { components: 3 })
        );
    }
}
