use std::path::{Path, PathBuf};

use crate::error::{CorpusError, CorpusResult};

/// Namespace of NXT-specific attributes such as `nite:id`
pub const NITE_NAMESPACE: &str = "http://nite.sourceforge.net/";

/// Where annotation files live inside a corpus directory
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    /// Directory of `{meeting}.{speaker}.words.xml` files
    pub words_dir: PathBuf,
    /// Directory of `{meeting}.{speaker}.segments.xml` files
    pub segments_dir: PathBuf,
    /// Meeting roster document
    pub roster_path: PathBuf,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            words_dir: PathBuf::from("words"),
            segments_dir: PathBuf::from("segments"),
            roster_path: PathBuf::from("corpusResources").join("meetings.xml"),
        }
    }
}

impl CorpusLayout {
    pub fn words_file(&self, root: &Path, meeting_id: &str, speaker: &str) -> PathBuf {
        root.join(&self.words_dir)
            .join(format!("{}.{}.words.xml", meeting_id, speaker))
    }

    pub fn segments_file(&self, root: &Path, meeting_id: &str, speaker: &str) -> PathBuf {
        root.join(&self.segments_dir)
            .join(format!("{}.{}.segments.xml", meeting_id, speaker))
    }

    pub fn roster_file(&self, root: &Path) -> PathBuf {
        root.join(&self.roster_path)
    }
}

/// Read an annotation file, reporting a missing file before anything else
pub fn read_annotation_file(path: &Path) -> CorpusResult<String> {
    if !path.is_file() {
        return Err(CorpusError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_document(&bytes, &path.display().to_string())
}

/// Decode raw XML bytes according to the encoding named in its declaration.
///
/// NXT corpora declare ISO-8859-1; anything without a declaration is UTF-8.
pub fn decode_document(bytes: &[u8], context: &str) -> CorpusResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match declared_encoding(bytes).as_deref() {
        None | Some("utf-8") | Some("utf8") | Some("us-ascii") | Some("ascii") => {
            String::from_utf8(bytes.to_vec()).map_err(|e| {
                CorpusError::parse(
                    context,
                    format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
                )
            })
        }
        // Latin-1 maps each byte to the code point of the same value
        Some("iso-8859-1") | Some("iso8859-1") | Some("iso_8859-1") | Some("latin1")
        | Some("latin-1") | Some("l1") => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        Some(other) => Err(CorpusError::parse(
            context,
            format!("unsupported encoding {:?}", other),
        )),
    }
}

/// Lowercased `encoding` pseudo-attribute of the `<?xml ...?>` declaration
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&rest[..end]).ok()?;

    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let close = value.find(quote)?;
    Some(value[..close].trim().to_ascii_lowercase())
}

/// Parse XML text, attributing syntax errors to `path`
pub(crate) fn parse_document<'a>(
    xml: &'a str,
    path: &Path,
) -> CorpusResult<roxmltree::Document<'a>> {
    roxmltree::Document::parse(xml).map_err(|source| CorpusError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Element children of a node, skipping text and comments
pub(crate) fn element_children<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

pub(crate) fn required_attr<'a>(
    node: roxmltree::Node<'a, '_>,
    name: &str,
    context: &str,
) -> CorpusResult<&'a str> {
    node.attribute(name)
        .ok_or_else(|| CorpusError::parse(context, format!("missing attribute '{}'", name)))
}

pub(crate) fn parse_seconds(value: &str, name: &str, context: &str) -> CorpusResult<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        CorpusError::parse(context, format!("invalid number {:?} in '{}'", value, name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = CorpusLayout::default();
        let root = Path::new("/data/ami");
        assert_eq!(
            layout.words_file(root, "IS1000a", "D"),
            PathBuf::from("/data/ami/words/IS1000a.D.words.xml")
        );
        assert_eq!(
            layout.segments_file(root, "IS1000a", "D"),
            PathBuf::from("/data/ami/segments/IS1000a.D.segments.xml")
        );
        assert_eq!(
            layout.roster_file(root),
            PathBuf::from("/data/ami/corpusResources/meetings.xml")
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_annotation_file(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, CorpusError::NotFound { .. }));
    }

    #[test]
    fn test_latin1_file_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("M.A.words.xml");
        let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>
<root><w>caf"#
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</w></root>");
        std::fs::write(&path, bytes).unwrap();

        let text = read_annotation_file(&path).unwrap();
        assert!(text.contains("caf\u{e9}"));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = decode_document(b"<root>caf\xE9</root>", "M.A.words.xml").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
        assert!(err.to_string().contains("invalid UTF-8 at byte 9"));

        let err = decode_document(
            b"<?xml version='1.0' encoding='Shift_JIS'?><root/>",
            "M.A.words.xml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported encoding"));
    }

    #[test]
    fn test_declared_encoding() {
        assert_eq!(
            declared_encoding(b"<?xml version=\"1.0\" encoding = 'UTF-8'?><a/>").as_deref(),
            Some("utf-8")
        );
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><a/>"), None);
        assert_eq!(declared_encoding(b"<a/>"), None);
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds(" 12.5 ", "starttime", "w1").unwrap(), 12.5);
        let err = parse_seconds("abc", "starttime", "w1").unwrap_err();
        assert!(err.to_string().contains("starttime"));
    }
}
