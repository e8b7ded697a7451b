//! Error types for corpus parsing and extraction

use std::path::PathBuf;

use thiserror::Error;

/// Broad failure category, used when reporting which meetings failed and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    DataConsistency,
}

/// Errors raised while reading one annotation unit (a file, a speaker, a meeting)
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A required input file is absent
    #[error("{} is not found", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("Malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Missing attribute, bad number or bad boundary reference
    #[error("Parse error at {context}: {message}")]
    Parse { context: String, message: String },

    /// Segment indices that do not fit the speaker's word timeline
    #[error("Data consistency error: {0}")]
    DataConsistency(String),
}

impl CorpusError {
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Io { .. } => ErrorKind::NotFound,
            Self::Xml { .. } | Self::Parse { .. } => ErrorKind::Parse,
            Self::DataConsistency(_) => ErrorKind::DataConsistency,
        }
    }
}

/// Errors surfaced at the corpus boundary
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Cannot open annotation directory {}", .0.display())]
    AnnotationDirNotFound(PathBuf),

    #[error("Cannot load meeting roster: {0}")]
    Roster(#[source] CorpusError),

    #[error("Meeting {meeting_id} failed: {source}")]
    Meeting {
        meeting_id: String,
        #[source]
        source: CorpusError,
    },

    /// The worker processing a meeting panicked or was cancelled
    #[error("Meeting {meeting_id} worker {reason}")]
    Worker { meeting_id: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found = CorpusError::NotFound {
            path: PathBuf::from("words/IS1000a.A.words.xml"),
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(not_found.to_string().contains("IS1000a.A.words.xml"));

        let parse = CorpusError::parse("segment 3", "unknown boundary type");
        assert_eq!(parse.kind(), ErrorKind::Parse);
        assert_eq!(
            parse.to_string(),
            "Parse error at segment 3: unknown boundary type"
        );

        let consistency = CorpusError::DataConsistency("index 40 out of range".into());
        assert_eq!(consistency.kind(), ErrorKind::DataConsistency);
    }

    #[test]
    fn test_meeting_error_names_meeting() {
        let err = ExtractError::Meeting {
            meeting_id: "ES2002a".to_string(),
            source: CorpusError::parse("word w3", "invalid float"),
        };
        assert!(err.to_string().starts_with("Meeting ES2002a failed"));
    }
}
