pub mod input;
pub mod output;
pub mod roster;
pub mod segments;
pub mod words;

pub use input::{read_annotation_file, CorpusLayout, NITE_NAMESPACE};
pub use output::{
    format_rttm, format_rttm_line, parse_rttm_line, write_rttm, HumanTranscript,
    MachineTranscript, RttmConfig, RttmRecord, TranscriptMetadata,
};
pub use roster::{parse_roster_file, parse_roster_xml};
pub use segments::{parse_segments_file, parse_segments_xml};
pub use words::{parse_words_file, parse_words_xml};
