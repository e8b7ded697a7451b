pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use error::{CorpusError, CorpusResult, ErrorKind, ExtractError};
pub use io::{
    format_rttm, parse_roster_file, parse_segments_file, parse_words_file, CorpusLayout,
    RttmConfig,
};
pub use models::{
    parse_boundary_ref, BoundaryRef, Meeting, MeetingInfo, Roster, SegmentBoundary, Speaker,
    Turn, Utterance, WordEntry, WordTimeline,
};
pub use pipeline::{
    analyze_meeting, load_roster, process_corpus, process_meeting, CorpusReport, ExtractConfig,
    MeetingStats,
};
pub use stages::{execute_stage3, merge_turns, reconstruct_utterances, Stage3Config};
