use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExtractError;
use crate::io::{write_rttm, HumanTranscript, MachineTranscript, RttmConfig};
use crate::models::Meeting;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Write `<meeting>.rttm`
    pub generate_rttm: bool,
    /// Write `<meeting>.json`
    pub generate_machine: bool,
    /// Write `<meeting>.txt`
    pub generate_human: bool,
    pub rttm: RttmConfig,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_rttm: true,
            generate_machine: false,
            generate_human: false,
            rttm: RttmConfig::default(),
        }
    }
}

/// Files written for one meeting
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub rttm_path: Option<PathBuf>,
    pub machine_path: Option<PathBuf>,
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: write the meeting's outputs into `output_dir`
///
/// Turns are written in the order they were merged.
pub fn execute_stage3(
    meeting: &Meeting,
    output_dir: &Path,
    config: &Stage3Config,
) -> Result<Stage3Result, ExtractError> {
    let mut result = Stage3Result::default();

    if config.generate_rttm {
        let path = output_dir.join(format!("{}.rttm", meeting.id));
        info!("Writing RTTM to {:?}", path);
        write_rttm(meeting, &path, &config.rttm)?;
        result.rttm_path = Some(path);
    }

    if config.generate_machine {
        let path = output_dir.join(format!("{}.json", meeting.id));
        info!("Writing machine transcript to {:?}", path);
        MachineTranscript::from_meeting(meeting).write_json(&path)?;
        result.machine_path = Some(path);
    }

    if config.generate_human {
        let path = output_dir.join(format!("{}.txt", meeting.id));
        info!("Writing human transcript to {:?}", path);
        HumanTranscript::new(meeting).write_file(&path)?;
        result.human_path = Some(path);
    }

    Ok(result)
}
