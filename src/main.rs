use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ami_rttm::{
    analyze_meeting, execute_stage3, load_roster, process_corpus, ExtractConfig, Stage3Config,
};

#[derive(Parser)]
#[command(name = "ami-rttm")]
#[command(author, version, about = "Extract transcripts and RTTM from AMI annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one RTTM file (and optional transcripts) per meeting
    Extract {
        /// AMI annotation directory (contains words/, segments/, corpusResources/)
        annotation_dir: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Also write a JSON transcript per meeting
        #[arg(long)]
        json: bool,

        /// Also write a human-readable transcript per meeting
        #[arg(long)]
        human_readable: bool,

        /// Only process these meetings
        #[arg(short, long = "meeting")]
        meetings: Vec<String>,

        /// Number of meetings processed in parallel
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report per-meeting annotation statistics without writing anything
    Analyze {
        /// AMI annotation directory
        annotation_dir: PathBuf,

        /// Only analyze these meetings
        #[arg(short, long = "meeting")]
        meetings: Vec<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            annotation_dir,
            output,
            json,
            human_readable,
            meetings,
            jobs,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = ExtractConfig {
                meeting_ids: meetings,
                ..Default::default()
            };
            if let Some(jobs) = jobs {
                config.jobs = jobs;
            }
            let render = Stage3Config {
                generate_machine: json,
                generate_human: human_readable,
                ..Default::default()
            };
            extract(annotation_dir, output, config, render).await
        }
        Commands::Analyze {
            annotation_dir,
            meetings,
            verbose,
        } => {
            setup_logging(verbose);
            let config = ExtractConfig {
                meeting_ids: meetings,
                ..Default::default()
            };
            analyze(annotation_dir, config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn extract(
    annotation_dir: PathBuf,
    output: PathBuf,
    config: ExtractConfig,
    render: Stage3Config,
) -> Result<()> {
    info!("Loading annotations from {:?}", annotation_dir);
    let report = process_corpus(&annotation_dir, &config).await?;

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;

    let mut total_turns = 0;
    for meeting in &report.meetings {
        execute_stage3(meeting, &output, &render)
            .with_context(|| format!("Failed to write outputs for {}", meeting.id))?;
        total_turns += meeting.turns.len();
    }

    info!(
        "Complete: {} meetings, {} turns written to {:?}",
        report.meetings.len(),
        total_turns,
        output
    );

    if !report.is_complete() {
        for failure in &report.failures {
            warn!("{}", failure);
        }
        bail!("{} meetings failed", report.failures.len());
    }

    Ok(())
}

fn analyze(annotation_dir: PathBuf, config: ExtractConfig) -> Result<()> {
    info!("Analyzing annotations in {:?}", annotation_dir);
    let roster = load_roster(&annotation_dir, &config)?;

    println!("Corpus Analysis");
    println!("===============");
    println!("Meetings in roster: {}", roster.len());
    println!();

    let mut failed = 0;
    for meeting in &roster.meetings {
        match analyze_meeting(&annotation_dir, &config.layout, meeting) {
            Ok(stats) => println!(
                "{} ({}): {} speakers, {} entries ({} gaps), {} segments, {} utterances, {:.1}s of speech",
                stats.meeting_id,
                meeting.meeting_type,
                stats.speakers,
                stats.timeline_entries,
                stats.gaps,
                stats.segments,
                stats.utterances,
                stats.speech_extent
            ),
            Err(e) => {
                failed += 1;
                println!("{}: FAILED ({:?}) {}", meeting.id, e.kind(), e);
            }
        }
    }

    if failed > 0 {
        println!();
        println!("{} of {} meetings failed", failed, roster.len());
    }

    Ok(())
}
