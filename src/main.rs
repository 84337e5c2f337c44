use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;

use mood::format;
use mood::intake;
use mood::models::AnalysisEvent;
use mood::session::{self, Session};

#[derive(Parser)]
#[command(name = "mood", about = "Emotion analysis meter for audio files")]
struct Cli {
    /// Audio file to analyze (a directory with --tui)
    path: String,

    /// Output as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Launch the interactive TUI on a directory of audio files
    #[arg(long)]
    tui: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = Path::new(&cli.path);

    if cli.tui {
        if !path.is_dir() {
            anyhow::bail!("--tui expects a directory of audio files");
        }
        return mood::tui::run(path);
    }

    if path.is_dir() {
        anyhow::bail!(
            "'{}' is a directory (use --tui to browse it)",
            path.display()
        );
    }

    let metadata = intake::submit(path)?;
    eprintln!(
        "Analyzing {} ({}) ...",
        metadata.name,
        format::format_file_size(metadata.byte_size)
    );

    let mut session = Session::new();
    session.select(metadata.clone());

    let (tx, rx) = mpsc::channel::<AnalysisEvent>();
    session.begin_analysis(&tx, session::ANALYSIS_DELAY)?;

    let result = match rx.recv().context("analysis thread exited unexpectedly")? {
        AnalysisEvent::Completed { result, .. } => result,
    };

    if cli.json {
        println!("{}", format::format_json(&metadata, &result));
    } else {
        println!("{}", format::format_report(&metadata, &result));
    }

    Ok(())
}
