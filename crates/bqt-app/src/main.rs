// ABOUTME: Command line entry point for bouquet.
// ABOUTME: Loads .bqt files, prints regions and cuts, and resizes frames along their cuts.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bqt_core::Settings;
use bqt_layout::{Axis, Frame};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use report::{FrameReport, Sections};

#[derive(Parser)]
#[command(name = "bouquet")]
#[command(about = "Inspect and resize plain-text layout frames")]
struct Cli {
    /// Settings file (defaults to ~/.config/bouquet/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the regions of each frame
    Regions {
        file: PathBuf,
        /// Only show this frame
        #[arg(long)]
        frame: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the cuts of each frame
    Cuts {
        file: PathBuf,
        #[arg(long)]
        frame: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Grow or shrink a frame along its cuts
    Resize {
        file: PathBuf,
        #[arg(long)]
        frame: String,
        /// Rows to add (negative removes)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        rows: i64,
        /// Columns to add (negative removes)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        columns: i64,
        #[arg(long)]
        json: bool,
    },
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::load_or_default()),
    }
}

fn load(file: &Path, settings: &Settings, only: Option<&str>) -> Result<Vec<Frame>> {
    let frames = bqt_loader::load_frames(file, settings)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let Some(name) = only else {
        return Ok(frames);
    };
    let selected: Vec<Frame> = frames.into_iter().filter(|f| f.name() == name).collect();
    if selected.is_empty() {
        bail!("No frame named {:?} in {}", name, file.display());
    }
    Ok(selected)
}

fn print(frames: &[Frame], sections: Sections, json: bool) -> Result<()> {
    let reports: Vec<FrameReport> = frames.iter().map(|f| FrameReport::new(f, sections)).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.to_text());
        }
    }
    Ok(())
}

fn resize(frame: &mut Frame, axis: Axis, delta: i64) -> Result<()> {
    if delta == 0 {
        return Ok(());
    }
    if let Err(e) = frame.resize(axis, delta) {
        tracing::warn!(frame = frame.name(), ?axis, delta, "resize rejected: {}", e);
        return Err(e).with_context(|| {
            format!("Cannot resize {:?} by {} {:?}", frame.name(), delta, axis)
        });
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    tracing::debug!(?settings, "using settings");

    match cli.command {
        Commands::Regions { file, frame, json } => {
            let frames = load(&file, &settings, frame.as_deref())?;
            print(
                &frames,
                Sections {
                    regions: true,
                    cuts: false,
                },
                json,
            )
        }
        Commands::Cuts { file, frame, json } => {
            let frames = load(&file, &settings, frame.as_deref())?;
            print(
                &frames,
                Sections {
                    regions: false,
                    cuts: true,
                },
                json,
            )
        }
        Commands::Resize {
            file,
            frame,
            rows,
            columns,
            json,
        } => {
            let mut frames = load(&file, &settings, Some(frame.as_str()))?;
            for f in &mut frames {
                resize(f, Axis::Rows, rows)?;
                resize(f, Axis::Columns, columns)?;
            }
            print(
                &frames,
                Sections {
                    regions: true,
                    cuts: true,
                },
                json,
            )
        }
    }
}
