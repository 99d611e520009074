//! Command line tool for inspecting and converting Maro level files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use maro_core::{load_level, save_level, Level, LevelFormat};
use maro_editor::config::EditorConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "maro_level")]
#[command(about = "Inspect, create and convert Maro level files")]
#[command(version)]
struct Cli {
    /// Editor config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print grid size and tile counts
    Info { path: PathBuf },
    /// Convert between the JSON and legacy text formats (chosen by extension)
    Convert { input: PathBuf, output: PathBuf },
    /// Write a blank level
    New {
        path: PathBuf,
        #[arg(long, default_value_t = 20)]
        cols: u32,
        #[arg(long, default_value_t = 15)]
        rows: u32,
    },
    /// Resize a level, keeping the top-left region
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        cols: u32,
        #[arg(long)]
        rows: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let config = match &cli.config {
        Some(path) => EditorConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::load(),
    };

    match cli.command {
        Command::Info { path } => {
            let level = open(&path, &config)?;
            print_info(&path, &level);
        }
        Command::Convert { input, output } => {
            let level = open(&input, &config)?;
            write(&output, &level)?;
        }
        Command::New { path, cols, rows } => {
            let level = Level::with_limits(cols, rows, &config.limits)?;
            write(&path, &level)?;
        }
        Command::Resize {
            input,
            output,
            cols,
            rows,
        } => {
            let mut level = open(&input, &config)?;
            level.resize(cols, rows, &config.limits)?;
            write(&output, &level)?;
        }
    }
    Ok(())
}

fn open(path: &Path, config: &EditorConfig) -> Result<Level> {
    load_level(path, &config.limits).with_context(|| format!("Failed to load {}", path.display()))
}

fn write(path: &Path, level: &Level) -> Result<()> {
    save_level(path, level).with_context(|| format!("Failed to save {}", path.display()))
}

fn print_info(path: &Path, level: &Level) {
    let stats = level.stats();
    println!("{}", path.display());
    println!("  format:   {:?}", LevelFormat::from_path(path));
    println!("  size:     {}x{}", stats.cols, stats.rows);
    println!("  entities: {}", stats.entities);
    for (tile, count) in &stats.tiles {
        println!("  {:<8} '{}': {}", tile.display_name(), tile, count);
    }
}
