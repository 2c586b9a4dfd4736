//! PGN analysis CLI
//!
//! Evaluates every move of every game in a PGN file with a UCI engine, optionally
//! writes the flat result table as CSV, and prints one game's table.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pgn_analysis::analysis::rows;
use pgn_analysis::export::{format_table, write_csv};
use pgn_analysis::{analyse_pgn, EngineConfig};

#[derive(Parser, Debug)]
#[command(name = "pgn-analyze", about = "Evaluate every move of a PGN file with a UCI engine")]
struct Args {
    /// PGN file to analyse
    pgn_file: PathBuf,

    /// Path to the UCI engine executable (overrides STOCKFISH_PATH)
    #[arg(long)]
    engine: Option<String>,

    /// Search depth per position (overrides ANALYSIS_DEPTH)
    #[arg(long)]
    depth: Option<u32>,

    /// Write the full result table for all games to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Game to print, counted from 0
    #[arg(long, default_value_t = 0)]
    game: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(engine) = args.engine {
        config.engine_path = engine;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    config.validate()?;

    let bytes = fs::read(&args.pgn_file)
        .with_context(|| format!("Failed to read {}", args.pgn_file.display()))?;
    let pgn = String::from_utf8_lossy(&bytes);

    let records = analyse_pgn(&config, &pgn).await?;
    if records.is_empty() {
        println!("No games found in {}", args.pgn_file.display());
        return Ok(());
    }

    if let Some(path) = &args.csv {
        let table = rows(&records);
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(&table, BufWriter::new(file))?;
        info!(path = %path.display(), rows = table.len(), "CSV written");
    }

    let game = records.get(args.game).with_context(|| {
        format!("Game {} out of range, file has {} games", args.game, records.len())
    })?;

    let title = if game.game_id.is_empty() { "(unnamed)" } else { game.game_id.as_str() };
    println!("Game {}: {}", game.game_index, title);
    print!("{}", format_table(&game.rows().collect::<Vec<_>>()));
    if let Some(p) = game.final_win_probability() {
        println!("Final win probability for White: {:.1}%", p * 100.0);
    }

    Ok(())
}
