//! Skill analysis CLI
//!
//! Analyze the games in a PGN file with a UCI engine and print the skill
//! category for one side.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skill_analysis::{analyze_pgn_file, parse_player_color, AnalyzerConfig};

#[derive(Parser)]
#[command(name = "skill-analyze")]
#[command(about = "Estimate playing strength from recorded games")]
struct Args {
    /// PGN file with one or more games
    pgn: PathBuf,

    /// Side to analyze (white or black)
    #[arg(long, short, default_value = "white")]
    color: String,

    /// UCI engine executable (overrides config and SKILL_ENGINE_PATH)
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Thinking time per position in milliseconds
    #[arg(long)]
    think_ms: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    config.apply_env();
    if let Some(engine) = args.engine {
        config.engine.program = engine;
    }
    if let Some(ms) = args.think_ms {
        config.engine.think_time_ms = ms;
    }
    config.validate()?;

    let side = parse_player_color(&args.color)?;
    let report = analyze_pgn_file(&args.pgn, side, &config)
        .with_context(|| format!("analysis of {} failed", args.pgn.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.generate_report());
    }
    Ok(())
}
