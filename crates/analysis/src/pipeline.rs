//! End-to-end analysis: games in, skill report out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chess_core::{Color, Game, PgnError, read_games};
use thiserror::Error;

use crate::{
    classifier::Thresholds,
    cluster::{ClusterError, cluster_losses},
    config::AnalyzerConfig,
    evaluator::{EvaluatorError, EvaluatorLauncher, MoveEvaluator},
    report::AnalysisReport,
    uci_engine::UciLauncher,
    walker::{SideLosses, walk_game},
};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid PGN: {0}")]
    Pgn(#[from] PgnError),
    #[error("the upload contains no games")]
    NoGames,
    #[error("invalid player color '{0}', expected 'white' or 'black'")]
    InvalidColor(String),
    #[error(transparent)]
    Engine(#[from] EvaluatorError),
    #[error("insufficient data: {0}")]
    InsufficientData(#[from] ClusterError),
}

pub fn parse_player_color(text: &str) -> Result<Color, AnalysisError> {
    Color::from_name(text.trim()).ok_or_else(|| AnalysisError::InvalidColor(text.to_string()))
}

/// Number of moves `side` makes in `game`, without replaying it.
pub fn side_move_count(game: &Game, side: Color) -> usize {
    let plies = game.moves.len();
    if game.start.side_to_move == side {
        plies.div_ceil(2)
    } else {
        plies / 2
    }
}

/// Walks every game with one evaluator and classifies the pooled losses.
pub fn analyze_games(
    games: &[Game],
    side: Color,
    evaluator: &mut dyn MoveEvaluator,
    thresholds: &Thresholds,
) -> Result<AnalysisReport, AnalysisError> {
    let span = tracing::info_span!("analysis", side = side.name(), engine = evaluator.name());
    let _enter = span.enter();

    let mut collected = SideLosses::default();
    for (index, game) in games.iter().enumerate() {
        evaluator.new_game()?;
        let losses = walk_game(game, side, evaluator)?;
        tracing::info!(
            game = index + 1,
            white = game.tag("White").unwrap_or("?"),
            black = game.tag("Black").unwrap_or("?"),
            moves = losses.total_moves,
            scored = losses.scored_moves(),
            "game analyzed"
        );
        collected.append(losses);
    }

    let summary = cluster_losses(&collected.losses)?;
    let category = thresholds.classify(summary.representative);
    tracing::info!(
        total_moves = collected.total_moves,
        score = summary.representative,
        %category,
        "analysis complete"
    );

    Ok(AnalysisReport::assemble(
        collected.total_moves,
        summary.representative,
        category,
        side.name(),
        games.len(),
        collected.scored_moves(),
    ))
}

/// Parses `pgn`, launches one evaluator and analyzes every game.
///
/// Parsing happens before launch, so malformed input never starts an engine,
/// and neither does input where `side` never moves. The evaluator is dropped
/// (and its process released) before this returns, on success or error.
pub fn run_analysis(
    pgn: &str,
    side: Color,
    thresholds: &Thresholds,
    launcher: &dyn EvaluatorLauncher,
) -> Result<AnalysisReport, AnalysisError> {
    let games = read_games(pgn)?;
    if games.is_empty() {
        return Err(AnalysisError::NoGames);
    }
    if games.iter().all(|game| side_move_count(game, side) == 0) {
        return Err(ClusterError::NoMoves.into());
    }

    let mut evaluator = launcher.launch()?;
    analyze_games(&games, side, evaluator.as_mut(), thresholds)
}

/// Analyzes a PGN file with the configured UCI engine.
pub fn analyze_pgn_file(
    path: &Path,
    side: Color,
    config: &AnalyzerConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let text = fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "analyzing file");
    let launcher = UciLauncher::new(config.engine.clone());
    run_analysis(&text, side, &config.thresholds, &launcher)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
