//! Position evaluation seam.
//!
//! The walker only needs "how good is this position for the side to move";
//! where that answer comes from (an external UCI process, a scripted test
//! double) is behind [`MoveEvaluator`].

use std::io;

use chess_core::{Move, Position};
use serde::Serialize;
use thiserror::Error;

/// Engine verdict for one position, relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Score {
    /// Finite evaluation in centipawns.
    Centipawns(i32),
    /// Forced mate in N moves (negative when the side to move gets mated).
    Mate(i32),
    /// The engine reported no score for the position.
    None,
}

impl Score {
    /// Loss magnitude contributed by this score; only finite scores count.
    pub fn loss(self) -> Option<f64> {
        match self {
            Score::Centipawns(cp) => Some(f64::from(cp).abs()),
            Score::Mate(_) | Score::None => None,
        }
    }
}

/// Result of evaluating a single position.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: Score,
    /// Engine's preferred reply, when it named a legal one.
    pub best_move: Option<Move>,
    /// Deepest search depth reported alongside the score.
    pub depth: Option<u32>,
}

impl Evaluation {
    pub fn from_score(score: Score) -> Self {
        Self {
            score,
            best_move: None,
            depth: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("failed to start engine '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("engine closed its output while waiting for '{0}'")]
    Closed(&'static str),
    #[error("engine I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Trait implemented by everything that can score a position.
///
/// One evaluator instance serves a whole analysis run; `new_game` is called
/// before the first position of every game.
pub trait MoveEvaluator {
    /// Identification used in logs.
    fn name(&self) -> &str;

    /// Reset per-game state (hash tables, history).
    fn new_game(&mut self) -> Result<(), EvaluatorError> {
        Ok(())
    }

    /// Evaluate `pos` within the evaluator's time budget.
    fn evaluate(&mut self, pos: &Position) -> Result<Evaluation, EvaluatorError>;
}

/// Creates a fresh evaluator for each analysis run.
pub trait EvaluatorLauncher: Send + Sync {
    fn launch(&self) -> Result<Box<dyn MoveEvaluator>, EvaluatorError>;
}
