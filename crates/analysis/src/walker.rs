//! Game walker: replays a game and collects losses for one side.

use chess_core::{move_to_san, Color, Game};
use serde::Serialize;

use crate::evaluator::{EvaluatorError, MoveEvaluator};

/// Losses gathered for the designated side across one or more games.
///
/// `total_moves` counts every designated-side move, including those whose
/// evaluation was a mate score or missing; `losses` only holds finite scores.
/// So `total_moves >= losses.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideLosses {
    pub losses: Vec<f64>,
    pub total_moves: u32,
}

impl SideLosses {
    pub fn scored_moves(&self) -> usize {
        self.losses.len()
    }

    pub fn append(&mut self, other: SideLosses) {
        self.losses.extend(other.losses);
        self.total_moves += other.total_moves;
    }
}

/// Replays `game` from its start position. Each position where `side` is to
/// move is evaluated before the move is applied.
pub fn walk_game(
    game: &Game,
    side: Color,
    evaluator: &mut dyn MoveEvaluator,
) -> Result<SideLosses, EvaluatorError> {
    let mut collected = SideLosses::default();

    for (ply, (pos, mv)) in game.replay().enumerate() {
        if pos.side_to_move != side {
            continue;
        }
        collected.total_moves += 1;

        let evaluation = evaluator.evaluate(&pos)?;
        let loss = evaluation.score.loss();
        if let Some(loss) = loss {
            collected.losses.push(loss);
        }

        tracing::debug!(
            ply = ply + 1,
            played = %move_to_san(&pos, mv),
            score = ?evaluation.score,
            depth = ?evaluation.depth,
            loss,
            "evaluated move"
        );
    }

    Ok(collected)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod walker_tests;
