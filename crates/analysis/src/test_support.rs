use std::collections::VecDeque;

use chess_core::Position;

use crate::evaluator::{Evaluation, EvaluatorError, MoveEvaluator, Score};

/// Replays a fixed list of scores and records every position it was asked
/// about. Runs out into `Score::None`.
#[derive(Default)]
pub struct ScriptedEvaluator {
    pub scores: VecDeque<Score>,
    pub seen_fens: Vec<String>,
    pub new_games: usize,
    /// Fail on the n-th evaluation (0-based) with a closed-pipe error.
    pub fail_at: Option<usize>,
}

impl ScriptedEvaluator {
    pub fn new(scores: impl IntoIterator<Item = Score>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn centipawns(values: &[i32]) -> Self {
        Self::new(values.iter().map(|&cp| Score::Centipawns(cp)))
    }
}

impl MoveEvaluator for ScriptedEvaluator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn new_game(&mut self) -> Result<(), EvaluatorError> {
        self.new_games += 1;
        Ok(())
    }

    fn evaluate(&mut self, pos: &Position) -> Result<Evaluation, EvaluatorError> {
        if self.fail_at == Some(self.seen_fens.len()) {
            return Err(EvaluatorError::Closed("bestmove"));
        }
        self.seen_fens.push(pos.to_fen());
        let score = self.scores.pop_front().unwrap_or(Score::None);
        Ok(Evaluation::from_score(score))
    }
}
