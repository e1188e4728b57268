//! Skill analysis for recorded chess games
//!
//! This crate turns a PGN file into a skill estimate:
//! - Replays every game and asks an external UCI engine to score each
//!   position where the analyzed side is to move
//! - Normalizes the per-move losses and clusters them into at most two groups
//! - Maps the mean centroid to a skill category with learning resources
//!
//! # Usage
//!
//! ```bash
//! cargo run -p skill_analysis -- games.pgn --color black --engine stockfish
//! ```

mod classifier;
mod cluster;
mod config;
mod evaluator;
mod guides;
mod pipeline;
mod report;
mod uci_engine;
mod walker;

#[cfg(test)]
mod test_support;

pub use classifier::*;
pub use cluster::*;
pub use config::*;
pub use evaluator::*;
pub use guides::*;
pub use pipeline::*;
pub use report::*;
pub use uci_engine::*;
pub use walker::*;
