//! Chess rules needed to replay recorded games: positions, legal move
//! generation, FEN, SAN and PGN.

pub mod board;
pub mod movegen;
pub mod pgn;
pub mod san;
pub mod types;
pub mod uci;

pub use board::*;
pub use movegen::*;
pub use pgn::{Game, PgnError, read_games};
pub use san::{SanError, move_to_san, parse_san};
pub use types::*;
pub use uci::*;
