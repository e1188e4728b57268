//! Long algebraic (UCI) move notation.

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter().to_ascii_lowercase());
    }
    s
}

/// Resolves `e2e4`/`e7e8q` against the legal moves of `pos`, so castling and
/// en-passant flags come out right. `0000` and `(none)` yield `None`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => Some(PieceKind::from_letter(ch).filter(|k| {
            !matches!(k, PieceKind::Pawn | PieceKind::King)
        })?),
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}
