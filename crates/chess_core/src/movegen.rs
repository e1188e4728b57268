use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// True when the side to move has no legal reply and is in check.
pub fn is_checkmate(pos: &Position) -> bool {
    pos.in_check(pos.side_to_move) && legal_moves(pos).is_empty()
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(p) if p.color == pos.side_to_move => p,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, pc.color, &DIAGONALS, out);
                gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, pc.color, &KING_DELTAS, out);
                gen_castle(pos, from, pc.color, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTIONS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

struct CastlePath {
    king_from: u8,
    king_to: u8,
    must_be_empty: &'static [u8],
    must_be_safe: &'static [u8],
}

// Indexed by color: king side first, then queen side.
const CASTLE_PATHS: [[CastlePath; 2]; 2] = [
    [
        CastlePath {
            king_from: 4,
            king_to: 6,
            must_be_empty: &[5, 6],
            must_be_safe: &[5, 6],
        },
        CastlePath {
            king_from: 4,
            king_to: 2,
            must_be_empty: &[3, 2, 1],
            must_be_safe: &[3, 2],
        },
    ],
    [
        CastlePath {
            king_from: 60,
            king_to: 62,
            must_be_empty: &[61, 62],
            must_be_safe: &[61, 62],
        },
        CastlePath {
            king_from: 60,
            king_to: 58,
            must_be_empty: &[59, 58, 57],
            must_be_safe: &[59, 58],
        },
    ],
];

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    // Can't castle out of check; transit squares are checked below.
    if pos.in_check(c) {
        return;
    }
    let rights = match c {
        Color::White => [pos.castling.wk, pos.castling.wq],
        Color::Black => [pos.castling.bk, pos.castling.bq],
    };
    let enemy = c.other();
    for (path, allowed) in CASTLE_PATHS[c.idx()].iter().zip(rights) {
        if !allowed || from != path.king_from {
            continue;
        }
        if path.must_be_empty.iter().all(|&s| pos.piece_at(s).is_none())
            && path
                .must_be_safe
                .iter()
                .all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(path.king_from, path.king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
