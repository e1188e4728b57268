//! Standard Algebraic Notation, as found in PGN movetext.

use thiserror::Error;

use crate::{board::Position, movegen::legal_moves, types::*};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty move")]
    Empty,
    #[error("malformed move '{0}'")]
    Malformed(String),
    #[error("illegal move '{0}'")]
    Illegal(String),
    #[error("ambiguous move '{0}'")]
    Ambiguous(String),
}

/// Parsed shape of a SAN token before it is matched against legal moves.
#[derive(Debug, PartialEq, Eq)]
struct SanPattern {
    kind: PieceKind,
    from_file: Option<i8>,
    from_rank: Option<i8>,
    to: u8,
    promo: Option<PieceKind>,
}

fn strip_annotations(text: &str) -> &str {
    text.trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .trim_end_matches("e.p.")
        .trim_end()
}

fn parse_pattern(token: &str) -> Option<SanPattern> {
    let mut body = token.replace('x', "").replace('-', "");
    let mut promo = None;

    // Promotion: "e8=Q" or "e8Q".
    if let Some(last) = body.chars().last()
        && last.is_ascii_uppercase()
        && body.len() > 2
    {
        promo = Some(PieceKind::from_letter(last)?);
        body.pop();
        if body.ends_with('=') {
            body.pop();
        }
    }

    let (kind, rest) = match body.chars().next()? {
        c if c.is_ascii_uppercase() => (PieceKind::from_letter(c)?, &body[1..]),
        _ => (PieceKind::Pawn, body.as_str()),
    };
    if kind == PieceKind::Pawn && !rest.starts_with(|c: char| ('a'..='h').contains(&c)) {
        return None;
    }
    if rest.len() < 2 || !rest.is_ascii() {
        return None;
    }

    let (disambiguation, dest) = rest.split_at(rest.len() - 2);
    let to = coord_to_sq(dest)?;
    let mut from_file = None;
    let mut from_rank = None;
    for ch in disambiguation.chars() {
        match ch {
            'a'..='h' => from_file = Some((ch as u8 - b'a') as i8),
            '1'..='8' => from_rank = Some((ch as u8 - b'1') as i8),
            _ => return None,
        }
    }

    Some(SanPattern {
        kind,
        from_file,
        from_rank,
        to,
        promo,
    })
}

/// Resolves a SAN token such as `Nbd7`, `exd6`, `O-O-O` or `e8=Q+` to the
/// single legal move it denotes in `pos`.
pub fn parse_san(pos: &Position, text: &str) -> Result<Move, SanError> {
    let token = strip_annotations(text);
    if token.is_empty() {
        return Err(SanError::Empty);
    }
    let legal = legal_moves(pos);

    let castle_to = match token {
        "O-O" | "0-0" => Some(6),
        "O-O-O" | "0-0-0" => Some(2),
        _ => None,
    };
    if let Some(file) = castle_to {
        return legal
            .into_iter()
            .find(|m| m.is_castle && file_of(m.to) == file)
            .ok_or_else(|| SanError::Illegal(text.to_string()));
    }

    let pattern = parse_pattern(token).ok_or_else(|| SanError::Malformed(text.to_string()))?;
    let mut candidates = legal.into_iter().filter(|m| {
        m.to == pattern.to
            && !m.is_castle
            && m.promo == pattern.promo
            && pos.piece_at(m.from).map(|p| p.kind) == Some(pattern.kind)
            && pattern.from_file.is_none_or(|f| file_of(m.from) == f)
            && pattern.from_rank.is_none_or(|r| rank_of(m.from) == r)
    });

    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv),
        (Some(_), Some(_)) => Err(SanError::Ambiguous(text.to_string())),
        (None, _) => Err(SanError::Illegal(text.to_string())),
    }
}

/// Renders a legal move of `pos` in SAN, including check and mate suffixes.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut out = String::new();
    let Some(piece) = pos.piece_at(mv.from) else {
        return crate::uci::move_to_uci(mv);
    };

    if mv.is_castle {
        out.push_str(if file_of(mv.to) == 6 { "O-O" } else { "O-O-O" });
    } else {
        let capture = mv.is_en_passant || pos.piece_at(mv.to).is_some();
        if piece.kind == PieceKind::Pawn {
            if capture {
                out.push((b'a' + file_of(mv.from) as u8) as char);
            }
        } else {
            out.push(piece.kind.letter());
            out.push_str(&disambiguation(pos, mv, piece.kind));
        }
        if capture {
            out.push('x');
        }
        out.push_str(&sq_to_coord(mv.to));
        if let Some(promo) = mv.promo {
            out.push('=');
            out.push(promo.letter());
        }
    }

    let mut after = pos.clone();
    after.make_move(mv);
    if after.in_check(after.side_to_move) {
        out.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
    }
    out
}

fn disambiguation(pos: &Position, mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<u8> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
        })
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let coord = sq_to_coord(mv.from);
    if rivals.iter().all(|&s| file_of(s) != file_of(mv.from)) {
        coord[..1].to_string()
    } else if rivals.iter().all(|&s| rank_of(s) != rank_of(mv.from)) {
        coord[1..].to_string()
    } else {
        coord
    }
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
