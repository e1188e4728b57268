use super::*;
use crate::uci::move_to_uci;

fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves = Vec::new();
    legal_moves_into(pos, &mut moves);
    let mut nodes = 0;
    for mv in moves {
        let undo = pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move(mv, undo);
    }
    nodes
}

fn fen(text: &str) -> Position {
    Position::from_fen(text).expect("valid FEN")
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    // Starting position has 20 legal moves
    assert_eq!(legal_moves(&pos).len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(legal_moves(&pos).len(), 48);
}

#[test]
fn test_perft_startpos_depth_3() {
    assert_eq!(perft(&mut Position::startpos(), 3), 8_902);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    let mut pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(perft(&mut pos, 2), 2_039);
}

#[test]
fn test_perft_en_passant_endgame() {
    let mut pos = fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -");
    assert_eq!(perft(&mut pos, 3), 2_812);
}

#[test]
fn test_perft_promotions() {
    let mut pos = fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(perft(&mut pos, 2), 264);
}

#[test]
fn test_make_unmake_restores_position() {
    let original = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let mut pos = original.clone();
    for mv in legal_moves(&original) {
        let undo = pos.make_move(mv);
        pos.unmake_move(mv, undo);
        assert_eq!(pos.to_fen(), original.to_fen(), "move {}", move_to_uci(mv));
    }
}

#[test]
fn test_checkmate_detection() {
    // Fool's mate
    let pos = fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(is_checkmate(&pos));
    assert!(!is_checkmate(&Position::startpos()));
}

#[test]
fn test_stalemate_has_no_moves_but_is_not_mate() {
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(!is_checkmate(&pos));
}
