//! End-to-end replay of recorded games through the PGN reader.

use chess_core::{Color, Position, is_checkmate, move_to_san, read_games};

const OPERA_GAME: &str = r#"[Event "Paris Opera"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {This is a weak move already.} 4. dxe5 Bxf3
5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5
11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7
16. Qb8+ Nxb8 17. Rd8# 1-0
"#;

fn final_position(game: &chess_core::Game) -> Position {
    let mut pos = game.start.clone();
    for &mv in &game.moves {
        pos.make_move(mv);
    }
    pos
}

#[test]
fn test_opera_game_ends_in_mate() {
    let games = read_games(OPERA_GAME).expect("valid PGN");
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.moves.len(), 33);

    let pos = final_position(game);
    assert_eq!(pos.side_to_move, Color::Black);
    assert!(is_checkmate(&pos));
}

#[test]
fn test_replayed_san_matches_source_tokens() {
    let game = &read_games(OPERA_GAME).unwrap()[0];
    let san: Vec<String> = game
        .replay()
        .map(|(pos, mv)| move_to_san(&pos, mv))
        .collect();
    assert_eq!(san[0], "e4");
    assert_eq!(san[21], "Nbd7");
    assert_eq!(san[22], "O-O-O");
    assert_eq!(san[32], "Rd8#");
}

#[test]
fn test_white_moves_counted_per_side() {
    let game = &read_games(OPERA_GAME).unwrap()[0];
    let white = game
        .replay()
        .filter(|(pos, _)| pos.side_to_move == Color::White)
        .count();
    assert_eq!(white, 17);
    assert_eq!(game.moves.len() - white, 16);
}
