use super::*;
use crate::{types::Color, uci::move_to_uci};

const SCHOLARS_MATE: &str = r#"[Event "Casual"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6?? 4. Qxf7# 1-0
"#;

#[test]
fn test_single_game_with_tags() {
    let games = read_games(SCHOLARS_MATE).unwrap();
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.tag("white"), Some("Alice"));
    assert_eq!(game.tag("Result"), Some("1-0"));
    assert_eq!(game.result.as_deref(), Some("1-0"));
    assert_eq!(game.moves.len(), 7);
    assert_eq!(move_to_uci(game.moves[6]), "h5f7");
}

#[test]
fn test_comments_variations_and_nags_are_skipped() {
    let text = "1. e4 {best by test} e5 (1... c5 2. Nf3 (2. c3) d6) 2. Nf3 $1 ; line comment\n\
                2... Nc6 3. Bb5 a6 *";
    let games = read_games(text).unwrap();
    assert_eq!(games.len(), 1);
    let uci: Vec<String> = games[0].moves.iter().map(|m| move_to_uci(*m)).collect();
    assert_eq!(uci, ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"]);
    assert_eq!(games[0].result.as_deref(), Some("*"));
}

#[test]
fn test_multiple_games_split_on_result_and_tags() {
    let text = format!("{SCHOLARS_MATE}\n[Event \"Second\"]\n\n1.d4 d5 2.c4 1/2-1/2\n\n[Event \"Third\"]\n1. Nf3");
    let games = read_games(&text).unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[1].tag("Event"), Some("Second"));
    assert_eq!(games[1].moves.len(), 3);
    assert_eq!(games[1].result.as_deref(), Some("1/2-1/2"));
    assert_eq!(games[2].moves.len(), 1);
    assert_eq!(games[2].result, None);
}

#[test]
fn test_fen_tag_sets_start_position() {
    let text = r#"[SetUp "1"]
[FEN "4k3/8/8/8/8/8/4P3/4K3 b - - 0 1"]

1... Kd7 2. e4 *"#;
    let games = read_games(text).unwrap();
    let game = &games[0];
    assert_eq!(game.start.side_to_move, Color::Black);
    assert_eq!(game.moves.len(), 2);

    let sides: Vec<Color> = game.replay().map(|(pos, _)| pos.side_to_move).collect();
    assert_eq!(sides, [Color::Black, Color::White]);
}

#[test]
fn test_illegal_move_reports_game_and_ply() {
    let text = "[Event \"x\"]\n1. e4 e5 *\n\n[Event \"y\"]\n1. e4 e4 *";
    match read_games(text) {
        Err(PgnError::Move { game, ply, .. }) => {
            assert_eq!(game, 2);
            assert_eq!(ply, 2);
        }
        other => panic!("expected move error, got {other:?}"),
    }
}

#[test]
fn test_malformed_input() {
    assert!(matches!(
        read_games("[Event Casual]\n1. e4 *"),
        Err(PgnError::MalformedTag { game: 1, line: 1 })
    ));
    assert!(matches!(
        read_games("1. e4 { never closed"),
        Err(PgnError::UnterminatedComment { .. })
    ));
    assert!(matches!(
        read_games("1. e4 ) e5"),
        Err(PgnError::UnbalancedVariation { .. })
    ));
    assert!(matches!(
        read_games("[FEN \"bogus\"]\n*"),
        Err(PgnError::Fen { game: 1, .. })
    ));
}

#[test]
fn test_empty_input_has_no_games() {
    assert!(read_games("").unwrap().is_empty());
    assert!(read_games("\n  \n% escaped line\n").unwrap().is_empty());
}

#[test]
fn test_escaped_quotes_in_tag_values() {
    let games = read_games("[Annotator \"The \\\"Bot\\\"\"]\n*").unwrap();
    assert_eq!(games[0].tag("Annotator"), Some("The \"Bot\""));
}
