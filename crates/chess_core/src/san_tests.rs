use super::*;
use crate::uci::move_to_uci;

fn fen(text: &str) -> Position {
    Position::from_fen(text).expect("valid FEN")
}

fn san_to_uci(pos: &Position, san: &str) -> String {
    move_to_uci(parse_san(pos, san).expect("legal SAN"))
}

#[test]
fn test_parse_basic_moves() {
    let pos = Position::startpos();
    assert_eq!(san_to_uci(&pos, "e4"), "e2e4");
    assert_eq!(san_to_uci(&pos, "Nf3"), "g1f3");
    assert_eq!(san_to_uci(&pos, "Nc3!?"), "b1c3");
}

#[test]
fn test_parse_castling_both_notations() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let short = parse_san(&pos, "O-O").unwrap();
    assert!(short.is_castle);
    assert_eq!(move_to_uci(short), "e1g1");
    assert_eq!(san_to_uci(&pos, "0-0-0"), "e1c1");
}

#[test]
fn test_parse_disambiguation() {
    // Knights on b1 and f3 both reach d2.
    let pos = fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
    assert_eq!(
        parse_san(&pos, "Nd2").unwrap_err(),
        SanError::Ambiguous("Nd2".to_string())
    );
    assert_eq!(san_to_uci(&pos, "Nbd2"), "b1d2");
    assert_eq!(san_to_uci(&pos, "Nfd2"), "f3d2");
}

#[test]
fn test_parse_promotion_and_en_passant() {
    let pos = fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
    let promo = parse_san(&pos, "a8=Q+").unwrap();
    assert_eq!(promo.promo, Some(PieceKind::Queen));
    assert_eq!(san_to_uci(&pos, "a8N"), "a7a8n");

    let ep = fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 2");
    let mv = parse_san(&ep, "dxe6").unwrap();
    assert!(mv.is_en_passant);
}

#[test]
fn test_parse_rejects_illegal_and_garbage() {
    let pos = Position::startpos();
    assert!(matches!(parse_san(&pos, "e5"), Err(SanError::Illegal(_))));
    assert!(matches!(parse_san(&pos, "Ke2"), Err(SanError::Illegal(_))));
    assert!(matches!(parse_san(&pos, "Zz9"), Err(SanError::Malformed(_))));
    assert_eq!(parse_san(&pos, "  "), Err(SanError::Empty));
}

#[test]
fn test_move_to_san_suffixes_and_disambiguation() {
    let pos = fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
    let mv = parse_san(&pos, "Nbd2").unwrap();
    assert_eq!(move_to_san(&pos, mv), "Nbd2");

    let mate = fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
    let mv = parse_san(&mate, "Qh4").unwrap();
    assert_eq!(move_to_san(&mate, mv), "Qh4#");

    let start = Position::startpos();
    let mv = parse_san(&start, "e4").unwrap();
    assert_eq!(move_to_san(&start, mv), "e4");
}

#[test]
fn test_move_to_san_round_trips_every_legal_move() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    for mv in legal_moves(&pos) {
        let san = move_to_san(&pos, mv);
        assert_eq!(parse_san(&pos, &san), Ok(mv), "SAN {san}");
    }
}
