use super::*;
use crate::types::coord_to_sq;

fn sq(coord: &str) -> u8 {
    coord_to_sq(coord).unwrap()
}

fn from_fen(fen: &str) -> Position {
    StandardRules.position_from_fen(fen).unwrap()
}

#[test]
fn test_starting_position_basics() {
    let rules = StandardRules::new();
    let pos = rules.starting_position();

    assert_eq!(rules.side_to_move(&pos), Color::White);
    assert!(!rules.is_check(&pos));
    assert!(!rules.is_checkmate(&pos));
    assert!(!rules.is_draw(&pos));

    let king = rules.piece_at(&pos, sq("e1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(king.color, Color::White);
    assert_eq!(rules.piece_at(&pos, sq("e4")), None);
}

#[test]
fn test_pawn_targets_from_start() {
    let rules = StandardRules;
    let pos = rules.starting_position();

    let targets = rules.legal_moves_from(&pos, sq("e2"));
    let tos: Vec<u8> = targets.iter().map(|t| t.to).collect();
    assert_eq!(targets.len(), 2);
    assert!(tos.contains(&sq("e3")));
    assert!(tos.contains(&sq("e4")));
    assert!(targets.iter().all(|t| !t.requires_promotion));
}

#[test]
fn test_no_targets_for_wrong_side_or_empty_square() {
    let rules = StandardRules;
    let pos = rules.starting_position();

    // Black piece while White is to move
    assert!(rules.legal_moves_from(&pos, sq("e7")).is_empty());
    // Empty square
    assert!(rules.legal_moves_from(&pos, sq("d4")).is_empty());
    // Out of range
    assert!(rules.legal_moves_from(&pos, 64).is_empty());
}

#[test]
fn test_apply_rejects_illegal_move() {
    let rules = StandardRules;
    let pos = rules.starting_position();

    let err = rules.apply_move(&pos, sq("e2"), sq("e5"), None).unwrap_err();
    assert!(matches!(err, RulesError::IllegalMove { .. }));
}

#[test]
fn test_apply_and_undo_round_trip() {
    let rules = StandardRules;
    let pos = rules.starting_position();
    let start_fen = rules.fen(&pos);

    let applied = rules.apply_move(&pos, sq("e2"), sq("e4"), None).unwrap();
    assert_eq!(applied.captured, None);
    assert_eq!(applied.san, "e4");
    assert_eq!(rules.side_to_move(&applied.position), Color::Black);
    assert_ne!(rules.fen(&applied.position), start_fen);

    let reverted = rules.undo_ply(&applied.position).unwrap();
    assert_eq!(rules.fen(&reverted), start_fen);
}

#[test]
fn test_undo_at_game_start_is_unavailable() {
    let rules = StandardRules;
    let pos = rules.starting_position();
    assert!(matches!(
        rules.undo_ply(&pos),
        Err(RulesError::UndoUnavailable)
    ));
}

#[test]
fn test_capture_is_reported() {
    let rules = StandardRules;
    let pos = rules.starting_position();
    let pos = rules.apply_move(&pos, sq("e2"), sq("e4"), None).unwrap().position;
    let pos = rules.apply_move(&pos, sq("d7"), sq("d5"), None).unwrap().position;

    let applied = rules.apply_move(&pos, sq("e4"), sq("d5"), None).unwrap();
    assert_eq!(applied.captured, Some(PieceKind::Pawn));
    assert_eq!(applied.san, "exd5");
}

#[test]
fn test_en_passant_reports_captured_pawn() {
    let rules = StandardRules;
    let pos = from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");

    let targets = rules.legal_moves_from(&pos, sq("e5"));
    assert!(targets.iter().any(|t| t.to == sq("d6")));

    let applied = rules.apply_move(&pos, sq("e5"), sq("d6"), None).unwrap();
    assert_eq!(applied.captured, Some(PieceKind::Pawn));
    assert_eq!(applied.san, "exd6");
    // The passed pawn is gone even though the destination was empty
    assert_eq!(rules.piece_at(&applied.position, sq("d5")), None);
}

#[test]
fn test_castling_surfaced_as_two_file_king_move() {
    let rules = StandardRules;
    let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    let tos: Vec<u8> = rules
        .legal_moves_from(&pos, sq("e1"))
        .iter()
        .map(|t| t.to)
        .collect();
    assert!(tos.contains(&sq("g1")), "kingside castle missing");
    assert!(tos.contains(&sq("c1")), "queenside castle missing");
    // The raw king-onto-rook encoding must not leak through
    assert!(!tos.contains(&sq("h1")));
    assert!(!tos.contains(&sq("a1")));
}

#[test]
fn test_castling_moves_king_and_rook() {
    let rules = StandardRules;
    let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

    let applied = rules.apply_move(&pos, sq("e1"), sq("g1"), None).unwrap();
    assert_eq!(applied.captured, None, "own rook is not a capture");
    assert_eq!(applied.san, "O-O");

    let king = rules.piece_at(&applied.position, sq("g1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    let rook = rules.piece_at(&applied.position, sq("f1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert_eq!(rules.piece_at(&applied.position, sq("e1")), None);
    assert_eq!(rules.piece_at(&applied.position, sq("h1")), None);
}

#[test]
fn test_queenside_castle_san() {
    let rules = StandardRules;
    let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let applied = rules.apply_move(&pos, sq("e1"), sq("c1"), None).unwrap();
    assert_eq!(applied.san, "O-O-O");
}

#[test]
fn test_promotion_is_flagged_and_applied() {
    let rules = StandardRules;
    let pos = from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");

    let targets = rules.legal_moves_from(&pos, sq("a7"));
    let advance = targets.iter().find(|t| t.to == sq("a8")).unwrap();
    assert!(advance.requires_promotion);

    let applied = rules
        .apply_move(&pos, sq("a7"), sq("a8"), Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(applied.san, "a8=N");
    let piece = rules.piece_at(&applied.position, sq("a8")).unwrap();
    assert_eq!(piece.kind, PieceKind::Knight);
    assert_eq!(piece.color, Color::White);
}

#[test]
fn test_promotion_defaults_to_queen() {
    let rules = StandardRules;
    let pos = from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let applied = rules.apply_move(&pos, sq("a7"), sq("a8"), None).unwrap();
    assert_eq!(applied.san, "a8=Q");
    let piece = rules.piece_at(&applied.position, sq("a8")).unwrap();
    assert_eq!(piece.kind, PieceKind::Queen);
}

#[test]
fn test_fools_mate_is_checkmate() {
    let rules = StandardRules;
    let pos = from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(rules.is_check(&pos));
    assert!(rules.is_checkmate(&pos));
    assert!(!rules.is_draw(&pos));
    assert!(rules.legal_moves_from(&pos, sq("e1")).is_empty());
}

#[test]
fn test_stalemate_is_a_draw() {
    let rules = StandardRules;
    // Black king cornered on a8, not in check, no legal moves
    let pos = from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(rules.is_draw(&pos));
    assert!(!rules.is_check(&pos));
    assert!(!rules.is_checkmate(&pos));
}

#[test]
fn test_fifty_move_rule_is_a_draw() {
    let rules = StandardRules;
    let pos = from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 100 80");
    assert!(rules.is_draw(&pos));
}

#[test]
fn test_insufficient_material() {
    let rules = StandardRules;
    // Bare kings
    assert!(rules.is_draw(&from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1")));
    // Lone minor piece
    assert!(rules.is_draw(&from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1")));
    // Same-shade bishops
    assert!(rules.is_draw(&from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1")));
    // Opposite-shade bishops can still mate
    assert!(!rules.is_draw(&from_fen("4kb2/8/8/8/8/8/8/4KB2 w - - 0 1")));
    // A queen is plenty
    assert!(!rules.is_draw(&from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")));
}

#[test]
fn test_threefold_repetition_is_a_draw() {
    let rules = StandardRules;
    let mut pos = rules.starting_position();

    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    for (from, to) in shuffle {
        pos = rules.apply_move(&pos, sq(from), sq(to), None).unwrap().position;
    }
    // Start position seen twice so far
    assert!(!rules.is_draw(&pos));

    for (from, to) in shuffle {
        pos = rules.apply_move(&pos, sq(from), sq(to), None).unwrap().position;
    }
    // Third occurrence
    assert!(rules.is_draw(&pos));
}

#[test]
fn test_fen_import_rejects_garbage() {
    let rules = StandardRules;
    assert!(matches!(
        rules.position_from_fen("not a position"),
        Err(RulesError::InvalidFen(_))
    ));
}

#[test]
fn test_fen_export_matches_import() {
    let rules = StandardRules;
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";
    let pos = from_fen(fen);
    assert_eq!(rules.fen(&pos), fen);
}
