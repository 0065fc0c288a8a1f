//! Oracle Tests
//!
//! Compares legal move sets and shallow perft counts with shakmaty. Only
//! from/to squares are compared, so a promotion counts once. Positions keep
//! their pawns on the starting ranks (or one step from promotion) because
//! "never moved" is judged from the game history.

use std::collections::BTreeSet;

use board_engine::chess::{parse_square, Chess, ChessColor, CoordinateMove, PieceKind, Placement};
use shakmaty::{fen::Fen, uci::UciMove, CastlingMode, Position};

fn from_fen(fen: &str) -> shakmaty::Chess {
    let f: Fen = fen.parse().unwrap();
    f.into_position(CastlingMode::Standard).unwrap()
}

fn engine_from(pos: &shakmaty::Chess) -> Chess {
    let placements: Vec<Placement> = pos
        .board()
        .clone()
        .into_iter()
        .map(|(square, piece)| {
            let c = piece.char();
            let color = if c.is_ascii_uppercase() {
                ChessColor::White
            } else {
                ChessColor::Black
            };
            let kind = PieceKind::from_char(c).unwrap();
            (kind, color, parse_square(&square.to_string()).unwrap())
        })
        .collect();
    let first = match pos.turn() {
        shakmaty::Color::White => ChessColor::White,
        shakmaty::Color::Black => ChessColor::Black,
    };
    let mut game = Chess::new();
    game.start_from_position(&placements, first).unwrap();
    game
}

fn oracle_moves(pos: &shakmaty::Chess) -> BTreeSet<String> {
    pos.legal_moves()
        .iter()
        .map(|mv| mv.to_uci(CastlingMode::Standard).to_string()[..4].to_string())
        .collect()
}

fn engine_moves(game: &mut Chess) -> BTreeSet<String> {
    game.all_legal_moves()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Walk both trees in lockstep, comparing the move sets at every node
fn compare(game: &mut Chess, pos: &shakmaty::Chess, depth: u32) {
    let expected = oracle_moves(pos);
    assert_eq!(engine_moves(game), expected, "move sets differ at\n{game}");
    if depth <= 1 {
        return;
    }
    for mv in pos.legal_moves() {
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        // Promotions are the same engine move; follow the queen one only
        if uci.len() == 5 && !uci.ends_with('q') {
            continue;
        }
        let played: CoordinateMove = uci.parse().unwrap();
        assert!(game.play_coordinates(&played).unwrap(), "{uci} refused");
        compare(game, &pos.clone().play(&mv).unwrap(), depth - 1);
        game.undo().unwrap();
    }
}

fn perft(game: &mut Chess, depth: u32) -> u64 {
    let moves = game.all_legal_moves().unwrap();
    if depth <= 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        assert!(game.play(mv.from, mv.to).unwrap());
        nodes += perft(game, depth - 1);
        game.undo().unwrap();
    }
    nodes
}

// ============================================================================
// Perft Tests
// ============================================================================

#[test]
fn test_perft_startpos_depth_1() {
    let mut game = Chess::new();
    game.start_game().unwrap();
    assert_eq!(perft(&mut game, 1), 20);
}

#[test]
fn test_perft_startpos_depth_2() {
    let mut game = Chess::new();
    game.start_game().unwrap();
    assert_eq!(perft(&mut game, 2), 400);
}

#[test]
fn test_perft_startpos_depth_3() {
    let mut game = Chess::new();
    game.start_game().unwrap();
    assert_eq!(perft(&mut game, 3), 8902);
}

// ============================================================================
// Move Set Comparison Tests
// ============================================================================

#[test]
fn test_oracle_startpos() {
    let pos = shakmaty::Chess::default();
    let mut game = Chess::new();
    game.start_game().unwrap();
    compare(&mut game, &pos, 2);
}

#[test]
fn test_oracle_castling_position() {
    let pos = from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    compare(&mut engine_from(&pos), &pos, 2);
}

#[test]
fn test_oracle_open_castling_position() {
    let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    compare(&mut engine_from(&pos), &pos, 2);
}

#[test]
fn test_oracle_castling_through_attack() {
    let pos = from_fen("4k3/8/8/8/2b5/8/8/R3K2R w KQ - 0 1");
    compare(&mut engine_from(&pos), &pos, 1);
}

#[test]
fn test_oracle_pins() {
    let pos = from_fen("4k3/4r3/8/b7/8/8/3NB3/4K3 w - - 0 1");
    compare(&mut engine_from(&pos), &pos, 2);
}

#[test]
fn test_oracle_promotions() {
    let pos = from_fen("1n2k3/PP6/8/8/8/8/6pp/3RK3 w - - 0 1");
    compare(&mut engine_from(&pos), &pos, 2);
}

#[test]
fn test_oracle_en_passant_line() {
    let mut pos = shakmaty::Chess::default();
    let mut game = Chess::new();
    game.start_game().unwrap();
    for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        let played: CoordinateMove = uci.parse().unwrap();
        assert!(game.play_coordinates(&played).unwrap());
        let mv = uci.parse::<UciMove>().unwrap().to_move(&pos).unwrap();
        pos = pos.play(&mv).unwrap();
    }
    compare(&mut game, &pos, 2);
}
