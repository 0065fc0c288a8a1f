//! Round-Trip Tests
//!
//! Every committed move followed by an undo must restore occupancy, turn,
//! history depth and the piece registry. Random games are seeded so
//! failures reproduce.

use board_engine::board::BoardGame;
use board_engine::chess::{parse_square, Chess, ChessColor, CoordinateMove, PieceKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, PartialEq, Eq)]
struct Snapshot {
    board: String,
    turn: ChessColor,
    depth: usize,
    registered: usize,
}

fn snapshot(game: &Chess) -> Snapshot {
    Snapshot {
        board: game.to_string(),
        turn: game.turn(),
        depth: game.board().historic().len(),
        registered: game.board().registered(),
    }
}

/// Play and take back every legal move of the current position
fn assert_every_move_round_trips(game: &mut Chess) {
    let before = snapshot(game);
    for mv in game.all_legal_moves().unwrap() {
        assert!(game.play(mv.from, mv.to).unwrap(), "{mv} was listed but refused");
        game.undo().unwrap();
        assert_eq!(snapshot(game), before, "{mv} did not round-trip");
    }
}

fn play_all(game: &mut Chess, moves: &str) {
    for token in moves.split_whitespace() {
        let mv: CoordinateMove = token.parse().unwrap();
        assert!(game.play_coordinates(&mv).unwrap(), "move {token} was refused");
    }
}

// ============================================================================
// Random Game Tests
// ============================================================================

fn random_game_round_trips(seed: u64, plies: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Chess::new();
    game.start_game().unwrap();

    for _ in 0..plies {
        if !game.is_started() {
            break;
        }
        let moves = game.all_legal_moves().unwrap();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];

        let before = snapshot(&game);
        assert!(game.play(mv.from, mv.to).unwrap());
        assert_eq!(game.board().historic().len(), before.depth + 1);
        game.undo().unwrap();
        assert_eq!(snapshot(&game), before, "seed {seed}: {mv} did not round-trip");

        assert!(game.play(mv.from, mv.to).unwrap());
    }
}

#[test]
fn test_random_games_round_trip_seed_1() {
    random_game_round_trips(1, 40);
}

#[test]
fn test_random_games_round_trip_seed_7() {
    random_game_round_trips(7, 40);
}

#[test]
fn test_random_games_round_trip_seed_42() {
    random_game_round_trips(42, 60);
}

#[test]
fn test_unwinding_a_whole_game() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut game = Chess::new();
    game.start_game().unwrap();
    let start = snapshot(&game);

    let mut played = 0;
    for _ in 0..30 {
        let moves = game.all_legal_moves().unwrap();
        if moves.is_empty() || !game.is_started() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        assert!(game.play(mv.from, mv.to).unwrap());
        played += 1;
    }
    for _ in 0..played {
        game.undo().unwrap();
    }
    assert_eq!(snapshot(&game), start);
    assert!(game.undo().is_err());
}

// ============================================================================
// Special Move Round-Trip Tests
// ============================================================================

#[test]
fn test_round_trip_with_en_passant_available() {
    let mut game = Chess::new();
    game.start_game().unwrap();
    play_all(&mut game, "e2e4 a7a6 e4e5 d7d5");
    assert_every_move_round_trips(&mut game);
}

#[test]
fn test_round_trip_with_castling_available() {
    let mut game = Chess::new();
    game.start_game().unwrap();
    play_all(&mut game, "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");
    assert_every_move_round_trips(&mut game);
}

#[test]
fn test_round_trip_with_promotions_available() {
    let sq = |name| parse_square(name).unwrap();
    let mut game = Chess::new();
    game.start_from_position(
        &[
            (PieceKind::King, ChessColor::White, sq("e1")),
            (PieceKind::Pawn, ChessColor::White, sq("b7")),
            (PieceKind::Pawn, ChessColor::White, sq("g7")),
            (PieceKind::Rook, ChessColor::Black, sq("h8")),
            (PieceKind::King, ChessColor::Black, sq("d6")),
        ],
        ChessColor::White,
    )
    .unwrap();
    assert_every_move_round_trips(&mut game);
}
