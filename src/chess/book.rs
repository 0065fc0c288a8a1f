//! The chess move definitions, built once per game and shared by every piece

use std::rc::Rc;

use super::color::{ChessColor, Direction};
use super::piece::{ChessPiece, PieceKind};
use super::rules::{
    CanNotEat, ChessBoard, EatPiece, EnPassant, MoveChessPiece, MustEat, MustNotCollide,
    OnlyFirstMove, Promote, Roque,
};
use crate::board::{GameAction, GameCondition, Move, MoveSet, Vector};

type Condition<G> = Rc<dyn GameCondition<G>>;
type Action<G> = Rc<dyn GameAction<G>>;

/// One shared instance of every rule fragment
struct Fragments<G> {
    promote: Action<G>,
    roque_condition: Condition<G>,
    roque_action: Action<G>,
    en_passant_condition: Condition<G>,
    en_passant_action: Action<G>,
    eat: Action<G>,
    move_piece: Action<G>,
    must_eat: Condition<G>,
    cannot_eat: Condition<G>,
    only_first_move: Condition<G>,
    no_collision: Condition<G>,
}

impl<G: ChessBoard> Fragments<G> {
    fn new() -> Self {
        let roque = Rc::new(Roque);
        let en_passant = Rc::new(EnPassant);
        Fragments {
            promote: Rc::new(Promote),
            roque_condition: roque.clone(),
            roque_action: roque,
            en_passant_condition: en_passant.clone(),
            en_passant_action: en_passant,
            eat: Rc::new(EatPiece),
            move_piece: Rc::new(MoveChessPiece),
            must_eat: Rc::new(MustEat),
            cannot_eat: Rc::new(CanNotEat),
            only_first_move: Rc::new(OnlyFirstMove),
            no_collision: Rc::new(MustNotCollide),
        }
    }
}

/// Pawn moves for one advancing direction
struct PawnMoves<G> {
    straight: Rc<Move<G>>,
    double_straight: Rc<Move<G>>,
    eat: Rc<Move<G>>,
    en_passant: Rc<Move<G>>,
}

impl<G: ChessBoard> PawnMoves<G> {
    fn new(rules: &Fragments<G>, forward: i32) -> Self {
        let r = rules;
        PawnMoves {
            straight: Rc::new(Move::new(
                "pawn straight",
                Vector::new(0, forward),
                false,
                false,
                vec![r.no_collision.clone(), r.cannot_eat.clone()],
                vec![r.move_piece.clone(), r.promote.clone()],
            )),
            double_straight: Rc::new(Move::new(
                "pawn double straight",
                Vector::new(0, 2 * forward),
                false,
                false,
                vec![r.no_collision.clone(), r.cannot_eat.clone(), r.only_first_move.clone()],
                vec![r.move_piece.clone()],
            )),
            eat: Rc::new(Move::new(
                "pawn eat",
                Vector::new(forward, forward),
                false,
                true,
                vec![r.no_collision.clone(), r.must_eat.clone()],
                vec![r.eat.clone(), r.promote.clone()],
            )),
            en_passant: Rc::new(Move::new(
                "pawn en passant",
                Vector::new(forward, forward),
                false,
                true,
                vec![r.no_collision.clone(), r.en_passant_condition.clone()],
                vec![r.en_passant_action.clone(), r.move_piece.clone()],
            )),
        }
    }

    fn set(&self) -> MoveSet<G> {
        Rc::from(vec![
            self.straight.clone(),
            self.double_straight.clone(),
            self.eat.clone(),
            self.en_passant.clone(),
        ])
    }
}

pub struct MoveBook<G> {
    pawn_up: PawnMoves<G>,
    pawn_down: PawnMoves<G>,
    rook: MoveSet<G>,
    knight: MoveSet<G>,
    bishop: MoveSet<G>,
    queen: MoveSet<G>,
    king: MoveSet<G>,
    pawn_up_set: MoveSet<G>,
    pawn_down_set: MoveSet<G>,
}

impl<G: ChessBoard> MoveBook<G> {
    /// Build every move for a `length` x `height` board. Sliding moves reach
    /// across the whole board.
    pub fn new(length: i32, height: i32) -> Self {
        let r = Fragments::<G>::new();
        let slide = |name, vector, mirrored_x, mirrored_y| {
            Rc::new(Move::new(
                name,
                vector,
                mirrored_x,
                mirrored_y,
                vec![r.no_collision.clone()],
                vec![r.eat.clone()],
            ))
        };

        let horizontal_straights = slide("horizontal straights", Vector::new(length, 0), false, true);
        let vertical_straights = slide("vertical straights", Vector::new(0, height), true, false);
        let diagonals = slide("diagonals", Vector::new(length, height), true, true);

        let king_horizontal = slide("king horizontal", Vector::new(1, 0), true, true);
        let king_vertical = slide("king vertical", Vector::new(0, 1), true, false);
        let king_diagonals = slide("king diagonals", Vector::new(1, 1), true, true);
        let castling = |name, vector| {
            Rc::new(Move::new(
                name,
                vector,
                false,
                false,
                vec![
                    r.only_first_move.clone(),
                    r.no_collision.clone(),
                    r.roque_condition.clone(),
                ],
                vec![r.roque_action.clone()],
            ))
        };
        let grand_roque = castling("grand roque", Vector::new(-4, 0));
        let petit_roque = castling("petit roque", Vector::new(3, 0));

        let jump = |name, vector| {
            Rc::new(Move::new(name, vector, true, true, Vec::new(), vec![r.eat.clone()]))
        };
        let knight_l = jump("knight L", Vector::new(2, 1));
        let knight_l2 = jump("knight L2", Vector::new(1, 2));

        let pawn_up = PawnMoves::new(&r, 1);
        let pawn_down = PawnMoves::new(&r, -1);

        let set = |moves: &[&Rc<Move<G>>]| -> MoveSet<G> {
            moves.iter().map(|mv| Rc::clone(mv)).collect()
        };

        MoveBook {
            rook: set(&[&vertical_straights, &horizontal_straights]),
            knight: set(&[&knight_l, &knight_l2]),
            bishop: set(&[&diagonals]),
            queen: set(&[&vertical_straights, &horizontal_straights, &diagonals]),
            king: set(&[
                &king_vertical,
                &king_horizontal,
                &king_diagonals,
                &grand_roque,
                &petit_roque,
            ]),
            pawn_up_set: pawn_up.set(),
            pawn_down_set: pawn_down.set(),
            pawn_up,
            pawn_down,
        }
    }

    /// The shared move list of an archetype; pawns depend on their color's direction
    pub fn moves_for(&self, kind: PieceKind, color: ChessColor) -> MoveSet<G> {
        let moves = match kind {
            PieceKind::Pawn => match color.direction() {
                Direction::Down => &self.pawn_down_set,
                _ => &self.pawn_up_set,
            },
            PieceKind::Rook => &self.rook,
            PieceKind::Knight => &self.knight,
            PieceKind::Bishop => &self.bishop,
            PieceKind::Queen => &self.queen,
            PieceKind::King => &self.king,
        };
        Rc::clone(moves)
    }

    pub fn piece(&self, kind: PieceKind, color: ChessColor) -> ChessPiece<G> {
        ChessPiece::new(kind, color, self.moves_for(kind, color))
    }

    pub fn is_pawn_double_advance(&self, mv: &Move<G>) -> bool {
        [&self.pawn_up.double_straight, &self.pawn_down.double_straight]
            .into_iter()
            .any(|double| std::ptr::eq(Rc::as_ptr(double), mv))
    }
}
