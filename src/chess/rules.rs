//! Chess rule fragments
//!
//! Each fragment is a condition, an action, or both, and is shared by every
//! move definition that lists it. Fragments only talk to the game through
//! [`ChessBoard`], so any game exposing those queries can reuse them.

use log::trace;

use super::color::ChessColor;
use super::piece::{ChessPiece, PieceKind};
use crate::board::{BoardError, BoardGame, BoardResult, GameAction, GameCondition, Move, PieceId, Vector};

/// The chess-specific queries rule fragments rely on.
pub trait ChessBoard: BoardGame<Piece = ChessPiece<Self>> {
    /// Side to move
    fn turn(&self) -> ChessColor;

    /// Whether a piece not of `defending` color could move to `position`
    fn is_attacked(&self, defending: ChessColor, position: Vector) -> bool;

    /// Register the piece a pawn of `color` turns into and return it (not placed yet)
    fn promoted_piece(&mut self, color: ChessColor) -> PieceId;

    /// Whether `mv` is one of the two-square pawn advances
    fn is_pawn_double_advance(&self, mv: &Move<Self>) -> bool;
}

fn color_at<G: ChessBoard>(game: &G, position: Vector) -> Option<ChessColor> {
    game.board().occupant(position).map(|(_, piece)| piece.color())
}

/// Destination must be empty
#[derive(Debug, Default, Clone, Copy)]
pub struct CanNotEat;

impl<G: ChessBoard> GameCondition<G> for CanNotEat {
    fn check_condition(&self, _start: Vector, destination: Vector, game: &G) -> bool {
        game.board().occupant(destination).is_none()
    }
}

/// Destination must be occupied
#[derive(Debug, Default, Clone, Copy)]
pub struct MustEat;

impl<G: ChessBoard> GameCondition<G> for MustEat {
    fn check_condition(&self, _start: Vector, destination: Vector, game: &G) -> bool {
        game.board().occupant(destination).is_some()
    }
}

/// Every square strictly between start and destination must be empty
#[derive(Debug, Default, Clone, Copy)]
pub struct MustNotCollide;

impl<G: ChessBoard> GameCondition<G> for MustNotCollide {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        (destination - start)
            .included_vectors()
            .into_iter()
            .all(|offset| game.board().occupant(start + offset).is_none())
    }
}

/// The moving piece must never have moved before
#[derive(Debug, Default, Clone, Copy)]
pub struct OnlyFirstMove;

impl<G: ChessBoard> GameCondition<G> for OnlyFirstMove {
    fn check_condition(&self, start: Vector, _destination: Vector, game: &G) -> bool {
        game.board()
            .occupant(start)
            .is_some_and(|(id, _)| !game.board().has_moved(id))
    }
}

/// No square the piece passes through, destination included, may be attacked
#[derive(Debug, Default, Clone, Copy)]
pub struct MustNotCheck;

impl<G: ChessBoard> GameCondition<G> for MustNotCheck {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        let Some(color) = color_at(game, start) else {
            return false;
        };
        (destination - start)
            .included_vectors()
            .into_iter()
            .map(|offset| start + offset)
            .chain(std::iter::once(destination))
            .all(|square| !game.is_attacked(color, square))
    }
}

/// Relocate the mover; as a condition, forbid landing on a friendly piece
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveChessPiece;

impl<G: ChessBoard> GameCondition<G> for MoveChessPiece {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        match color_at(game, destination) {
            Some(target) => color_at(game, start).is_some_and(|mover| mover != target),
            None => true,
        }
    }
}

impl<G: ChessBoard> GameAction<G> for MoveChessPiece {
    fn do_action(&self, start: Vector, destination: Vector, game: &mut G) -> BoardResult<Option<PieceId>> {
        game.board_mut().move_piece_at_position(start, destination)?;
        Ok(None)
    }

    fn revert_action(
        &self,
        start: Vector,
        destination: Vector,
        _affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()> {
        game.board_mut().move_piece_at_position(destination, start)?;
        Ok(())
    }
}

/// Take whatever stands on the destination, then relocate the mover
#[derive(Debug, Default, Clone, Copy)]
pub struct EatPiece;

impl<G: ChessBoard> GameCondition<G> for EatPiece {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        MoveChessPiece.check_condition(start, destination, game)
    }
}

impl<G: ChessBoard> GameAction<G> for EatPiece {
    fn do_action(&self, start: Vector, destination: Vector, game: &mut G) -> BoardResult<Option<PieceId>> {
        game.board().piece_at_position(start)?;
        let eaten = game.board_mut().remove_piece_at_position(destination)?;
        if let Err(err) = MoveChessPiece.do_action(start, destination, game) {
            if let Some(piece) = eaten {
                game.board_mut().set_piece_at_position(piece, destination)?;
            }
            return Err(err);
        }
        Ok(eaten)
    }

    fn revert_action(
        &self,
        start: Vector,
        destination: Vector,
        affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()> {
        MoveChessPiece.revert_action(start, destination, None, game)?;
        if let Some(piece) = affected {
            game.board_mut().set_piece_at_position(piece, destination)?;
        }
        Ok(())
    }
}

/// Capture of a pawn that just advanced two squares past the mover
#[derive(Debug, Default, Clone, Copy)]
pub struct EnPassant;

impl EnPassant {
    /// The victim stands beside the mover, on the destination's column
    #[inline]
    pub fn eat_position(start: Vector, destination: Vector) -> Vector {
        Vector::new(destination.i, start.j)
    }
}

impl<G: ChessBoard> GameCondition<G> for EnPassant {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        let board = game.board();
        let Some((victim, piece)) = board.occupant(Self::eat_position(start, destination)) else {
            return false;
        };
        if piece.kind() != PieceKind::Pawn || color_at(game, start) == Some(piece.color()) {
            return false;
        }
        board
            .historic()
            .last()
            .is_ok_and(|record| record.piece == victim && game.is_pawn_double_advance(&record.mv))
    }
}

impl<G: ChessBoard> GameAction<G> for EnPassant {
    fn do_action(&self, start: Vector, destination: Vector, game: &mut G) -> BoardResult<Option<PieceId>> {
        let position = Self::eat_position(start, destination);
        trace!("en passant from {start} to {destination} takes {position}");
        game.board_mut().remove_piece_at_position(position)
    }

    fn revert_action(
        &self,
        start: Vector,
        destination: Vector,
        affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()> {
        if let Some(piece) = affected {
            game.board_mut()
                .set_piece_at_position(piece, Self::eat_position(start, destination))?;
        }
        Ok(())
    }
}

/// Castling: the king steps two squares towards an unmoved rook, which jumps
/// to the square the king crossed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Roque;

impl Roque {
    const KING_STEP: Vector = Vector::new(2, 0);

    /// Corner the rook starts from, on the side the king travels to
    fn rook_position<G: ChessBoard>(start: Vector, destination: Vector, game: &G) -> Vector {
        if destination.i < start.i {
            Vector::new(0, start.j)
        } else {
            Vector::new(game.board().length() - 1, start.j)
        }
    }

    /// Square next to the king's destination, on the rook's side
    fn rook_destination<G: ChessBoard>(start: Vector, destination: Vector, game: &G) -> Vector {
        let rook = Self::rook_position(start, destination, game);
        if rook.i < destination.i {
            Vector::new(destination.i + 1, destination.j)
        } else {
            Vector::new(destination.i - 1, destination.j)
        }
    }
}

impl<G: ChessBoard> GameCondition<G> for Roque {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool {
        let board = game.board();
        let Some((king, king_piece)) = board.occupant(start) else {
            return false;
        };
        let movement = destination - start;
        if !movement.is_collinear(Self::KING_STEP)
            || movement.norm_squared() != Self::KING_STEP.norm_squared()
        {
            return false;
        }
        let corner = Self::rook_position(start, destination, game);
        let Some((rook, rook_piece)) = board.occupant(corner) else {
            return false;
        };
        if rook_piece.kind() != PieceKind::Rook || rook_piece.color() != king_piece.color() {
            return false;
        }
        let path_clear = (corner - start)
            .included_vectors()
            .into_iter()
            .all(|offset| board.occupant(start + offset).is_none());
        path_clear
            && !board.has_moved(king)
            && !board.has_moved(rook)
            && !game.is_attacked(king_piece.color(), start)
            && MustNotCheck.check_condition(start, destination, game)
    }
}

impl<G: ChessBoard> GameAction<G> for Roque {
    fn do_action(&self, start: Vector, destination: Vector, game: &mut G) -> BoardResult<Option<PieceId>> {
        let corner = Self::rook_position(start, destination, game);
        let rook_destination = Self::rook_destination(start, destination, game);
        let board = game.board();
        if board.piece_at_position(corner)?.is_none() {
            return Err(BoardError::EmptySquare(corner));
        }
        board.piece_at_position(rook_destination)?;
        trace!("castling {start} -> {destination}, rook {corner} -> {rook_destination}");
        game.board_mut().move_piece_at_position(start, destination)?;
        if let Err(err) = game.board_mut().move_piece_at_position(corner, rook_destination) {
            game.board_mut().move_piece_at_position(destination, start)?;
            return Err(err);
        }
        Ok(None)
    }

    fn revert_action(
        &self,
        start: Vector,
        destination: Vector,
        _affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()> {
        let corner = Self::rook_position(start, destination, game);
        let rook_destination = Self::rook_destination(start, destination, game);
        game.board_mut().move_piece_at_position(destination, start)?;
        game.board_mut().move_piece_at_position(rook_destination, corner)?;
        Ok(())
    }
}

/// A pawn reaching the far row is exchanged for the piece the game provides
#[derive(Debug, Default, Clone, Copy)]
pub struct Promote;

impl<G: ChessBoard> GameAction<G> for Promote {
    fn do_action(&self, _start: Vector, destination: Vector, game: &mut G) -> BoardResult<Option<PieceId>> {
        let Some(color) = color_at(game, destination) else {
            return Ok(None);
        };
        if destination.j != color.promotion_row(game.board().height()) {
            return Ok(None);
        }
        let promoted = game.promoted_piece(color);
        let pawn = game.board_mut().remove_piece_at_position(destination)?;
        game.board_mut().set_piece_at_position(promoted, destination)?;
        trace!("promotion at {destination} for {color}");
        Ok(pawn)
    }

    fn revert_action(
        &self,
        _start: Vector,
        destination: Vector,
        affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()> {
        let Some(pawn) = affected else {
            return Ok(());
        };
        let board = game.board_mut();
        let promoted = board.remove_piece_at_position(destination)?;
        board.set_piece_at_position(pawn, destination)?;
        if let Some(promoted) = promoted {
            board.release(promoted);
        }
        Ok(())
    }
}
