//! Presentation callbacks
//!
//! A view mirrors the board through placement/removal events and is told
//! about checks and the end of the game. None of its methods can change the
//! engine's state; the promotion choice is only a suggestion that the game
//! validates.

use std::rc::Rc;

use super::color::ChessColor;
use super::piece::{ChessPiece, PieceKind};
use crate::board::{BoardListener, Vector};

pub trait ChessView {
    /// Fired for every placement, speculative ones included
    fn on_piece_placed(&self, _kind: PieceKind, _color: ChessColor, _i: i32, _j: i32) {}

    /// Fired for every removal, speculative ones included
    fn on_piece_removed(&self, _i: i32, _j: i32) {}

    /// The side to move is in check
    fn on_check(&self, _color: ChessColor) {}

    fn on_checkmate(&self, _winner: ChessColor) {}

    /// Pick what a pawn of `color` becomes. Only asked for committed moves.
    fn choose_promotion(&self, _color: ChessColor, candidates: &[PieceKind]) -> PieceKind {
        candidates.first().copied().unwrap_or(PieceKind::Queen)
    }
}

/// Forwards board mutations to a [`ChessView`]
pub struct ViewListener {
    view: Rc<dyn ChessView>,
}

impl ViewListener {
    pub fn new(view: Rc<dyn ChessView>) -> Self {
        ViewListener { view }
    }
}

impl<G> BoardListener<ChessPiece<G>> for ViewListener {
    fn piece_placed(&self, piece: &ChessPiece<G>, position: Vector) {
        self.view
            .on_piece_placed(piece.kind(), piece.color(), position.i, position.j);
    }

    fn piece_removed(&self, position: Vector) {
        self.view.on_piece_removed(position.i, position.j);
    }
}
