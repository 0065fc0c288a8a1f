//! Board occupants

use super::moves::MoveSet;

/// Handle to a piece registered on a [`Board`](super::Board).
///
/// Handles compare by identity: two pieces of the same archetype and color
/// have different ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An occupant with an ordered list of candidate moves.
///
/// `PartialEq` is value equality (for chess: archetype and color), used by
/// [`Board::search_pieces`](super::Board::search_pieces). The move list is
/// fixed at construction; when two moves could match the same displacement the
/// one declared first wins.
pub trait Piece<G>: PartialEq {
    fn moves(&self) -> &MoveSet<G>;
}
