//! Capability traits from which every move definition is assembled
//!
//! A condition answers whether a displacement is allowed; an action performs
//! one side effect and knows how to take it back. A rule fragment that needs
//! both simply implements both traits.

use super::error::BoardResult;
use super::piece::PieceId;
use super::vector::Vector;

pub trait GameCondition<G> {
    fn check_condition(&self, start: Vector, destination: Vector, game: &G) -> bool;
}

pub trait GameAction<G> {
    /// Apply the effect and return the piece it displaced, if any. The returned
    /// handle is handed back unchanged to [`GameAction::revert_action`].
    fn do_action(&self, start: Vector, destination: Vector, game: &mut G)
    -> BoardResult<Option<PieceId>>;

    /// Undo the effect at the same coordinates it was applied with.
    fn revert_action(
        &self,
        start: Vector,
        destination: Vector,
        affected: Option<PieceId>,
        game: &mut G,
    ) -> BoardResult<()>;
}
