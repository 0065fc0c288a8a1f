//! Move definitions
//!
//! A `Move` is a named movement pattern shared by every piece of an archetype:
//! a base displacement that bounds the reach, two mirror flags, an ordered
//! list of conditions (all must hold) and an ordered list of actions (applied
//! in order, reverted in reverse order).

use std::fmt;
use std::rc::Rc;

use super::error::BoardResult;
use super::piece::PieceId;
use super::rules::{GameAction, GameCondition};
use super::vector::Vector;

/// The ordered moves of one piece archetype, shared by all its pieces
pub type MoveSet<G> = Rc<[Rc<Move<G>>]>;

pub struct Move<G> {
    name: &'static str,
    vector: Vector,
    mirrored_x: bool,
    mirrored_y: bool,
    conditions: Vec<Rc<dyn GameCondition<G>>>,
    actions: Vec<Rc<dyn GameAction<G>>>,
}

impl<G> Move<G> {
    pub fn new(
        name: &'static str,
        vector: Vector,
        mirrored_x: bool,
        mirrored_y: bool,
        conditions: Vec<Rc<dyn GameCondition<G>>>,
        actions: Vec<Rc<dyn GameAction<G>>>,
    ) -> Self {
        Move {
            name,
            vector,
            mirrored_x,
            mirrored_y,
            conditions,
            actions,
        }
    }

    /// A pure geometric pattern without conditions or effects
    pub fn geometric(name: &'static str, vector: Vector, mirrored_x: bool, mirrored_y: bool) -> Self {
        Self::new(name, vector, mirrored_x, mirrored_y, Vec::new(), Vec::new())
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn vector(&self) -> Vector {
        self.vector
    }

    /// Whether the displacement fits the pattern, ignoring conditions.
    ///
    /// The base vector is an upper bound on the reach, not an exact step; the
    /// displacement must point along the base vector or one of the mirrored
    /// variants enabled by the flags (the opposite needs both flags).
    pub fn matches(&self, movement: Vector) -> bool {
        if movement.norm_squared() > self.vector.norm_squared() {
            return false;
        }
        movement.is_same_direction(self.vector)
            || (self.mirrored_x && movement.is_same_direction(self.vector.mirror_x()))
            || (self.mirrored_y && movement.is_same_direction(self.vector.mirror_y()))
            || (self.mirrored_x
                && self.mirrored_y
                && movement.is_same_direction(self.vector.opposite()))
    }

    pub fn check_conditions(&self, start: Vector, destination: Vector, game: &G) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.check_condition(start, destination, game))
    }

    pub fn can_move(&self, start: Vector, destination: Vector, game: &G) -> bool {
        self.matches(destination - start) && self.check_conditions(start, destination, game)
    }

    /// Run every action in declaration order and collect what each displaced.
    ///
    /// If an action fails, the actions already applied are reverted before the
    /// error is returned, leaving the board as it was.
    pub fn do_move(
        &self,
        start: Vector,
        destination: Vector,
        game: &mut G,
    ) -> BoardResult<Vec<Option<PieceId>>> {
        let mut affected = Vec::with_capacity(self.actions.len());
        for action in &self.actions {
            match action.do_action(start, destination, game) {
                Ok(piece) => affected.push(piece),
                Err(err) => {
                    for (action, piece) in self.actions.iter().zip(affected).rev() {
                        if let Err(undo) = action.revert_action(start, destination, piece, game) {
                            log::error!("{}: rollback after failed action also failed: {undo}", self.name);
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(affected)
    }

    /// Revert the actions in reverse order, each receiving what it displaced.
    pub fn revert_move(
        &self,
        start: Vector,
        destination: Vector,
        affected: &[Option<PieceId>],
        game: &mut G,
    ) -> BoardResult<()> {
        for (index, action) in self.actions.iter().enumerate().rev() {
            let piece = affected.get(index).copied().flatten();
            action.revert_action(start, destination, piece, game)?;
        }
        Ok(())
    }
}

impl<G> fmt::Debug for Move<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Move")
            .field("name", &self.name)
            .field("vector", &self.vector)
            .field("mirrored_x", &self.mirrored_x)
            .field("mirrored_y", &self.mirrored_y)
            .field("conditions", &self.conditions.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}
