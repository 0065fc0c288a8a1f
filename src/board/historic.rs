//! Undo log of committed moves

use std::fmt;
use std::rc::Rc;

use super::error::{BoardError, BoardResult};
use super::moves::Move;
use super::piece::PieceId;
use super::vector::Vector;

/// Snapshot of one committed move; never mutated after it is pushed.
pub struct Record<G> {
    pub piece: PieceId,
    pub mv: Rc<Move<G>>,
    pub start: Vector,
    pub destination: Vector,
    /// One entry per action of `mv`, in declaration order
    pub affected: Vec<Option<PieceId>>,
}

impl<G> Record<G> {
    /// Whether this record was produced by that very move definition
    pub fn is_move(&self, mv: &Move<G>) -> bool {
        std::ptr::eq(Rc::as_ptr(&self.mv), mv)
    }
}

impl<G> fmt::Debug for Record<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("piece", &self.piece)
            .field("move", &self.mv.name())
            .field("start", &self.start)
            .field("destination", &self.destination)
            .field("affected", &self.affected)
            .finish()
    }
}

pub struct Historic<G> {
    records: Vec<Record<G>>,
}

impl<G> Historic<G> {
    pub fn new() -> Self {
        Historic { records: Vec::new() }
    }

    pub fn add(
        &mut self,
        piece: PieceId,
        mv: Rc<Move<G>>,
        start: Vector,
        destination: Vector,
        affected: Vec<Option<PieceId>>,
    ) {
        self.records.push(Record {
            piece,
            mv,
            start,
            destination,
            affected,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_piece_contained(&self, piece: PieceId) -> bool {
        self.records.iter().any(|record| record.piece == piece)
    }

    pub fn last(&self) -> BoardResult<&Record<G>> {
        self.records.last().ok_or(BoardError::EmptyHistory)
    }

    pub fn is_last_action(&self, mv: &Move<G>) -> BoardResult<bool> {
        Ok(self.last()?.is_move(mv))
    }

    pub fn last_piece_moved(&self) -> BoardResult<PieceId> {
        Ok(self.last()?.piece)
    }

    /// Remove the top record. Replaying it backwards is the caller's job, see
    /// [`BoardGame::revert_last_move`](super::BoardGame::revert_last_move).
    pub fn pop(&mut self) -> BoardResult<Record<G>> {
        self.records.pop().ok_or(BoardError::EmptyHistory)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Record<G>> {
        self.records.iter()
    }
}

impl<G> Default for Historic<G> {
    fn default() -> Self {
        Self::new()
    }
}
