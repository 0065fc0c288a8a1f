//! The seam between a concrete game and the generic board machinery
//!
//! A game owns its [`Board`] and exposes it through this trait; move
//! resolution, execution and undo are provided on top of that. Rule fragments
//! are written against the game type, so a specialised game can offer them
//! extra queries through its own capability trait.

use std::rc::Rc;

use super::board::Board;
use super::error::{BoardError, BoardResult};
use super::moves::Move;
use super::piece::{Piece, PieceId};
use super::vector::Vector;

pub trait BoardGame: Sized + 'static {
    type Piece: Piece<Self> + 'static;

    fn board(&self) -> &Board<Self>;

    fn board_mut(&mut self) -> &mut Board<Self>;

    /// Legality of one move definition for one piece. Games override this to
    /// add piece-level rules on top of the move's own conditions.
    fn can_move_with(
        &mut self,
        _piece: PieceId,
        start: Vector,
        destination: Vector,
        mv: &Rc<Move<Self>>,
    ) -> bool {
        mv.can_move(start, destination, self)
    }

    /// Apply a move's actions and record them in the history.
    fn do_move_with(
        &mut self,
        piece: PieceId,
        start: Vector,
        destination: Vector,
        mv: &Rc<Move<Self>>,
    ) -> BoardResult<()> {
        let affected = mv.do_move(start, destination, self)?;
        self.board_mut()
            .historic_mut()
            .add(piece, Rc::clone(mv), start, destination, affected);
        Ok(())
    }

    /// Try the piece's moves in declaration order; the first one that accepts
    /// the displacement decides. With `commit` the move is also executed.
    fn move_piece(
        &mut self,
        piece: PieceId,
        start: Vector,
        destination: Vector,
        commit: bool,
    ) -> BoardResult<bool> {
        let moves = Rc::clone(self.board().piece(piece)?.moves());
        for mv in moves.iter() {
            if self.can_move_with(piece, start, destination, mv) {
                if commit {
                    self.do_move_with(piece, start, destination, mv)?;
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Move whatever stands on `from` to `to`. An empty `from` is a refusal,
    /// not an error.
    fn make_move(&mut self, from: Vector, to: Vector) -> BoardResult<bool> {
        if !self.board().contains(to) {
            return Err(BoardError::OutOfBounds(to));
        }
        match self.board().piece_at_position(from)? {
            Some(piece) => self.move_piece(piece, from, to, true),
            None => Ok(false),
        }
    }

    /// Every destination the piece standing on `start` may reach, in move
    /// declaration order. A square reachable by several moves is listed once
    /// per move.
    fn possible_moves(&mut self, start: Vector) -> BoardResult<Vec<Vector>> {
        let Some(piece) = self.board().piece_at_position(start)? else {
            return Ok(Vec::new());
        };
        let moves = Rc::clone(self.board().piece(piece)?.moves());
        let coordinates = self.board().coordinates();
        let mut destinations = Vec::new();
        for mv in moves.iter() {
            for &destination in &coordinates {
                if self.can_move_with(piece, start, destination, mv) {
                    destinations.push(destination);
                }
            }
        }
        Ok(destinations)
    }

    /// Pop the most recent record and replay its actions backwards.
    fn revert_last_move(&mut self) -> BoardResult<()> {
        let record = self.board_mut().historic_mut().pop()?;
        record
            .mv
            .revert_move(record.start, record.destination, &record.affected, self)
    }
}
