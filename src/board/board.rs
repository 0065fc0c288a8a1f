//! Rectangular board of squares
//!
//! The board owns every piece registered on it (indexed by [`PieceId`]), the
//! grid of squares that reference those pieces, and the history of committed
//! moves. Pieces never leave the registry while a history record can still
//! name them, so captured pieces can be put back on revert.

use std::num::NonZeroU16;
use std::rc::Rc;

use super::error::{BoardError, BoardResult};
use super::game::BoardGame;
use super::historic::Historic;
use super::moves::Move;
use super::piece::PieceId;
use super::vector::Vector;

/// Receives every placement and removal as it happens, speculative ones
/// included, so implementations must tolerate transient states.
pub trait BoardListener<P> {
    fn piece_placed(&self, _piece: &P, _position: Vector) {}
    fn piece_removed(&self, _position: Vector) {}
}

struct Square {
    position: Vector,
    piece: Option<PieceId>,
}

pub struct Board<G: BoardGame> {
    length: i32,
    height: i32,
    squares: Vec<Square>,
    pieces: Vec<G::Piece>,
    /// Current square of every registered piece
    locations: Vec<Option<Vector>>,
    historic: Historic<G>,
    listener: Option<Rc<dyn BoardListener<G::Piece>>>,
}

impl<G: BoardGame> Board<G> {
    pub fn new(length: i32, height: i32) -> BoardResult<Self> {
        if length <= 0 || height <= 0 {
            return Err(BoardError::InvalidDimensions { length, height });
        }
        Ok(Self::build(length, height))
    }

    /// Infallible constructor for dimensions known to be positive
    pub fn with_size(length: NonZeroU16, height: NonZeroU16) -> Self {
        Self::build(i32::from(length.get()), i32::from(height.get()))
    }

    fn build(length: i32, height: i32) -> Self {
        let squares = (0..height)
            .flat_map(|j| (0..length).map(move |i| Square {
                position: Vector::new(i, j),
                piece: None,
            }))
            .collect();
        Board {
            length,
            height,
            squares,
            pieces: Vec::new(),
            locations: Vec::new(),
            historic: Historic::new(),
            listener: None,
        }
    }

    #[inline]
    pub fn length(&self) -> i32 {
        self.length
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, position: Vector) -> bool {
        (0..self.length).contains(&position.i) && (0..self.height).contains(&position.j)
    }

    fn index(&self, position: Vector) -> BoardResult<usize> {
        if self.contains(position) {
            Ok((position.i + position.j * self.length) as usize)
        } else {
            Err(BoardError::OutOfBounds(position))
        }
    }

    /// Every coordinate of the board, row by row
    pub fn coordinates(&self) -> Vec<Vector> {
        self.squares.iter().map(|square| square.position).collect()
    }

    pub fn set_listener(&mut self, listener: Option<Rc<dyn BoardListener<G::Piece>>>) {
        self.listener = listener;
    }

    /// Hand a new piece to the board. It is not placed on any square yet.
    pub fn register(&mut self, piece: G::Piece) -> PieceId {
        self.pieces.push(piece);
        self.locations.push(None);
        PieceId(self.pieces.len() - 1)
    }

    /// Drop the most recently registered piece if it is off the board and no
    /// history record refers to it. Returns whether it was released.
    pub fn release(&mut self, id: PieceId) -> bool {
        let releasable = id.0 + 1 == self.pieces.len()
            && self.locations[id.0].is_none()
            && !self
                .historic
                .iter()
                .any(|record| record.piece == id || record.affected.contains(&Some(id)));
        if releasable {
            self.pieces.pop();
            self.locations.pop();
        }
        releasable
    }

    pub fn piece(&self, id: PieceId) -> BoardResult<&G::Piece> {
        self.pieces.get(id.0).ok_or(BoardError::UnknownPiece(id))
    }

    /// Number of pieces ever registered (captured ones included)
    pub fn registered(&self) -> usize {
        self.pieces.len()
    }

    pub fn position_of(&self, id: PieceId) -> Option<Vector> {
        self.locations.get(id.0).copied().flatten()
    }

    pub fn piece_at_position(&self, position: Vector) -> BoardResult<Option<PieceId>> {
        Ok(self.squares[self.index(position)?].piece)
    }

    /// The occupant of a square; positions off the board read as empty.
    pub fn occupant(&self, position: Vector) -> Option<(PieceId, &G::Piece)> {
        let id = self.piece_at_position(position).ok().flatten()?;
        Some((id, &self.pieces[id.0]))
    }

    /// Put a registered, unplaced piece on `position`. A previous occupant is
    /// taken off the board (and reported removed) first.
    pub fn set_piece_at_position(&mut self, id: PieceId, position: Vector) -> BoardResult<PieceId> {
        let index = self.index(position)?;
        let piece = self.pieces.get(id.0).ok_or(BoardError::UnknownPiece(id))?;
        if let Some(at) = self.locations[id.0] {
            return Err(BoardError::AlreadyPlaced { piece: id, at });
        }
        let evicted = self.squares[index].piece.replace(id);
        if let Some(previous) = evicted {
            self.locations[previous.0] = None;
        }
        self.locations[id.0] = Some(position);
        if let Some(listener) = &self.listener {
            if evicted.is_some() {
                listener.piece_removed(position);
            }
            listener.piece_placed(piece, position);
        }
        Ok(id)
    }

    pub fn remove_piece_at_position(&mut self, position: Vector) -> BoardResult<Option<PieceId>> {
        let index = self.index(position)?;
        let removed = self.squares[index].piece.take();
        if let Some(id) = removed {
            self.locations[id.0] = None;
            if let Some(listener) = &self.listener {
                listener.piece_removed(position);
            }
        }
        Ok(removed)
    }

    /// Remove the piece at `from` and place it at `to`.
    ///
    /// Both coordinates and the source occupancy are validated before anything
    /// changes.
    pub fn move_piece_at_position(&mut self, from: Vector, to: Vector) -> BoardResult<PieceId> {
        self.index(to)?;
        if self.piece_at_position(from)?.is_none() {
            return Err(BoardError::EmptySquare(from));
        }
        let id = self.remove_piece_at_position(from)?.ok_or(BoardError::EmptySquare(from))?;
        self.set_piece_at_position(id, to)
    }

    pub fn empty_board(&mut self) {
        let occupied: Vec<Vector> = self
            .squares
            .iter()
            .filter(|square| square.piece.is_some())
            .map(|square| square.position)
            .collect();
        for square in &mut self.squares {
            square.piece = None;
        }
        self.locations.iter_mut().for_each(|location| *location = None);
        if let Some(listener) = &self.listener {
            occupied.into_iter().for_each(|position| listener.piece_removed(position));
        }
    }

    /// Empty the board, forget every registered piece and the whole history.
    pub fn reset(&mut self) {
        self.empty_board();
        self.historic.clear();
        self.pieces.clear();
        self.locations.clear();
    }

    /// Coordinates of every square whose occupant equals `piece` by value
    pub fn search_pieces(&self, piece: &G::Piece) -> Vec<Vector> {
        self.squares
            .iter()
            .filter(|square| square.piece.is_some_and(|id| self.pieces[id.0] == *piece))
            .map(|square| square.position)
            .collect()
    }

    /// Every occupied square with its occupant, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (Vector, PieceId, &G::Piece)> {
        self.squares.iter().filter_map(|square| {
            square
                .piece
                .map(|id| (square.position, id, &self.pieces[id.0]))
        })
    }

    /// Whether the piece has been the mover of any committed move
    pub fn has_moved(&self, id: PieceId) -> bool {
        self.historic.is_piece_contained(id)
    }

    pub fn is_last_action(&self, mv: &Move<G>) -> BoardResult<bool> {
        self.historic.is_last_action(mv)
    }

    pub fn last_piece_moved(&self) -> BoardResult<PieceId> {
        self.historic.last_piece_moved()
    }

    pub fn historic(&self) -> &Historic<G> {
        &self.historic
    }

    pub fn historic_mut(&mut self) -> &mut Historic<G> {
        &mut self.historic
    }
}
