//! Board precondition failures
//!
//! Rejected moves are not errors; these variants signal a caller that broke
//! a precondition (bad dimensions, out-of-range coordinate, empty history).

use super::piece::PieceId;
use super::vector::Vector;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {length}x{height}")]
    InvalidDimensions { length: i32, height: i32 },

    #[error("position {0} is out of bounds")]
    OutOfBounds(Vector),

    /// A piece was expected at this position
    #[error("no piece at {0}")]
    EmptySquare(Vector),

    /// The handle does not name a piece registered on this board
    #[error("unknown piece {0:?}")]
    UnknownPiece(PieceId),

    #[error("{piece:?} is already placed at {at}")]
    AlreadyPlaced { piece: PieceId, at: Vector },

    #[error("no move has been played")]
    EmptyHistory,
}

pub type BoardResult<T> = Result<T, BoardError>;
