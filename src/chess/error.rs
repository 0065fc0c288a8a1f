use super::color::ChessColor;
use crate::board::{BoardError, Vector};

/// Rejected starting positions
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: ChessColor, count: usize },

    #[error("square {0} is given twice")]
    DuplicateSquare(Vector),
}

/// Malformed coordinate notation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square `{0}`")]
    Square(String),

    #[error("invalid move `{0}`, expected something like `e2e4` or `e7e8q`")]
    Move(String),
}
