//! Chess on top of the generic board machinery
//!
//! The rule fragments in [`rules`] are assembled into the shared move
//! definitions of [`book`]; [`Chess`] adds turns, check and checkmate.

pub mod book;
pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod view;

pub use book::MoveBook;
pub use color::{ChessColor, Direction};
pub use config::ChessSettings;
pub use error::{NotationError, SetupError};
pub use game::{Chess, GameState, Placement, SIZE};
pub use notation::{parse_square, square_name, CoordinateMove};
pub use piece::{ChessPiece, PieceKind};
pub use rules::{
    CanNotEat, ChessBoard, EatPiece, EnPassant, MoveChessPiece, MustEat, MustNotCheck,
    MustNotCollide, OnlyFirstMove, Promote, Roque,
};
pub use view::{ChessView, ViewListener};
