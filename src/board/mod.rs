//! Generic board-game machinery
//!
//! This module knows nothing about chess:
//! - [`Vector`]: integer displacements and their geometry
//! - [`Board`]: the grid of squares, the piece registry and the move history
//! - [`Move`]: data-driven move definitions built from conditions and actions
//! - [`BoardGame`]: move resolution, execution and undo for any game owning a board

#[allow(clippy::module_inception)]
pub mod board;
pub mod error;
pub mod game;
pub mod historic;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod vector;

pub use board::{Board, BoardListener};
pub use error::{BoardError, BoardResult};
pub use game::BoardGame;
pub use historic::{Historic, Record};
pub use moves::{Move, MoveSet};
pub use piece::{Piece, PieceId};
pub use rules::{GameAction, GameCondition};
pub use vector::Vector;
