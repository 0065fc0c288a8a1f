pub mod board;
pub mod chess;
pub mod console;

pub use board::{Board, BoardError, BoardGame, Vector};
pub use chess::{Chess, ChessColor, ChessSettings, GameState, PieceKind};
pub use console::Console;
