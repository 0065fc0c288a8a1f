//! Game settings

use super::color::ChessColor;
use super::piece::PieceKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChessSettings {
    /// Side to move when a game starts from the standard position
    pub first_color: ChessColor,
    /// Piece a pawn turns into when no choice can be asked for
    pub default_promotion: PieceKind,
}

impl Default for ChessSettings {
    fn default() -> Self {
        ChessSettings {
            first_color: ChessColor::White,
            default_promotion: PieceKind::Queen,
        }
    }
}
