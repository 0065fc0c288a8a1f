//! Chess pieces

use std::fmt;
use std::rc::Rc;

use super::color::ChessColor;
use crate::board::{MoveSet, Piece};

/// Piece archetype
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// What a pawn may become, in the order they are offered
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Bishop,
    ];

    pub const fn is_promotion(&self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Knight | PieceKind::Rook | PieceKind::Bishop
        )
    }

    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'r' => Some(PieceKind::Rook),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A colored piece carrying the move list of its archetype.
///
/// Equality is by kind and color only, so a freshly built piece can be used
/// as a search key for the ones on the board.
pub struct ChessPiece<G> {
    kind: PieceKind,
    color: ChessColor,
    moves: MoveSet<G>,
}

impl<G> ChessPiece<G> {
    pub fn new(kind: PieceKind, color: ChessColor, moves: MoveSet<G>) -> Self {
        ChessPiece { kind, color, moves }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> ChessColor {
        self.color
    }

    /// Uppercase for white, lowercase for black
    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            ChessColor::White => c.to_ascii_uppercase(),
            ChessColor::Black => c,
        }
    }
}

impl<G> Piece<G> for ChessPiece<G> {
    fn moves(&self) -> &MoveSet<G> {
        &self.moves
    }
}

impl<G> PartialEq for ChessPiece<G> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.color == other.color
    }
}

impl<G> Eq for ChessPiece<G> {}

impl<G> Clone for ChessPiece<G> {
    fn clone(&self) -> Self {
        ChessPiece {
            kind: self.kind,
            color: self.color,
            moves: Rc::clone(&self.moves),
        }
    }
}

impl<G> fmt::Debug for ChessPiece<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
