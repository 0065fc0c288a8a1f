//! Colors and board-edge directions

use std::fmt;

/// A board edge, seen as the direction a side advances towards or from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row (for `Up`/`Down`) or column (for `Left`/`Right`) index of the edge
    /// this direction starts from.
    #[inline]
    pub const fn starting_edge(self, size: i32) -> i32 {
        match self {
            Direction::Up | Direction::Left => 0,
            Direction::Down | Direction::Right => size - 1,
        }
    }

    /// Index `value` steps inwards from the starting edge
    #[inline]
    pub const fn starting_edge_offset(self, size: i32, value: i32) -> i32 {
        match self {
            Direction::Up | Direction::Left => self.starting_edge(size) + value,
            Direction::Down | Direction::Right => self.starting_edge(size) - value,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two perpendicular directions, `Left`/`Up` first
    #[inline]
    pub const fn adjacent(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ChessColor {
    White,
    Black,
}

impl ChessColor {
    pub const ALL: [ChessColor; 2] = [ChessColor::White, ChessColor::Black];

    /// Edge this color starts from; its pawns advance away from it
    #[inline]
    pub const fn direction(self) -> Direction {
        match self {
            ChessColor::White => Direction::Up,
            ChessColor::Black => Direction::Down,
        }
    }

    #[inline]
    pub const fn next(self) -> Self {
        match self {
            ChessColor::White => ChessColor::Black,
            ChessColor::Black => ChessColor::White,
        }
    }

    /// Row on which this color's pawns promote
    #[inline]
    pub const fn promotion_row(self, size: i32) -> i32 {
        self.direction().opposite().starting_edge(size)
    }
}

impl std::ops::Not for ChessColor {
    type Output = ChessColor;
    fn not(self) -> Self::Output {
        self.next()
    }
}

impl fmt::Display for ChessColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChessColor::White => "White",
            ChessColor::Black => "Black",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert_eq!(Direction::Up.starting_edge(8), 0);
        assert_eq!(Direction::Down.starting_edge(8), 7);
        assert_eq!(Direction::Down.starting_edge_offset(8, 1), 6);
        assert_eq!(Direction::Right.starting_edge_offset(8, 2), 5);
        assert_eq!(Direction::Left.starting_edge_offset(8, 2), 2);
    }

    #[test]
    fn test_color_table() {
        assert_eq!(ChessColor::White.promotion_row(8), 7);
        assert_eq!(ChessColor::Black.promotion_row(8), 0);
        assert_eq!(!ChessColor::White, ChessColor::Black);
        assert_eq!(ChessColor::Black.next(), ChessColor::White);
        assert_eq!(ChessColor::Black.to_string(), "Black");
    }
}
