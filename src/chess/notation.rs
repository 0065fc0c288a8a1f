//! Coordinate notation
//!
//! Squares are written as a file letter and a 1-based rank (`"e4"` is
//! `Vector(4, 3)`); moves as two squares with an optional promotion letter
//! (`"e2e4"`, `"e7e8n"`).

use std::fmt;
use std::str::FromStr;

use super::error::NotationError;
use super::piece::PieceKind;
use crate::board::Vector;

const FILES: &str = "abcdefghijklmnopqrstuvwxyz";

pub fn parse_square(s: &str) -> Result<Vector, NotationError> {
    let invalid = || NotationError::Square(s.to_string());
    let mut chars = s.chars();
    let file = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
    let i = FILES.find(file).ok_or_else(invalid)?;
    let rank: i32 = chars.as_str().parse().map_err(|_| invalid())?;
    if rank < 1 {
        return Err(invalid());
    }
    Ok(Vector::new(i as i32, rank - 1))
}

/// `None` when the position has no letter/rank spelling
pub fn square_name(position: Vector) -> Option<String> {
    let file = usize::try_from(position.i).ok().and_then(|i| FILES.chars().nth(i))?;
    if position.j < 0 {
        return None;
    }
    Some(format!("{file}{}", position.j + 1))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Vector,
    pub to: Vector,
    pub promotion: Option<PieceKind>,
}

impl FromStr for CoordinateMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || NotationError::Move(s.to_string());
        if !s.is_ascii() || s.len() < 4 {
            return Err(invalid());
        }

        // The second square starts at the second letter
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(index, _)| index)
            .ok_or_else(invalid)?;
        let (from, rest) = s.split_at(split);

        let (to, promotion) = match rest.char_indices().last() {
            Some((index, c)) if index > 0 && c.is_ascii_alphabetic() => {
                let kind = PieceKind::from_char(c)
                    .filter(PieceKind::is_promotion)
                    .ok_or_else(invalid)?;
                (&rest[..index], Some(kind))
            }
            _ => (rest, None),
        };

        Ok(CoordinateMove {
            from: parse_square(from).map_err(|_| invalid())?,
            to: parse_square(to).map_err(|_| invalid())?,
            promotion,
        })
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (square_name(self.from), square_name(self.to)) {
            (Some(from), Some(to)) => write!(f, "{from}{to}")?,
            _ => write!(f, "{}{}", self.from, self.to)?,
        }
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        assert_eq!(parse_square("a1"), Ok(Vector::new(0, 0)));
        assert_eq!(parse_square("e4"), Ok(Vector::new(4, 3)));
        assert_eq!(parse_square("H8"), Ok(Vector::new(7, 7)));
        assert!(parse_square("e0").is_err());
        assert!(parse_square("4e").is_err());
        assert!(parse_square("").is_err());
        assert_eq!(square_name(Vector::new(6, 0)).as_deref(), Some("g1"));
        assert_eq!(square_name(Vector::new(-1, 0)), None);
    }

    #[test]
    fn test_moves() {
        let mv: CoordinateMove = "e2e4".parse().unwrap();
        assert_eq!(mv.from, Vector::new(4, 1));
        assert_eq!(mv.to, Vector::new(4, 3));
        assert_eq!(mv.promotion, None);

        let mv: CoordinateMove = "e7e8n".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(mv.to_string(), "e7e8n");

        assert!("e7e8k".parse::<CoordinateMove>().is_err());
        assert!("e2".parse::<CoordinateMove>().is_err());
        assert!("e2ee4".parse::<CoordinateMove>().is_err());
    }
}
