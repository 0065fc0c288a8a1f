//! Integer displacement vectors
//!
//! A `Vector` is both a board coordinate and a free displacement between two
//! coordinates. Negative components are legal; only the board enforces bounds.
//! Every operation is total: measurements are widened, and component
//! arithmetic saturates at the `i32` range.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Vector {
    pub i: i32,
    pub j: i32,
}

impl Vector {
    pub const ZERO: Vector = Vector { i: 0, j: 0 };

    #[inline]
    pub const fn new(i: i32, j: i32) -> Self {
        Vector { i, j }
    }

    /// Euclidean length of the vector
    #[inline]
    pub fn norm(self) -> f64 {
        (self.norm_squared() as f64).sqrt()
    }

    #[inline]
    pub const fn norm_squared(self) -> u64 {
        let (i, j) = (self.i.unsigned_abs() as u64, self.j.unsigned_abs() as u64);
        i * i + j * j
    }

    /// The shortest integer vector pointing the same way (divided by the gcd
    /// of its components). The zero vector reduces to itself.
    pub fn smallest_collinear(self) -> Vector {
        match gcd(self.i, self.j) {
            0 => self,
            g => Vector::new(reduce(self.i, g), reduce(self.j, g)),
        }
    }

    /// Every integer point strictly between the origin and `self`, nearest first.
    ///
    /// Both endpoints are excluded, so a unit step or a knight jump yields nothing.
    pub fn included_vectors(self) -> Vec<Vector> {
        let base = self.smallest_collinear();
        // factor < gcd, so every point is strictly shorter than `self`
        (1..gcd(self.i, self.j))
            .map(|factor| Vector::new(scale(base.i, factor), scale(base.j, factor)))
            .collect()
    }

    #[inline]
    pub const fn cross_product(self, other: Vector) -> i128 {
        (self.i as i128) * (other.j as i128) - (self.j as i128) * (other.i as i128)
    }

    #[inline]
    pub const fn is_collinear(self, other: Vector) -> bool {
        self.cross_product(other) == 0
    }

    /// Collinear and pointing the same way: the reduced forms are identical.
    pub fn is_same_direction(self, other: Vector) -> bool {
        self.smallest_collinear() == other.smallest_collinear()
    }

    /// Mirror across the horizontal axis: `(i, -j)`
    #[inline]
    pub const fn mirror_x(self) -> Vector {
        Vector::new(self.i, self.j.saturating_neg())
    }

    /// Mirror across the vertical axis: `(-i, j)`
    #[inline]
    pub const fn mirror_y(self) -> Vector {
        Vector::new(self.i.saturating_neg(), self.j)
    }

    #[inline]
    pub const fn opposite(self) -> Vector {
        Vector::new(self.i.saturating_neg(), self.j.saturating_neg())
    }
}

fn gcd(a: i32, b: i32) -> u32 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `value / divisor` for a divisor of `value`; the quotient always fits.
fn reduce(value: i32, divisor: u32) -> i32 {
    (i64::from(value) / i64::from(divisor)) as i32
}

fn scale(value: i32, factor: u32) -> i32 {
    (i64::from(value) * i64::from(factor)) as i32
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.i.saturating_add(rhs.i), self.j.saturating_add(rhs.j))
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.i.saturating_sub(rhs.i), self.j.saturating_sub(rhs.j))
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        self.opposite()
    }
}

impl Mul<i32> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: i32) -> Vector {
        Vector::new(self.i.saturating_mul(rhs), self.j.saturating_mul(rhs))
    }
}

impl From<(i32, i32)> for Vector {
    fn from((i, j): (i32, i32)) -> Self {
        Vector::new(i, j)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_collinear() {
        assert_eq!(Vector::new(4, -6).smallest_collinear(), Vector::new(2, -3));
        assert_eq!(Vector::new(-6, 3).smallest_collinear(), Vector::new(-2, 1));
        assert_eq!(Vector::new(0, -5).smallest_collinear(), Vector::new(0, -1));
        assert_eq!(Vector::ZERO.smallest_collinear(), Vector::ZERO);
    }

    #[test]
    fn test_included_vectors_excludes_endpoints() {
        assert_eq!(
            Vector::new(3, 3).included_vectors(),
            vec![Vector::new(1, 1), Vector::new(2, 2)]
        );
        assert_eq!(
            Vector::new(-3, 0).included_vectors(),
            vec![Vector::new(-1, 0), Vector::new(-2, 0)]
        );
        assert!(Vector::new(1, 0).included_vectors().is_empty());
        assert!(Vector::new(2, 1).included_vectors().is_empty());
        assert!(Vector::ZERO.included_vectors().is_empty());
    }

    #[test]
    fn test_same_direction_requires_same_sign() {
        assert!(Vector::new(2, 0).is_same_direction(Vector::new(7, 0)));
        assert!(!Vector::new(2, 0).is_same_direction(Vector::new(-1, 0)));
        assert!(Vector::new(2, 0).is_collinear(Vector::new(-1, 0)));
        assert!(!Vector::new(2, 1).is_collinear(Vector::new(1, 1)));
    }

    #[test]
    fn test_mirrors() {
        let v = Vector::new(1, 2);
        assert_eq!(v.mirror_x(), Vector::new(1, -2));
        assert_eq!(v.mirror_y(), Vector::new(-1, 2));
        assert_eq!(-v, Vector::new(-1, -2));
        assert_eq!(v.cross_product(Vector::new(2, 4)), 0);
        assert_eq!(Vector::new(3, 4).norm(), 5.0);
    }

    #[test]
    fn test_extreme_components() {
        let min = Vector::new(i32::MIN, 0);
        assert_eq!(min.smallest_collinear(), Vector::new(-1, 0));
        assert!(min.is_same_direction(Vector::new(-3, 0)));
        assert!(!min.is_same_direction(Vector::new(3, 0)));

        let corner = Vector::new(i32::MIN, i32::MIN);
        assert_eq!(corner.norm_squared(), 1 << 63);
        assert_eq!(corner.smallest_collinear(), Vector::new(-1, -1));
        assert_eq!(corner.cross_product(Vector::new(i32::MIN, i32::MAX)), -(1i128 << 63) + (1i128 << 31));

        let skew = Vector::new(i32::MIN, i32::MAX);
        assert_eq!(skew.smallest_collinear(), skew);
        assert!(skew.included_vectors().is_empty());
        assert_eq!(Vector::new(i32::MAX, 0).norm_squared(), (i32::MAX as u64).pow(2));
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Vector::new(i32::MIN, 1).opposite(), Vector::new(i32::MAX, -1));
        assert_eq!(Vector::new(0, i32::MIN).mirror_x(), Vector::new(0, i32::MAX));
        assert_eq!(Vector::new(i32::MAX, 0) + Vector::new(1, 0), Vector::new(i32::MAX, 0));
        assert_eq!(Vector::new(i32::MIN, 0) - Vector::new(1, 0), Vector::new(i32::MIN, 0));
        assert_eq!(Vector::new(i32::MAX, -1) * 2, Vector::new(i32::MAX, -2));
    }
}
