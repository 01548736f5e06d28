//! Swipe directions as a bit set.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use swipedeck_geometry::Vector;

/// A set of cardinal swipe directions.
///
/// Single directions come out of [`Direction::classify`]; composite masks
/// such as [`Direction::HORIZONTAL`] describe what a deck accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0b0000);
    pub const LEFT: Direction = Direction(0b0001);
    pub const RIGHT: Direction = Direction(0b0010);
    pub const UP: Direction = Direction(0b0100);
    pub const DOWN: Direction = Direction(0b1000);
    pub const HORIZONTAL: Direction = Direction(0b0011);
    pub const VERTICAL: Direction = Direction(0b1100);
    pub const ALL: Direction = Direction(0b1111);

    pub const fn from_bits(bits: u8) -> Self {
        Direction(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Dominant cardinal direction of a displacement. Ties between the axes go
    /// horizontal; a zero or non-finite vector has no direction.
    pub fn classify(vector: Vector) -> Direction {
        let Vector { dx, dy } = vector;
        if !vector.is_finite() || vector.is_zero() {
            return Direction::NONE;
        }
        if dx.abs() >= dy.abs() {
            if dx >= 0.0 {
                Direction::RIGHT
            } else {
                Direction::LEFT
            }
        } else if dy <= 0.0 {
            Direction::UP
        } else {
            Direction::DOWN
        }
    }

    pub const fn union(self, other: Direction) -> Direction {
        Direction(self.0 | other.0)
    }

    pub const fn intersect(self, other: Direction) -> Direction {
        Direction(self.0 & other.0)
    }

    /// Whether every direction of `candidate` is in `self`.
    pub const fn contains(self, candidate: Direction) -> bool {
        self.0 & candidate.0 == candidate.0
    }

    /// Whether the two sets share a direction.
    pub const fn intersects(self, other: Direction) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this is exactly one of left, right, up or down.
    pub const fn is_cardinal(self) -> bool {
        self.0.count_ones() == 1
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        self.union(rhs)
    }
}

impl BitAnd for Direction {
    type Output = Direction;

    fn bitand(self, rhs: Direction) -> Direction {
        self.intersect(rhs)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Direction::NONE => "None",
            Direction::LEFT => "Left",
            Direction::RIGHT => "Right",
            Direction::UP => "Up",
            Direction::DOWN => "Down",
            Direction::HORIZONTAL => "Horizontal",
            Direction::VERTICAL => "Vertical",
            Direction::ALL => "All",
            _ => "Unknown",
        };
        f.write_str(name)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Direction({self}, {:#06b})", self.0)
    }
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
