//! Cell, direction and bounding-box primitives
//!
//! Everything the automaton and the analysis passes exchange is built from
//! these small value types. Positions are `glam::UVec2` throughout.

use glam::{IVec2, UVec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cell type used for open space by the bundled cave generators
pub const FLOOR: u32 = 0;

/// Cell type used for solid rock by the bundled cave generators
pub const ROCK: u32 = 1;

/// A single cell of the automaton grid
///
/// The coordinates are redundant with the cell's row-major position in the
/// grid buffer and always agree with it; the grid rewrites them whenever it
/// replaces its buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Cell type (interpretation is up to the generator, e.g. floor or rock)
    pub cell_type: u32,
    /// Column of the cell
    pub x: u32,
    /// Row of the cell
    pub y: u32,
}

impl Cell {
    /// Create a new cell
    #[inline]
    pub fn new(cell_type: u32, x: u32, y: u32) -> Self {
        Self { cell_type, x, y }
    }

    /// Position of the cell as a vector
    #[inline]
    pub fn position(&self) -> UVec2 {
        UVec2::new(self.x, self.y)
    }
}

/// One of the eight unit or diagonal grid steps
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
    /// Towards increasing `y`
    pub const UP: Direction = Direction { dx: 0, dy: 1 };
    /// Towards decreasing `y`
    pub const DOWN: Direction = Direction { dx: 0, dy: -1 };

    #[inline]
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Step from `from` to `to`
    #[inline]
    pub fn between(from: UVec2, to: UVec2) -> Self {
        let step = to.as_ivec2() - from.as_ivec2();
        Self::new(step.x, step.y)
    }

    /// Rotate a quarter turn counter-clockwise
    #[inline]
    pub fn rotate_left(self) -> Self {
        Self::new(-self.dy, self.dx)
    }

    /// Rotate a quarter turn clockwise
    #[inline]
    pub fn rotate_right(self) -> Self {
        Self::new(self.dy, -self.dx)
    }

    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.dx, self.dy)
    }
}

/// Manhattan distance between two grid positions
#[inline]
pub fn manhattan(a: UVec2, b: UVec2) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Inclusive axis-aligned bounding box over grid positions
///
/// A freshly created box is empty (`min > max`); it grows with
/// [`Bounds::include`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Bounds {
    /// The empty box
    pub const EMPTY: Bounds = Bounds {
        min_x: u32::MAX,
        max_x: 0,
        min_y: u32::MAX,
        max_y: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow the box to contain `position`
    #[inline]
    pub fn include(&mut self, position: UVec2) {
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
    }

    /// Smallest box containing both `self` and `other`
    pub fn merge(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Number of columns covered (0 when empty)
    #[inline]
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.max_x - self.min_x + 1
        }
    }

    /// Number of rows covered (0 when empty)
    #[inline]
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.max_y - self.min_y + 1
        }
    }

    #[inline]
    pub fn contains(&self, position: UVec2) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Lower corner of the box
    #[inline]
    pub fn origin(&self) -> UVec2 {
        UVec2::new(self.min_x, self.min_y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::RIGHT.rotate_left(), Direction::UP);
        assert_eq!(Direction::UP.rotate_left(), Direction::LEFT);
        assert_eq!(Direction::RIGHT.rotate_right(), Direction::DOWN);
        assert_eq!(Direction::LEFT.reversed(), Direction::RIGHT);

        // Four quarter turns bring us back
        let d = Direction::new(0, -1);
        assert_eq!(d.rotate_left().rotate_left().rotate_left().rotate_left(), d);
        assert_eq!(d.rotate_left().rotate_right(), d);
    }

    #[test]
    fn test_direction_between() {
        let d = Direction::between(UVec2::new(3, 3), UVec2::new(2, 3));
        assert_eq!(d, Direction::LEFT);
        let d = Direction::between(UVec2::new(0, 0), UVec2::new(1, 1));
        assert_eq!(d, Direction::new(1, 1));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(UVec2::new(0, 0), UVec2::new(3, 4)), 7);
        assert_eq!(manhattan(UVec2::new(5, 1), UVec2::new(2, 6)), 8);
        assert_eq!(manhattan(UVec2::new(2, 2), UVec2::new(2, 2)), 0);
    }

    #[test]
    fn test_bounds() {
        let mut bounds = Bounds::default();
        assert!(bounds.is_empty());
        assert_eq!(bounds.width(), 0);

        bounds.include(UVec2::new(2, 5));
        bounds.include(UVec2::new(4, 3));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.width(), 3);
        assert_eq!(bounds.height(), 3);
        assert!(bounds.contains(UVec2::new(3, 4)));
        assert!(!bounds.contains(UVec2::new(1, 4)));
        assert_eq!(bounds.origin(), UVec2::new(2, 3));

        let merged = bounds.merge(&Bounds::EMPTY);
        assert_eq!(merged, bounds);
    }
}
