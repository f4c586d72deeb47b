//! Per-side values with named fields.

use std::fmt;

use super::index_box::Direction;

/// One value per domain side.
///
/// Used for boundary-condition kinds on the four sides of a patch, so
/// callers never have to remember an array ordering.
///
/// # Example
///
/// ```
/// use bds_rs::types::{Direction, SideBoundaries};
///
/// let sides = SideBoundaries::new("wall", "outflow", "wall", "inflow");
/// assert_eq!(sides.low(Direction::X), &"inflow");
/// assert_eq!(sides.high(Direction::X), &"outflow");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideBoundaries<T> {
    /// Low-y side
    pub south: T,
    /// High-x side
    pub east: T,
    /// High-y side
    pub north: T,
    /// Low-x side
    pub west: T,
}

impl<T> SideBoundaries<T> {
    /// Order: south, east, north, west (counterclockwise from the bottom).
    pub fn new(south: T, east: T, north: T, west: T) -> Self {
        Self {
            south,
            east,
            north,
            west,
        }
    }

    /// Same value on every side.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            south: value.clone(),
            east: value.clone(),
            north: value.clone(),
            west: value,
        }
    }

    /// Value on the low side of `dir` (west for x, south for y).
    #[inline]
    pub fn low(&self, dir: Direction) -> &T {
        match dir {
            Direction::X => &self.west,
            Direction::Y => &self.south,
        }
    }

    /// Value on the high side of `dir` (east for x, north for y).
    #[inline]
    pub fn high(&self, dir: Direction) -> &T {
        match dir {
            Direction::X => &self.east,
            Direction::Y => &self.north,
        }
    }

    /// Map a function over all sides.
    pub fn map<U, F>(self, mut f: F) -> SideBoundaries<U>
    where
        F: FnMut(T) -> U,
    {
        SideBoundaries {
            south: f(self.south),
            east: f(self.east),
            north: f(self.north),
            west: f(self.west),
        }
    }
}

impl<T: Default> Default for SideBoundaries<T> {
    fn default() -> Self {
        Self {
            south: T::default(),
            east: T::default(),
            north: T::default(),
            west: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for SideBoundaries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S:{} E:{} N:{} W:{}",
            self.south, self.east, self.north, self.west
        )
    }
}
