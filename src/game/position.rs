//! Positions, directions and adjacency.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::game::TileHandle;

/// A position on the board.
///
/// Row 0 is the bottom row, so [`Direction::Up`] increases `y`. Negative
/// coordinates are representable but never valid on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row, counted from the bottom).
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the top row.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the bottom row.
    Down,
    /// Towards the first column.
    Left,
}

impl Direction {
    /// All directions in clockwise order, starting at [`Direction::Up`].
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The name used for the default action bound to this direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }

    /// Parse a direction from its action name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// The direction of the single step from `from` to `to`, if they are neighbours.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|&d| from.step(d) == to)
    }

    /// Coordinate delta of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The neighbours of a tile, one slot per direction.
///
/// A slot is `None` when the neighbour would fall outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjacent([Option<TileHandle>; 4]);

impl Adjacent {
    pub(crate) fn from_fn(mut f: impl FnMut(Direction) -> Option<TileHandle>) -> Self {
        Self(Direction::ALL.map(&mut f))
    }

    /// The neighbour in `direction`, if it is on the board.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> Option<TileHandle> {
        self.0[direction.index()]
    }

    /// Iterate over every direction and its neighbour, clockwise from up.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Option<TileHandle>)> + '_ {
        Direction::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Iterate over the neighbours that are on the board.
    pub fn tiles(&self) -> impl Iterator<Item = TileHandle> + '_ {
        self.0.iter().flatten().copied()
    }

    /// Number of neighbours that are on the board.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|t| t.is_some()).count()
    }
}

impl Index<Direction> for Adjacent {
    type Output = Option<TileHandle>;

    fn index(&self, direction: Direction) -> &Self::Output {
        &self.0[direction.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_offsets() {
        let p = Position::new(2, 2);
        assert_eq!(p.step(Direction::Up), Position::new(2, 3));
        assert_eq!(p.step(Direction::Right), Position::new(3, 2));
        assert_eq!(p.step(Direction::Down), Position::new(2, 1));
        assert_eq!(p.step(Direction::Left), Position::new(1, 2));
    }

    #[test]
    fn test_step_can_leave_the_board() {
        assert_eq!(Position::new(0, 0).step(Direction::Left), Position::new(-1, 0));
    }

    #[test]
    fn test_direction_between_neighbours() {
        let p = Position::new(1, 1);
        assert_eq!(Direction::between(p, Position::new(2, 1)), Some(Direction::Right));
        assert_eq!(Direction::between(p, Position::new(1, 0)), Some(Direction::Down));
        assert_eq!(Direction::between(p, Position::new(2, 2)), None);
        assert_eq!(Direction::between(p, p), None);
    }

    #[test]
    fn test_direction_names_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_name(direction.name()), Some(direction));
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::from_name("sideways"), None);
    }

    #[test]
    fn test_adjacent_default_is_empty() {
        let adj = Adjacent::default();
        assert_eq!(adj.count(), 0);
        assert!(adj[Direction::Up].is_none());
    }
}
