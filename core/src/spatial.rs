//! Grid geometry primitives shared by every generation system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Level;

/// Location of a single sector expressed as level plus grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    level: Level,
    sector_x: i32,
    sector_y: i32,
}

impl Position {
    /// Creates a new sector position.
    #[must_use]
    pub const fn new(level: Level, sector_x: i32, sector_y: i32) -> Self {
        Self {
            level,
            sector_x,
            sector_y,
        }
    }

    /// Level the position lies on.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Column of the sector within its level.
    #[must_use]
    pub const fn sector_x(&self) -> i32 {
        self.sector_x
    }

    /// Row of the sector within its level.
    #[must_use]
    pub const fn sector_y(&self) -> i32 {
        self.sector_y
    }

    /// Same grid coordinates on a different level.
    #[must_use]
    pub const fn on_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    /// Straight-line distance between two positions, ignoring levels.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = f64::from(self.sector_x) - f64::from(other.sector_x);
        let dy = f64::from(self.sector_y) - f64::from(other.sector_y);
        dx.hypot(dy)
    }

    /// Position reached by walking `distance` sectors along `direction`.
    ///
    /// Diagonal directions advance `distance` sectors on both axes.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            level: self.level,
            sector_x: self.sector_x.saturating_add(dx.saturating_mul(distance)),
            sector_y: self.sector_y.saturating_add(dy.saturating_mul(distance)),
        }
    }

    /// Adjacent position in the provided direction.
    #[must_use]
    pub fn neighbour(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// Every position in the square of the given radius centred here,
    /// row-major from the top-left corner.
    #[must_use]
    pub fn positions_in_area(self, radius: i32) -> Vec<Position> {
        let radius = radius.max(0);
        let side = usize::try_from(radius).unwrap_or(0) * 2 + 1;
        let mut result = Vec::with_capacity(side * side);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                result.push(Self::new(
                    self.level,
                    self.sector_x.saturating_add(dx),
                    self.sector_y.saturating_add(dy),
                ));
            }
        }
        result
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {}, {})", self.level, self.sector_x, self.sector_y)
    }
}

/// Rounded centroid of the provided positions.
///
/// The result lies on the level of the first position. Returns `None` for an
/// empty slice.
#[must_use]
pub fn middle_point(positions: &[Position]) -> Option<Position> {
    let first = positions.first()?;
    let count = positions.len() as f64;
    let (sum_x, sum_y) = positions.iter().fold((0.0, 0.0), |(x, y), position| {
        (
            x + f64::from(position.sector_x),
            y + f64::from(position.sector_y),
        )
    });
    Some(Position::new(
        first.level,
        (sum_x / count).round() as i32,
        (sum_y / count).round() as i32,
    ))
}

/// Movement directions available within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing rows.
    North,
    /// Toward decreasing rows and increasing columns.
    NorthEast,
    /// Toward increasing columns.
    East,
    /// Toward increasing rows and columns.
    SouthEast,
    /// Toward increasing rows.
    South,
    /// Toward increasing rows and decreasing columns.
    SouthWest,
    /// Toward decreasing columns.
    West,
    /// Toward decreasing rows and columns.
    NorthWest,
}

impl Direction {
    /// All level directions in enumeration order.
    pub const LEVEL_DIRECTIONS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Column and row deltas of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Reports whether the direction moves along both axes.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

/// Inclusive axis-aligned rectangle of sector coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorBounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl SectorBounds {
    /// Creates bounds from two inclusive corners.
    #[must_use]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest column inside the bounds.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Smallest row inside the bounds.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Largest column inside the bounds.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Largest row inside the bounds.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Reports whether the grid coordinate lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, sector_x: i32, sector_y: i32) -> bool {
        sector_x >= self.min_x
            && sector_x <= self.max_x
            && sector_y >= self.min_y
            && sector_y <= self.max_y
    }

    /// Centre of the bounds on the provided level, rounded toward the minimum corner.
    #[must_use]
    pub const fn center(&self, level: Level) -> Position {
        Position::new(
            level,
            self.min_x + (self.max_x - self.min_x) / 2,
            self.min_y + (self.max_y - self.min_y) / 2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean_and_ignores_levels() {
        let a = Position::new(0, 1, 1);
        let b = Position::new(3, 4, 5);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn diagonal_offsets_advance_both_axes() {
        let origin = Position::new(2, 0, 0);
        assert_eq!(origin.offset(Direction::SouthEast, 3), Position::new(2, 3, 3));
        assert_eq!(origin.offset(Direction::North, 7), Position::new(2, 0, -7));
        assert_eq!(origin.offset(Direction::NorthWest, 2), Position::new(2, -2, -2));
    }

    #[test]
    fn area_enumeration_is_row_major_square() {
        let centre = Position::new(1, 5, 5);
        let area = centre.positions_in_area(1);
        assert_eq!(area.len(), 9);
        assert_eq!(area[0], Position::new(1, 4, 4));
        assert_eq!(area[1], Position::new(1, 5, 4));
        assert_eq!(area[4], centre);
        assert_eq!(area[8], Position::new(1, 6, 6));
    }

    #[test]
    fn middle_point_rounds_the_centroid() {
        let positions = [
            Position::new(4, 0, 0),
            Position::new(4, 3, 0),
            Position::new(4, 3, 2),
        ];
        assert_eq!(middle_point(&positions), Some(Position::new(4, 2, 1)));
        assert_eq!(middle_point(&[]), None);
    }

    #[test]
    fn only_four_level_directions_are_diagonal() {
        let diagonal = Direction::LEVEL_DIRECTIONS
            .iter()
            .filter(|direction| direction.is_diagonal())
            .count();
        assert_eq!(diagonal, 4);
    }

    #[test]
    fn bounds_center_uses_the_requested_level() {
        let bounds = SectorBounds::new(-4, 0, 5, 9);
        assert_eq!(bounds.center(7), Position::new(7, 0, 4));
        assert!(bounds.contains(-4, 9));
        assert!(!bounds.contains(6, 0));
    }
}
