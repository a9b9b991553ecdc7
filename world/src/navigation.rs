//! Sector-graph path search used by the planning systems.

use std::collections::{HashMap, VecDeque};

use strata_core::{Direction, Position};

use crate::{query, World};

/// Constraints applied to a single path search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Permits diagonal steps between sectors.
    pub allow_diagonal: bool,
    /// Forbids following passages to adjacent levels.
    pub same_level_only: bool,
}

/// Finds routes between sectors of a world.
///
/// A returned path lists every sector stepped onto, excluding `from` and
/// including `to`. `Some(vec![])` means the endpoints coincide and `None`
/// means no route exists.
pub trait PathService {
    /// Searches for a route from `from` to `to` under `options`.
    fn find_path(
        &self,
        world: &World,
        from: Position,
        to: Position,
        options: PathOptions,
    ) -> Option<Vec<Position>>;
}

impl<T: PathService + ?Sized> PathService for &T {
    fn find_path(
        &self,
        world: &World,
        from: Position,
        to: Position,
        options: PathOptions,
    ) -> Option<Vec<Position>> {
        (**self).find_path(world, from, to, options)
    }
}

/// Breadth-first search over existing sectors and level passages.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathfinder;

impl GridPathfinder {
    /// Creates a new pathfinder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PathService for GridPathfinder {
    fn find_path(
        &self,
        world: &World,
        from: Position,
        to: Position,
        options: PathOptions,
    ) -> Option<Vec<Position>> {
        let _ = query::sector(world, from)?;
        let _ = query::sector(world, to)?;
        if from == to {
            return Some(Vec::new());
        }
        if options.same_level_only && from.level() != to.level() {
            return None;
        }

        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for next in neighbors(world, current, options) {
                if next == from || came_from.contains_key(&next) {
                    continue;
                }
                let _ = came_from.insert(next, current);
                if next == to {
                    return Some(reconstruct(&came_from, from, to));
                }
                queue.push_back(next);
            }
        }

        None
    }
}

fn neighbors(world: &World, position: Position, options: PathOptions) -> Vec<Position> {
    let Some(level) = query::level(world, position.level()) else {
        return Vec::new();
    };

    let mut result: Vec<Position> = Direction::LEVEL_DIRECTIONS
        .iter()
        .filter(|direction| options.allow_diagonal || !direction.is_diagonal())
        .filter_map(|&direction| level.neighbour(position, direction))
        .map(|sector| sector.position())
        .collect();

    if options.same_level_only {
        return result;
    }

    if let Some(sector) = level.sector_at(position) {
        if sector.has_passage_up() {
            if let Some(upper) = position.level().checked_add(1) {
                result.push(position.on_level(upper));
            }
        }
        if sector.has_passage_down() {
            if let Some(lower) = position.level().checked_sub(1) {
                result.push(position.on_level(lower));
            }
        }
    }

    result
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    from: Position,
    to: Position,
) -> Vec<Position> {
    let mut steps = vec![to];
    let mut cursor = to;
    while let Some(&previous) = came_from.get(&cursor) {
        if previous == from {
            break;
        }
        steps.push(previous);
        cursor = previous;
    }
    steps.reverse();
    steps
}
