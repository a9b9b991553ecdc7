#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Zone geometry helpers for level layout.
//!
//! These are pure functions over a finished level graph: seeding zone
//! centres, detecting borders between zones, looking up nearby features and
//! picking nearest neighbours. None of them mutate the world; zone changes
//! are applied by the caller through `Command::SetSectorZone`.

mod nearest;
mod voronoi;

use std::collections::HashSet;

use strata_core::{Position, Zone};
use strata_world::{query, Feature, LevelGraph, Sector, World};

pub use nearest::{closest_pair, closest_position, closest_sector, sort_by_distance_to};
pub use voronoi::{assign_sectors, voronoi_points, VoronoiPoint};

/// Radius of the square searched by [`features_surrounding`].
pub const FEATURE_SEARCH_RADIUS: i32 = 5;

/// Anything that occupies a single position.
pub trait Positioned {
    /// Position occupied by the value.
    fn position(&self) -> Position;
}

impl Positioned for Position {
    fn position(&self) -> Position {
        *self
    }
}

impl Positioned for Sector {
    fn position(&self) -> Position {
        Sector::position(self)
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Position {
        (**self).position()
    }
}

/// Sector outside a zone paired with a neighbour inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderPair<'a> {
    /// Sector outside the zone.
    pub sector: &'a Sector,
    /// Adjacent sector inside the zone.
    pub neighbour: &'a Sector,
}

/// Pairs every sector outside `zone` with its neighbours inside it.
///
/// Sectors are visited in insertion order and neighbours in direction order.
/// Unless `include_all_pairs` is set, only the first neighbour found for each
/// sector is recorded.
#[must_use]
pub fn border_sectors_for_zone(
    level: &LevelGraph,
    zone: Zone,
    include_all_pairs: bool,
) -> Vec<BorderPair<'_>> {
    let mut result = Vec::new();
    for sector in level.sectors() {
        if sector.zone() == zone {
            continue;
        }
        let origin = sector.position();
        for (_, neighbour) in level.neighbours(origin.sector_x(), origin.sector_y()) {
            if neighbour.zone() != zone {
                continue;
            }
            result.push(BorderPair { sector, neighbour });
            if !include_all_pairs {
                break;
            }
        }
    }
    result
}

/// Features covering any position within [`FEATURE_SEARCH_RADIUS`] of
/// `position`, each listed once in the order first encountered.
#[must_use]
pub fn features_surrounding(world: &World, position: Position) -> Vec<&Feature> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for candidate in position.positions_in_area(FEATURE_SEARCH_RADIUS) {
        for feature in query::features_at(world, candidate) {
            if seen.insert(feature.id()) {
                result.push(feature);
            }
        }
    }
    result
}

/// Reports whether any of `features` covers `position`.
///
/// With `skip_unbuilt` set, features still under construction never block.
#[must_use]
pub fn contains_blocking_feature(
    position: Position,
    features: &[&Feature],
    skip_unbuilt: bool,
) -> bool {
    features
        .iter()
        .filter(|feature| !skip_unbuilt || feature.is_built())
        .any(|feature| feature.contains_position(position))
}
