//! Greedy seeding of zone centres around a level's camps.

use strata_core::{middle_point, random_int, Direction, Position, WorldSeed, Zone};
use strata_world::{LevelGraph, Sector};
use tracing::debug;

use crate::{sort_by_distance_to, Positioned};

const FARTHEST_MIN_SEPARATION: f64 = 8.0;
const DIRECTIONAL_MIN_SEPARATION: f64 = 6.0;
const DIRECTIONAL_BASE_DISTANCE: i32 = 7;
const DIRECTIONAL_DISTANCE_SPREAD: i64 = 7;
const DIRECTIONAL_SALT_BASE: i64 = 10_101;
const DIRECTIONAL_SALT_SEED_MODULUS: i64 = 11;
const DIRECTIONAL_SALT_SEED_FACTOR: i64 = 182;
const DIRECTIONAL_SALT_DIRECTION_FACTOR: i64 = 549;
const DIRECTIONAL_SALT_LEVEL_FACTOR: i64 = 28;

/// Seed of a zone together with the sectors assigned to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoronoiPoint {
    /// Centre of the zone.
    pub position: Position,
    /// Zone the centre seeds.
    pub zone: Zone,
    /// Sectors closer to this centre than to any other.
    pub sectors: Vec<Position>,
}

impl VoronoiPoint {
    fn new(position: Position, zone: Zone) -> Self {
        Self {
            position,
            zone,
            sectors: Vec::new(),
        }
    }
}

impl Positioned for VoronoiPoint {
    fn position(&self) -> Position {
        self.position
    }
}

/// Places zone centres for a level.
///
/// The first centre sits at the middle of the level's camps (or the middle
/// of its bounds when it has none) and the second on the sector farthest
/// from it. Walking inward from there, the first sector more than 8 sectors
/// from both is added. Finally one candidate per direction is tried at a
/// seeded distance of 7 to 13 sectors from the camp centre; candidates
/// outside the level or within 6 sectors of an earlier centre are dropped,
/// so the number of centres varies by seed and level.
#[must_use]
pub fn voronoi_points(seed: WorldSeed, level: &LevelGraph) -> Vec<VoronoiPoint> {
    let centre = middle_point(level.camp_positions())
        .unwrap_or_else(|| level.bounds().center(level.level()));
    let mut points = vec![VoronoiPoint::new(centre, Zone::PoiTemp)];

    let mut by_distance: Vec<Position> = level.sectors().iter().map(Sector::position).collect();
    by_distance.sort_by(sort_by_distance_to(centre));

    let Some(&farthest) = by_distance.last() else {
        return points;
    };
    points.push(VoronoiPoint::new(farthest, Zone::ExtraCampable));

    for &candidate in by_distance.iter().rev().skip(1) {
        if try_add(&mut points, candidate, FARTHEST_MIN_SEPARATION) {
            break;
        }
    }

    let seed_salt =
        seed.get().rem_euclid(DIRECTIONAL_SALT_SEED_MODULUS) * DIRECTIONAL_SALT_SEED_FACTOR;
    let level_salt = i64::from(level.level()) * DIRECTIONAL_SALT_LEVEL_FACTOR;
    for (index, &direction) in (0_i64..).zip(Direction::LEVEL_DIRECTIONS.iter()) {
        let salt = DIRECTIONAL_SALT_BASE
            + seed_salt
            + index * DIRECTIONAL_SALT_DIRECTION_FACTOR
            + level_salt;
        let spread = random_int(salt, 0, DIRECTIONAL_DISTANCE_SPREAD);
        let distance = DIRECTIONAL_BASE_DISTANCE + i32::try_from(spread).unwrap_or(0);
        let candidate = centre.offset(direction, distance);

        if !level.contains_position(candidate) {
            debug!(%candidate, ?direction, "voronoi candidate outside level");
            continue;
        }
        if !try_add(&mut points, candidate, DIRECTIONAL_MIN_SEPARATION) {
            debug!(%candidate, ?direction, "voronoi candidate too close to placed point");
        }
    }

    points
}

/// Assigns every sector of the level to its nearest point.
///
/// Sectors equally close to several points go to the earliest of them. Any
/// previous assignment is replaced.
pub fn assign_sectors(level: &LevelGraph, points: &mut [VoronoiPoint]) {
    for point in points.iter_mut() {
        point.sectors.clear();
    }

    for sector in level.sectors() {
        let position = sector.position();
        let mut nearest: Option<(usize, f64)> = None;
        for (index, point) in points.iter().enumerate() {
            let distance = point.position.distance_to(position);
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((index, distance)),
            }
        }
        if let Some((index, _)) = nearest {
            points[index].sectors.push(position);
        }
    }
}

fn try_add(points: &mut Vec<VoronoiPoint>, position: Position, min_separation: f64) -> bool {
    let crowded = points
        .iter()
        .any(|point| point.position.distance_to(position) <= min_separation);
    if crowded {
        return false;
    }
    points.push(VoronoiPoint::new(position, Zone::PoiTemp));
    true
}

#[cfg(test)]
mod tests {
    use strata_core::{Command, LevelStage, SectorBounds};
    use strata_world::{apply, query, World};

    use super::*;

    fn square(level: i32, half: i32, camps: &[(i32, i32)]) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLevel {
                level,
                bounds: SectorBounds::new(-half, -half, half, half),
                stages: vec![LevelStage::Early],
            },
            &mut events,
        );
        for y in -half..=half {
            for x in -half..=half {
                apply(
                    &mut world,
                    Command::AddSector {
                        position: Position::new(level, x, y),
                        zone: Zone::PoiTemp,
                        is_camp: camps.contains(&(x, y)),
                    },
                    &mut events,
                );
            }
        }
        world
    }

    #[test]
    fn camp_centre_and_farthest_sector_come_first() {
        let world = square(4, 12, &[(0, 0), (2, 0)]);
        let level = query::level(&world, 4).expect("level exists");
        let points = voronoi_points(WorldSeed::new(11), level);

        assert_eq!(points[0].position, Position::new(4, 1, 0));
        assert_eq!(points[0].zone, Zone::PoiTemp);
        assert_eq!(points[1].zone, Zone::ExtraCampable);
        // The two western corners tie; the later one inserted wins.
        assert_eq!(points[1].position, Position::new(4, -12, 12));
        assert!(points[2..].iter().all(|point| point.zone == Zone::PoiTemp));
    }

    #[test]
    fn points_keep_their_separation() {
        for raw in -6..6 {
            let world = square(raw, 15, &[(1, -2)]);
            let level = query::level(&world, raw).expect("level exists");
            let points = voronoi_points(WorldSeed::new(i64::from(raw) * 37), level);

            assert!((2..=11).contains(&points.len()), "seed {raw}: {}", points.len());
            for (index, point) in points.iter().enumerate().skip(2) {
                assert!(level.contains_position(point.position));
                for earlier in &points[..index] {
                    assert!(
                        earlier.position.distance_to(point.position) > DIRECTIONAL_MIN_SEPARATION,
                        "seed {raw}: {} too close to {}",
                        point.position,
                        earlier.position
                    );
                }
            }
        }
    }

    #[test]
    fn inward_point_clears_eight_sectors() {
        let world = square(0, 12, &[(0, 0)]);
        let level = query::level(&world, 0).expect("level exists");
        let points = voronoi_points(WorldSeed::new(0), level);
        let third = &points[2];
        assert!(third.position.distance_to(points[0].position) > FARTHEST_MIN_SEPARATION);
        assert!(third.position.distance_to(points[1].position) > FARTHEST_MIN_SEPARATION);
    }

    #[test]
    fn seeding_replays_for_the_same_inputs() {
        let world = square(7, 14, &[(3, 3)]);
        let level = query::level(&world, 7).expect("level exists");
        let seed = WorldSeed::new(-123);
        assert_eq!(voronoi_points(seed, level), voronoi_points(seed, level));
    }

    #[test]
    fn tiny_levels_yield_the_two_special_points() {
        let world = square(2, 0, &[(0, 0)]);
        let level = query::level(&world, 2).expect("level exists");
        let points = voronoi_points(WorldSeed::new(5), level);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].position, Position::new(2, 0, 0));
    }

    #[test]
    fn empty_levels_seed_only_the_bounds_centre() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLevel {
                level: 9,
                bounds: SectorBounds::new(0, 0, 10, 6),
                stages: Vec::new(),
            },
            &mut events,
        );
        let level = query::level(&world, 9).expect("level exists");
        let points = voronoi_points(WorldSeed::new(1), level);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].position, Position::new(9, 5, 3));
    }

    #[test]
    fn sectors_go_to_their_nearest_point() {
        let world = square(0, 3, &[(0, 0)]);
        let level = query::level(&world, 0).expect("level exists");
        let mut points = vec![
            VoronoiPoint::new(Position::new(0, -2, 0), Zone::Poi1),
            VoronoiPoint::new(Position::new(0, 2, 0), Zone::Poi2),
        ];
        assign_sectors(level, &mut points);

        assert_eq!(points[0].sectors.len() + points[1].sectors.len(), 49);
        // Column 0 is equidistant and goes to the first point.
        assert!(points[0].sectors.contains(&Position::new(0, 0, 3)));
        assert!(points[1].sectors.contains(&Position::new(0, 1, -3)));
        assert!(points[0].sectors.iter().all(|position| position.sector_x() <= 0));

        assign_sectors(level, &mut points);
        assert_eq!(points[0].sectors.len(), 28);
    }
}
