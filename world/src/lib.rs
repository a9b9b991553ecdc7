#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world graph for Strata.
//!
//! The world owns every level graph, the sectors inside them, and the
//! features placed across levels. It is mutated exclusively through
//! [`apply`], which reports each change as an [`Event`]; everything else
//! reads it through the [`query`] module.

mod navigation;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use strata_core::{
    Command, CriticalPathType, Direction, Event, FeatureFootprint, FeatureId, FeatureKind,
    GraphError, Level, LevelStage, Position, SectorBounds, Zone,
};
use tracing::warn;

pub use navigation::{GridPathfinder, PathOptions, PathService};

/// Represents the authoritative generated world.
#[derive(Debug, Default)]
pub struct World {
    levels: BTreeMap<Level, LevelGraph>,
    features: Vec<Feature>,
    next_feature_id: u32,
}

impl World {
    /// Creates an empty world with no levels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn level_mut(&mut self, level: Level) -> Result<&mut LevelGraph, GraphError> {
        self.levels
            .get_mut(&level)
            .ok_or(GraphError::UnknownLevel(level))
    }

    fn sector_mut(&mut self, position: Position) -> Result<&mut Sector, GraphError> {
        self.level_mut(position.level())?
            .sector_mut(position.sector_x(), position.sector_y())
            .ok_or(GraphError::UnknownSector(position))
    }

    fn add_level(
        &mut self,
        level: Level,
        bounds: SectorBounds,
        stages: Vec<LevelStage>,
    ) -> Result<Event, GraphError> {
        if self.levels.contains_key(&level) {
            return Err(GraphError::DuplicateLevel(level));
        }
        let _ = self
            .levels
            .insert(level, LevelGraph::new(level, bounds, stages));
        Ok(Event::LevelAdded { level })
    }

    fn add_sector(
        &mut self,
        position: Position,
        zone: Zone,
        is_camp: bool,
    ) -> Result<Event, GraphError> {
        let level = self.level_mut(position.level())?;
        level.insert(Sector::new(position, zone, is_camp))?;
        Ok(Event::SectorAdded { position })
    }

    fn connect_levels(&mut self, lower: Position) -> Result<Event, GraphError> {
        let upper_level = lower
            .level()
            .checked_add(1)
            .ok_or(GraphError::UnknownLevel(lower.level()))?;
        let upper = lower.on_level(upper_level);

        // Validate both ends before touching either sector.
        let _ = self.sector_mut(upper)?;
        self.sector_mut(lower)?.passage_up = true;
        self.sector_mut(upper)?.passage_down = true;
        Ok(Event::LevelsConnected { lower, upper })
    }

    fn place_feature(&mut self, kind: FeatureKind, footprint: FeatureFootprint, built: bool) -> Event {
        let id = FeatureId::new(self.next_feature_id);
        self.next_feature_id = self.next_feature_id.saturating_add(1);
        self.features.push(Feature {
            id,
            kind,
            footprint,
            built,
        });
        Event::FeaturePlaced { feature: id }
    }

    fn complete_feature(&mut self, feature: FeatureId) -> Result<Event, GraphError> {
        let entry = self
            .features
            .iter_mut()
            .find(|candidate| candidate.id == feature)
            .ok_or(GraphError::UnknownFeature(feature))?;
        entry.built = true;
        Ok(Event::FeatureCompleted { feature })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Structurally invalid commands leave the world untouched and are reported
/// through [`Event::CommandRejected`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let outcome = match command {
        Command::AddLevel {
            level,
            bounds,
            stages,
        } => world.add_level(level, bounds, stages).map(Some),
        Command::AddSector {
            position,
            zone,
            is_camp,
        } => world.add_sector(position, zone, is_camp).map(Some),
        Command::ConnectLevels { lower } => world.connect_levels(lower).map(Some),
        Command::SetSectorZone { position, zone } => world.sector_mut(position).map(|sector| {
            sector.zone = zone;
            Some(Event::SectorZoneChanged { position, zone })
        }),
        Command::PlaceFeature {
            kind,
            footprint,
            built,
        } => Ok(Some(world.place_feature(kind, footprint, built))),
        Command::CompleteFeature { feature } => world.complete_feature(feature).map(Some),
        Command::TagCriticalPath {
            position,
            path_type,
        } => world.sector_mut(position).map(|sector| {
            sector
                .critical_paths
                .insert(path_type)
                .then_some(Event::CriticalPathTagged {
                    position,
                    path_type,
                })
        }),
        Command::RecordCampDistance { position, distance } => {
            world.sector_mut(position).map(|sector| {
                if sector.distance_to_camp.is_some() {
                    return None;
                }
                sector.distance_to_camp = Some(distance);
                Some(Event::CampDistanceRecorded { position, distance })
            })
        }
    };

    match outcome {
        Ok(Some(event)) => out_events.push(event),
        Ok(None) => {}
        Err(reason) => {
            warn!(%reason, "rejected world command");
            out_events.push(Event::CommandRejected { reason });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use strata_core::{FeatureId, Level, LevelStage, Position};

    use super::{Feature, LevelGraph, Sector, World};

    /// Retrieves the graph of a single level.
    #[must_use]
    pub fn level(world: &World, level: Level) -> Option<&LevelGraph> {
        world.levels.get(&level)
    }

    /// Iterates over every level graph from the lowest level upward.
    pub fn levels(world: &World) -> impl Iterator<Item = &LevelGraph> {
        world.levels.values()
    }

    /// Retrieves the sector occupying the provided position.
    #[must_use]
    pub fn sector(world: &World, position: Position) -> Option<&Sector> {
        level(world, position.level())?.sector_at(position)
    }

    /// Stages of a level; empty when the level does not exist.
    #[must_use]
    pub fn stages(world: &World, level: Level) -> &[LevelStage] {
        world
            .levels
            .get(&level)
            .map(LevelGraph::stages)
            .unwrap_or_default()
    }

    /// Every placed feature in placement order.
    #[must_use]
    pub fn features(world: &World) -> &[Feature] {
        &world.features
    }

    /// Retrieves a feature by identifier.
    #[must_use]
    pub fn feature(world: &World, feature: FeatureId) -> Option<&Feature> {
        world.features.iter().find(|candidate| candidate.id == feature)
    }

    /// Features whose footprint covers the provided position.
    #[must_use]
    pub fn features_at(world: &World, position: Position) -> Vec<&Feature> {
        world
            .features
            .iter()
            .filter(|feature| feature.contains_position(position))
            .collect()
    }
}

/// Graph of the sectors that make up a single level.
#[derive(Clone, Debug)]
pub struct LevelGraph {
    level: Level,
    bounds: SectorBounds,
    stages: Vec<LevelStage>,
    sectors: Vec<Sector>,
    index: HashMap<(i32, i32), usize>,
    camp_positions: Vec<Position>,
}

impl LevelGraph {
    fn new(level: Level, bounds: SectorBounds, stages: Vec<LevelStage>) -> Self {
        Self {
            level,
            bounds,
            stages,
            sectors: Vec::new(),
            index: HashMap::new(),
            camp_positions: Vec::new(),
        }
    }

    fn insert(&mut self, sector: Sector) -> Result<(), GraphError> {
        let position = sector.position;
        if !self.contains_position(position) {
            return Err(GraphError::OutOfBounds(position));
        }
        let key = (position.sector_x(), position.sector_y());
        if self.index.contains_key(&key) {
            return Err(GraphError::DuplicateSector(position));
        }
        if sector.is_camp {
            self.camp_positions.push(position);
        }
        let _ = self.index.insert(key, self.sectors.len());
        self.sectors.push(sector);
        Ok(())
    }

    fn sector_mut(&mut self, sector_x: i32, sector_y: i32) -> Option<&mut Sector> {
        let index = *self.index.get(&(sector_x, sector_y))?;
        self.sectors.get_mut(index)
    }

    /// Level index of the graph.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Inclusive rectangle every sector of the level lies within.
    #[must_use]
    pub const fn bounds(&self) -> SectorBounds {
        self.bounds
    }

    /// Progression stages the level is divided into.
    #[must_use]
    pub fn stages(&self) -> &[LevelStage] {
        &self.stages
    }

    /// Sectors in insertion order.
    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Number of sectors in the level.
    #[must_use]
    pub fn num_sectors(&self) -> usize {
        self.sectors.len()
    }

    /// Positions of the level's camp sectors in insertion order.
    #[must_use]
    pub fn camp_positions(&self) -> &[Position] {
        &self.camp_positions
    }

    /// Sector at the provided grid coordinate.
    #[must_use]
    pub fn sector(&self, sector_x: i32, sector_y: i32) -> Option<&Sector> {
        let index = *self.index.get(&(sector_x, sector_y))?;
        self.sectors.get(index)
    }

    /// Sector at the provided position, if the position lies on this level.
    #[must_use]
    pub fn sector_at(&self, position: Position) -> Option<&Sector> {
        if position.level() != self.level {
            return None;
        }
        self.sector(position.sector_x(), position.sector_y())
    }

    /// Sector adjacent to `position` in `direction`.
    #[must_use]
    pub fn neighbour(&self, position: Position, direction: Direction) -> Option<&Sector> {
        self.sector_at(position.neighbour(direction))
    }

    /// Existing neighbours of a grid coordinate in direction enumeration order.
    #[must_use]
    pub fn neighbours(&self, sector_x: i32, sector_y: i32) -> Vec<(Direction, &Sector)> {
        let origin = Position::new(self.level, sector_x, sector_y);
        Direction::LEVEL_DIRECTIONS
            .iter()
            .filter_map(|&direction| {
                self.neighbour(origin, direction)
                    .map(|sector| (direction, sector))
            })
            .collect()
    }

    /// Reports whether the position lies on this level within its bounds.
    #[must_use]
    pub fn contains_position(&self, position: Position) -> bool {
        position.level() == self.level
            && self
                .bounds
                .contains(position.sector_x(), position.sector_y())
    }
}

/// Atomic addressable cell of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sector {
    position: Position,
    zone: Zone,
    is_camp: bool,
    passage_up: bool,
    passage_down: bool,
    critical_paths: BTreeSet<CriticalPathType>,
    distance_to_camp: Option<u32>,
}

impl Sector {
    fn new(position: Position, zone: Zone, is_camp: bool) -> Self {
        Self {
            position,
            zone,
            is_camp,
            passage_up: false,
            passage_down: false,
            critical_paths: BTreeSet::new(),
            distance_to_camp: None,
        }
    }

    /// Position of the sector.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Zone the sector belongs to.
    #[must_use]
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    /// Reports whether the sector is a camp.
    #[must_use]
    pub const fn is_camp(&self) -> bool {
        self.is_camp
    }

    /// Reports whether a passage leads to the level above.
    #[must_use]
    pub const fn has_passage_up(&self) -> bool {
        self.passage_up
    }

    /// Reports whether a passage leads to the level below.
    #[must_use]
    pub const fn has_passage_down(&self) -> bool {
        self.passage_down
    }

    /// Critical paths that traverse the sector.
    pub fn critical_paths(&self) -> impl Iterator<Item = CriticalPathType> + '_ {
        self.critical_paths.iter().copied()
    }

    /// Reports whether the sector lies on a critical path of the given type.
    #[must_use]
    pub fn is_on_critical_path(&self, path_type: CriticalPathType) -> bool {
        self.critical_paths.contains(&path_type)
    }

    /// Memoized path distance to the nearest camp, if already computed.
    #[must_use]
    pub const fn distance_to_camp(&self) -> Option<u32> {
        self.distance_to_camp
    }
}

/// Placed world object covering sectors on one or more levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    id: FeatureId,
    kind: FeatureKind,
    footprint: FeatureFootprint,
    built: bool,
}

impl Feature {
    /// Identifier allocated by the world.
    #[must_use]
    pub const fn id(&self) -> FeatureId {
        self.id
    }

    /// Kind of the feature.
    #[must_use]
    pub const fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Region covered by the feature.
    #[must_use]
    pub const fn footprint(&self) -> FeatureFootprint {
        self.footprint
    }

    /// Reports whether construction of the feature finished.
    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.built
    }

    /// Reports whether the feature covers the provided position.
    #[must_use]
    pub fn contains_position(&self, position: Position) -> bool {
        self.footprint.contains(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_level(level: Level) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLevel {
                level,
                bounds: SectorBounds::new(0, 0, 4, 4),
                stages: vec![LevelStage::Early, LevelStage::Late],
            },
            &mut events,
        );
        assert_eq!(events, vec![Event::LevelAdded { level }]);
        world
    }

    fn add_sector(world: &mut World, position: Position, is_camp: bool) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::AddSector {
                position,
                zone: Zone::PoiTemp,
                is_camp,
            },
            &mut events,
        );
        events
    }

    #[test]
    fn sectors_keep_insertion_order_and_camps() {
        let mut world = world_with_level(3);
        let _ = add_sector(&mut world, Position::new(3, 2, 2), false);
        let _ = add_sector(&mut world, Position::new(3, 0, 1), true);
        let _ = add_sector(&mut world, Position::new(3, 1, 1), true);

        let level = query::level(&world, 3).expect("level exists");
        let order: Vec<Position> = level.sectors().iter().map(Sector::position).collect();
        assert_eq!(
            order,
            vec![
                Position::new(3, 2, 2),
                Position::new(3, 0, 1),
                Position::new(3, 1, 1),
            ]
        );
        assert_eq!(
            level.camp_positions(),
            &[Position::new(3, 0, 1), Position::new(3, 1, 1)]
        );
        assert_eq!(level.num_sectors(), 3);
    }

    #[test]
    fn invalid_sectors_are_rejected_without_mutation() {
        let mut world = world_with_level(0);
        let outside = Position::new(0, 9, 0);
        assert_eq!(
            add_sector(&mut world, outside, false),
            vec![Event::CommandRejected {
                reason: GraphError::OutOfBounds(outside),
            }]
        );

        let missing_level = Position::new(5, 0, 0);
        assert_eq!(
            add_sector(&mut world, missing_level, false),
            vec![Event::CommandRejected {
                reason: GraphError::UnknownLevel(5),
            }]
        );

        let position = Position::new(0, 1, 1);
        let _ = add_sector(&mut world, position, false);
        assert_eq!(
            add_sector(&mut world, position, false),
            vec![Event::CommandRejected {
                reason: GraphError::DuplicateSector(position),
            }]
        );
        assert_eq!(query::level(&world, 0).map(LevelGraph::num_sectors), Some(1));
    }

    #[test]
    fn neighbours_follow_direction_order() {
        let mut world = world_with_level(1);
        for (x, y) in [(1, 1), (1, 0), (0, 1), (2, 2), (2, 1)] {
            let _ = add_sector(&mut world, Position::new(1, x, y), false);
        }
        let level = query::level(&world, 1).expect("level exists");
        let directions: Vec<Direction> = level
            .neighbours(1, 1)
            .into_iter()
            .map(|(direction, _)| direction)
            .collect();
        assert_eq!(
            directions,
            vec![Direction::North, Direction::East, Direction::SouthEast, Direction::West]
        );
    }

    #[test]
    fn camp_distance_is_write_once() {
        let mut world = world_with_level(2);
        let position = Position::new(2, 1, 1);
        let _ = add_sector(&mut world, position, false);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RecordCampDistance {
                position,
                distance: 4,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::RecordCampDistance {
                position,
                distance: 1,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::CampDistanceRecorded {
                position,
                distance: 4,
            }]
        );
        assert_eq!(
            query::sector(&world, position).and_then(Sector::distance_to_camp),
            Some(4)
        );
    }

    #[test]
    fn critical_path_tags_accumulate_once_per_type() {
        let mut world = world_with_level(2);
        let position = Position::new(2, 0, 0);
        let _ = add_sector(&mut world, position, false);

        let mut events = Vec::new();
        for path_type in [
            CriticalPathType::CampToPassage,
            CriticalPathType::CampToPassage,
            CriticalPathType::PassageToPoi,
        ] {
            apply(
                &mut world,
                Command::TagCriticalPath {
                    position,
                    path_type,
                },
                &mut events,
            );
        }

        assert_eq!(events.len(), 2);
        let sector = query::sector(&world, position).expect("sector exists");
        assert!(sector.is_on_critical_path(CriticalPathType::CampToPassage));
        assert!(sector.is_on_critical_path(CriticalPathType::PassageToPoi));
        assert!(!sector.is_on_critical_path(CriticalPathType::CampToPoi));
    }

    #[test]
    fn connecting_levels_requires_both_ends() {
        let mut world = world_with_level(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLevel {
                level: 1,
                bounds: SectorBounds::new(0, 0, 4, 4),
                stages: Vec::new(),
            },
            &mut events,
        );
        let lower = Position::new(0, 2, 2);
        let _ = add_sector(&mut world, lower, false);

        events.clear();
        apply(&mut world, Command::ConnectLevels { lower }, &mut events);
        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: GraphError::UnknownSector(Position::new(1, 2, 2)),
            }]
        );
        assert!(!query::sector(&world, lower).expect("lower").has_passage_up());

        let _ = add_sector(&mut world, Position::new(1, 2, 2), false);
        events.clear();
        apply(&mut world, Command::ConnectLevels { lower }, &mut events);
        assert_eq!(
            events,
            vec![Event::LevelsConnected {
                lower,
                upper: Position::new(1, 2, 2),
            }]
        );
        assert!(query::sector(&world, Position::new(1, 2, 2))
            .expect("upper")
            .has_passage_down());
    }

    #[test]
    fn features_are_found_by_position_and_completed() {
        let mut world = world_with_level(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceFeature {
                kind: FeatureKind::Lake,
                footprint: FeatureFootprint::new(0, 0, SectorBounds::new(1, 1, 2, 2)),
                built: false,
            },
            &mut events,
        );
        let feature = match events.as_slice() {
            [Event::FeaturePlaced { feature }] => *feature,
            other => panic!("unexpected events: {other:?}"),
        };

        assert_eq!(query::features_at(&world, Position::new(0, 2, 1)).len(), 1);
        assert!(query::features_at(&world, Position::new(0, 3, 1)).is_empty());
        assert!(!query::feature(&world, feature).expect("feature").is_built());

        apply(&mut world, Command::CompleteFeature { feature }, &mut events);
        assert!(query::feature(&world, feature).expect("feature").is_built());

        events.clear();
        let missing = FeatureId::new(99);
        apply(&mut world, Command::CompleteFeature { feature: missing }, &mut events);
        assert_eq!(
            events,
            vec![Event::CommandRejected {
                reason: GraphError::UnknownFeature(missing),
            }]
        );
    }

    #[test]
    fn stages_of_missing_level_are_empty() {
        let world = world_with_level(4);
        assert_eq!(query::stages(&world, 4).len(), 2);
        assert!(query::stages(&world, 5).is_empty());
    }
}
