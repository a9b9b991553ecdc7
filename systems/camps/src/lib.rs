#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Camp planning over the world graph.
//!
//! The planner groups levels under the camp they belong to, budgets their
//! sectors, and measures how far sectors lie from the camps of their level.
//! Results that have to persist on the graph (camp distances, critical path
//! membership) are written back through [`strata_world::apply`].

use std::sync::Arc;

use strata_core::{
    CampOrdinal, Command, CriticalPathType, Event, Level, LevelStage, Position, WorldSeed, Zone,
    UNREACHABLE_DISTANCE,
};
use strata_system_ordinals::{level_for_ordinal, OrdinalMapper};
use strata_world::{apply, query, GridPathfinder, LevelGraph, PathOptions, PathService, Sector, World};
use tracing::debug;

/// Straight-line distance reported for levels without camps.
pub const UNREACHABLE_QUICK_DISTANCE: f64 = 9999.0;

const MIN_GANG_DISTANCE_TO_CAMP: f64 = 3.0;

const CAMP_DISTANCE_OPTIONS: PathOptions = PathOptions {
    allow_diagonal: false,
    same_level_only: true,
};

/// Plans camps and camp-relative measurements for generated worlds.
#[derive(Debug)]
pub struct CampPlanner<P = GridPathfinder> {
    ordinals: Arc<OrdinalMapper>,
    pathfinder: P,
}

impl CampPlanner<GridPathfinder> {
    /// Creates a planner that searches paths with the bundled [`GridPathfinder`].
    #[must_use]
    pub fn new(ordinals: Arc<OrdinalMapper>) -> Self {
        Self::with_pathfinder(ordinals, GridPathfinder::new())
    }
}

impl<P: PathService> CampPlanner<P> {
    /// Creates a planner that searches paths with the provided service.
    #[must_use]
    pub fn with_pathfinder(ordinals: Arc<OrdinalMapper>, pathfinder: P) -> Self {
        Self {
            ordinals,
            pathfinder,
        }
    }

    /// Ordinal mapper shared by the planner.
    #[must_use]
    pub fn ordinals(&self) -> &OrdinalMapper {
        &self.ordinals
    }

    /// Levels attached to a camp: the camp's own level followed by every
    /// campless level that shares its camp ordinal.
    #[must_use]
    pub fn levels_for_camp(&self, seed: WorldSeed, camp_ordinal: CampOrdinal) -> Vec<Level> {
        if camp_ordinal.get() == 0 {
            return Vec::new();
        }

        let main_ordinal = self.ordinals.level_ordinal_for_camp_ordinal(seed, camp_ordinal);
        let mut levels = vec![level_for_ordinal(seed, main_ordinal)];
        for &ordinal in self.ordinals.campless_level_ordinals(seed).iter() {
            let level = level_for_ordinal(seed, ordinal);
            if self.ordinals.camp_ordinal(seed, level) == camp_ordinal {
                levels.push(level);
            }
        }
        levels
    }

    /// Total sectors budgeted for every level attached to a camp.
    #[must_use]
    pub fn num_sectors_for_camp(&self, seed: WorldSeed, camp_ordinal: CampOrdinal) -> u32 {
        let constants = self.ordinals.constants();
        self.levels_for_camp(seed, camp_ordinal)
            .into_iter()
            .map(|level| {
                let is_small = self.ordinals.is_small_level(seed, level);
                constants.num_sectors(camp_ordinal, is_small)
            })
            .fold(0, u32::saturating_add)
    }

    /// Path length from a sector to the nearest camp of its level.
    ///
    /// The first computation is recorded on the sector and returned by every
    /// later call, even if the graph has changed since. Sectors with no route
    /// to a camp record [`UNREACHABLE_DISTANCE`].
    pub fn distance_to_camp(
        &self,
        world: &mut World,
        position: Position,
        out_events: &mut Vec<Event>,
    ) -> u32 {
        let Some(sector) = query::sector(world, position) else {
            return UNREACHABLE_DISTANCE;
        };
        if let Some(distance) = sector.distance_to_camp() {
            return distance;
        }

        let camps: Vec<Position> = query::level(world, position.level())
            .map(|level| level.camp_positions().to_vec())
            .unwrap_or_default();

        let distance = camps
            .into_iter()
            .filter_map(|camp| {
                self.pathfinder
                    .find_path(world, position, camp, CAMP_DISTANCE_OPTIONS)
            })
            .map(|path| u32::try_from(path.len()).unwrap_or(u32::MAX))
            .fold(UNREACHABLE_DISTANCE, u32::min);

        debug!(%position, distance, "memoized camp distance");
        apply(
            world,
            Command::RecordCampDistance { position, distance },
            out_events,
        );
        distance
    }

    /// Tags every sector on the path from `start` to `end` with `path_type`.
    ///
    /// Nothing is tagged when no path exists.
    pub fn add_critical_path(
        &self,
        world: &mut World,
        start: Position,
        end: Position,
        path_type: CriticalPathType,
        out_events: &mut Vec<Event>,
    ) {
        let Some(path) = self
            .pathfinder
            .find_path(world, start, end, PathOptions::default())
        else {
            debug!(%start, %end, ?path_type, "no route for critical path");
            return;
        };

        for position in path {
            apply(
                world,
                Command::TagCriticalPath {
                    position,
                    path_type,
                },
                out_events,
            );
        }
    }

    /// Orders positions by path length from `from`, unreachable ones last.
    ///
    /// The sort is stable, so positions at equal path length keep their
    /// relative order.
    pub fn sort_sectors_by_path_len(&self, world: &World, from: Position, sectors: &mut [Position]) {
        sectors.sort_by_cached_key(|&target| {
            self.pathfinder
                .find_path(world, from, target, PathOptions::default())
                .map_or(usize::MAX, |path| path.len())
        });
    }
}

/// Sectors budgeted for one stage of a level.
///
/// The level's sectors are split evenly across its stages; a stage the level
/// does not list receives none.
#[must_use]
pub fn num_sectors_for_level_stage(world: &World, level: &LevelGraph, stage: LevelStage) -> u32 {
    let stages = query::stages(world, level.level());
    if !stages.contains(&stage) {
        return 0;
    }
    let per_stage = level.num_sectors() / stages.len();
    u32::try_from(per_stage).unwrap_or(u32::MAX)
}

/// Straight-line distance from a sector to the nearest camp of its level.
#[must_use]
pub fn quick_distance_to_camp(level: &LevelGraph, sector: &Sector) -> f64 {
    level
        .camp_positions()
        .iter()
        .map(|camp| sector.position().distance_to(*camp))
        .fold(UNREACHABLE_QUICK_DISTANCE, f64::min)
}

/// Reports whether a gang may be placed on the sector.
#[must_use]
pub fn can_have_gang(level: &LevelGraph, sector: Option<&Sector>) -> bool {
    let Some(sector) = sector else {
        return false;
    };
    if sector.is_camp() {
        return false;
    }
    if matches!(
        sector.zone(),
        Zone::Entrance | Zone::PassageToCamp | Zone::PassageToPassage
    ) {
        return false;
    }
    quick_distance_to_camp(level, sector) >= MIN_GANG_DISTANCE_TO_CAMP
}
