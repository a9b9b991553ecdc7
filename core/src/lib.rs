#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Strata world generator.
//!
//! This crate defines the vocabulary that connects the authoritative world
//! graph, the pure generation systems, and adapters. World builders submit
//! [`Command`] values describing graph mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what changed. Systems read the graph through immutable queries
//! and respond with derived values or new command batches.

mod config;
mod random;
mod spatial;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, SectorBudget, WorldConstants};
pub use random::{random, random_int};
pub use spatial::{middle_point, Direction, Position, SectorBounds};

/// Vertical layer of the generated world. Level 0 is the reference layer and
/// negative levels lie below it.
pub type Level = i32;

/// Level index that always hosts the radiation-locked transit layer.
pub const RADIATION_LEVEL: Level = 14;

/// Highest level index whose ordinal counts down from the reference layer.
pub const ORDINAL_PIVOT_LEVEL: Level = 13;

/// Distance recorded for sectors with no route to any camp.
pub const UNREACHABLE_DISTANCE: u32 = 9999;

/// Number of independent hand-authored seed branches.
pub const SEED_BRANCH_COUNT: i64 = 5;

/// Identifier of a single generated world instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldSeed(i64);

impl WorldSeed {
    /// Creates a new seed wrapper.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Retrieves the raw seed value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Index of the hand-authored branch table selected by this seed.
    ///
    /// Negative seeds wrap into the same five branches as positive ones.
    #[must_use]
    pub const fn branch(&self) -> usize {
        self.0.rem_euclid(SEED_BRANCH_COUNT) as usize
    }
}

/// One-based position of a level in generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelOrdinal(u32);

impl LevelOrdinal {
    /// Creates a new level ordinal wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric ordinal.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Number of camp-bearing levels up to and including a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampOrdinal(u32);

impl CampOrdinal {
    /// Creates a new camp ordinal wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric camp ordinal.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Tag partitioning a level's sectors into regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Sectors around the level entrance.
    Entrance,
    /// Corridor connecting a passage with the camp.
    PassageToCamp,
    /// Corridor connecting two level passages.
    PassageToPassage,
    /// Primary point-of-interest region.
    Poi1,
    /// Secondary point-of-interest region.
    Poi2,
    /// Provisional point-of-interest seed awaiting final classification.
    #[default]
    PoiTemp,
    /// Outlying region reachable from a camp.
    ExtraCampable,
    /// Outlying region with no camp access.
    ExtraUncampable,
}

/// Why a level cannot host a camp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UncampableReason {
    /// The level is irradiated.
    Radiation,
    /// Locals refuse to settle on the level.
    Superstition,
    /// The level is polluted.
    Pollution,
    /// Every camp slot of the world is already used.
    OrdinalLimit,
}

/// Category of route a sector was tagged with while laying out critical paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CriticalPathType {
    /// Route from a camp to a level passage.
    CampToPassage,
    /// Route between two level passages.
    PassageToPassage,
    /// Route from a camp to a point of interest.
    CampToPoi,
    /// Route from a passage to a point of interest.
    PassageToPoi,
}

/// Progression stage a level section belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelStage {
    /// Content unlocked on first arrival.
    Early,
    /// Content gated behind later progression.
    Late,
}

/// Unique identifier assigned to a placed world feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(u32);

impl FeatureId {
    /// Creates a new feature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of large world objects that occupy sectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Collapsed floor spanning several levels.
    Hole,
    /// Flooded region.
    Lake,
    /// Abandoned structure.
    Ruins,
}

/// Region of the world a feature covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFootprint {
    lowest_level: Level,
    highest_level: Level,
    area: SectorBounds,
}

impl FeatureFootprint {
    /// Creates a footprint covering `area` on every level in the inclusive range.
    #[must_use]
    pub const fn new(lowest_level: Level, highest_level: Level, area: SectorBounds) -> Self {
        Self {
            lowest_level,
            highest_level,
            area,
        }
    }

    /// Lowest level covered by the footprint.
    #[must_use]
    pub const fn lowest_level(&self) -> Level {
        self.lowest_level
    }

    /// Highest level covered by the footprint.
    #[must_use]
    pub const fn highest_level(&self) -> Level {
        self.highest_level
    }

    /// Sector rectangle covered on each level.
    #[must_use]
    pub const fn area(&self) -> SectorBounds {
        self.area
    }

    /// Reports whether the footprint covers the provided position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (self.lowest_level..=self.highest_level).contains(&position.level())
            && self.area.contains(position.sector_x(), position.sector_y())
    }
}

/// Commands that express all permissible world graph mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Registers an empty level graph.
    AddLevel {
        /// Level index of the new graph.
        level: Level,
        /// Inclusive rectangle sectors of the level must fall within.
        bounds: SectorBounds,
        /// Progression stages the level is divided into.
        stages: Vec<LevelStage>,
    },
    /// Adds a sector to an existing level.
    AddSector {
        /// Position of the new sector; its level must already exist.
        position: Position,
        /// Zone initially assigned to the sector.
        zone: Zone,
        /// Marks the sector as a camp.
        is_camp: bool,
    },
    /// Links a sector with the sector directly above it on the next level.
    ConnectLevels {
        /// Lower end of the passage.
        lower: Position,
    },
    /// Reassigns the zone of an existing sector.
    SetSectorZone {
        /// Sector to update.
        position: Position,
        /// Zone to assign.
        zone: Zone,
    },
    /// Places a feature into the world.
    PlaceFeature {
        /// Kind of feature being placed.
        kind: FeatureKind,
        /// Region the feature covers.
        footprint: FeatureFootprint,
        /// Whether the feature is already fully built.
        built: bool,
    },
    /// Marks a previously placed feature as built.
    CompleteFeature {
        /// Feature to complete.
        feature: FeatureId,
    },
    /// Adds a sector to a critical path.
    TagCriticalPath {
        /// Sector traversed by the path.
        position: Position,
        /// Category of the path.
        path_type: CriticalPathType,
    },
    /// Memoizes the path distance from a sector to its nearest camp.
    RecordCampDistance {
        /// Sector whose distance was computed.
        position: Position,
        /// Number of steps to the nearest camp.
        distance: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level graph was registered.
    LevelAdded {
        /// Level index of the new graph.
        level: Level,
    },
    /// Confirms that a sector was added.
    SectorAdded {
        /// Position of the new sector.
        position: Position,
    },
    /// Confirms that two levels were linked by a passage.
    LevelsConnected {
        /// Lower end of the passage.
        lower: Position,
        /// Upper end of the passage.
        upper: Position,
    },
    /// Confirms that a sector changed zone.
    SectorZoneChanged {
        /// Sector that changed.
        position: Position,
        /// Zone now assigned.
        zone: Zone,
    },
    /// Confirms that a feature was placed.
    FeaturePlaced {
        /// Identifier assigned to the feature by the world.
        feature: FeatureId,
    },
    /// Confirms that a feature finished building.
    FeatureCompleted {
        /// Identifier of the completed feature.
        feature: FeatureId,
    },
    /// Confirms that a sector joined a critical path.
    CriticalPathTagged {
        /// Sector traversed by the path.
        position: Position,
        /// Category of the path.
        path_type: CriticalPathType,
    },
    /// Confirms that a sector's camp distance was memoized.
    CampDistanceRecorded {
        /// Sector whose distance was stored.
        position: Position,
        /// Stored distance.
        distance: u32,
    },
    /// Reports that a command could not be applied to the graph.
    CommandRejected {
        /// Specific reason the command failed.
        reason: GraphError,
    },
}

/// Reasons a world graph command may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GraphError {
    /// The referenced level was never added.
    #[error("level {0} does not exist")]
    UnknownLevel(Level),
    /// A level with the same index already exists.
    #[error("level {0} already exists")]
    DuplicateLevel(Level),
    /// A sector already occupies the position.
    #[error("sector {0} already exists")]
    DuplicateSector(Position),
    /// The position lies outside its level's bounds.
    #[error("sector {0} lies outside the level bounds")]
    OutOfBounds(Position),
    /// No sector occupies the position.
    #[error("sector {0} does not exist")]
    UnknownSector(Position),
    /// No feature carries the identifier.
    #[error("feature {0:?} does not exist")]
    UnknownFeature(FeatureId),
}
