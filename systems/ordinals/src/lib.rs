#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seed-driven level ordering and camp classification.
//!
//! Every seed selects one of five hand-authored branches that fix the lowest
//! and highest level of the world, the ordinals that never host a camp, and
//! the ordinals flagged as hard. Levels up to 13 count down toward the bottom
//! level; levels above 13 continue counting upward from the bottom level's
//! ordinal.

mod branches;

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};
use strata_core::{
    random, CampOrdinal, Level, LevelOrdinal, UncampableReason, WorldConstants, WorldSeed,
    ORDINAL_PIVOT_LEVEL, RADIATION_LEVEL,
};
use tracing::debug;

use branches::branch;

const REASON_SALT_OFFSET: i64 = 88;
const REASON_SALT_LEVEL_FACTOR: i64 = 9;
const REASON_SALT_SEED_MODULUS: i64 = 4;
const RADIATION_THRESHOLD: f64 = 0.33;
const POLLUTION_THRESHOLD: f64 = 0.66;
const EARTH_LEVEL_CEILING: Level = 3;
const EARTH_LEVEL_SPAN: Level = 5;
const SUN_LEVEL_SPAN: Level = 5;

/// Lowest level generated for the seed.
#[must_use]
pub fn bottom_level(seed: WorldSeed) -> Level {
    branch(seed).bottom_level
}

/// Highest level generated for the seed.
#[must_use]
pub fn highest_level(seed: WorldSeed) -> Level {
    branch(seed).highest_level
}

/// Every level generated for the seed, from the bottom up.
#[must_use]
pub fn level_range(seed: WorldSeed) -> RangeInclusive<Level> {
    bottom_level(seed)..=highest_level(seed)
}

/// Position of `level` in generation order.
#[must_use]
pub fn level_ordinal(seed: WorldSeed, level: Level) -> LevelOrdinal {
    let level = i64::from(level);
    let pivot = i64::from(ORDINAL_PIVOT_LEVEL);
    let raw = if level <= pivot {
        pivot + 1 - level
    } else {
        let bottom = i64::from(bottom_level(seed));
        (pivot + 1 - bottom) + (level - pivot)
    };
    LevelOrdinal::new(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

/// Level generated at `ordinal`; the inverse of [`level_ordinal`] for every
/// level in [`level_range`].
#[must_use]
pub fn level_for_ordinal(seed: WorldSeed, ordinal: LevelOrdinal) -> Level {
    let ordinal = i64::from(ordinal.get());
    let pivot = i64::from(ORDINAL_PIVOT_LEVEL);
    let bottom_ordinal = i64::from(level_ordinal(seed, bottom_level(seed)).get());
    let raw = if ordinal <= bottom_ordinal {
        pivot + 1 - ordinal
    } else {
        pivot + (ordinal - bottom_ordinal)
    };
    raw.clamp(i64::from(Level::MIN), i64::from(Level::MAX)) as Level
}

/// Reports whether the level belongs to the earth band near the bottom.
#[must_use]
pub fn is_earth_level(seed: WorldSeed, level: Level) -> bool {
    let ceiling = bottom_level(seed)
        .saturating_add(EARTH_LEVEL_SPAN)
        .min(EARTH_LEVEL_CEILING);
    level <= ceiling
}

/// Reports whether the level belongs to the sunlit band near the top.
#[must_use]
pub fn is_sun_level(seed: WorldSeed, level: Level) -> bool {
    level >= highest_level(seed).saturating_sub(SUN_LEVEL_SPAN)
}

/// Reports whether the level lies between the earth and sun bands.
#[must_use]
pub fn is_dark_level(seed: WorldSeed, level: Level) -> bool {
    !is_earth_level(seed, level) && !is_sun_level(seed, level)
}

/// Ordinal tables derived once per seed.
#[derive(Clone, Debug)]
struct SeedTables {
    campless: Arc<[LevelOrdinal]>,
    hard: Arc<[LevelOrdinal]>,
}

impl SeedTables {
    fn compute(seed: WorldSeed) -> Self {
        let table = branch(seed);
        let campless: Arc<[LevelOrdinal]> = table
            .campless_ordinals
            .iter()
            .copied()
            .map(LevelOrdinal::new)
            .collect();

        let mut hard = vec![
            level_ordinal(seed, RADIATION_LEVEL),
            level_ordinal(seed, table.highest_level),
        ];
        hard.extend(table.hard_extras.iter().copied().map(LevelOrdinal::new));
        hard.sort_unstable();
        hard.dedup();

        debug!(
            seed = seed.get(),
            branch = seed.branch(),
            campless = campless.len(),
            hard = hard.len(),
            "computed ordinal tables"
        );

        Self {
            campless,
            hard: hard.into(),
        }
    }
}

/// Memoizing classifier for levels of any number of seeds.
///
/// Tables are computed on first use per seed and shared afterwards; the
/// mapper is `Send + Sync`, and concurrent first calls for the same seed
/// compute the tables once.
#[derive(Debug, Default)]
pub struct OrdinalMapper {
    constants: WorldConstants,
    cache: Mutex<HashMap<WorldSeed, Arc<OnceLock<SeedTables>>>>,
}

impl OrdinalMapper {
    /// Creates a mapper that classifies levels with the provided constants.
    #[must_use]
    pub fn new(constants: WorldConstants) -> Self {
        Self {
            constants,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Constants the mapper classifies with.
    #[must_use]
    pub fn constants(&self) -> &WorldConstants {
        &self.constants
    }

    fn tables(&self, seed: WorldSeed) -> SeedTables {
        let slot = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(seed).or_default())
        };
        slot.get_or_init(|| SeedTables::compute(seed)).clone()
    }

    /// Ascending ordinals that never host a camp.
    ///
    /// Repeated calls for the same seed return the same allocation.
    #[must_use]
    pub fn campless_level_ordinals(&self, seed: WorldSeed) -> Arc<[LevelOrdinal]> {
        self.tables(seed).campless
    }

    /// Ascending ordinals of the seed's hard levels.
    #[must_use]
    pub fn hard_level_ordinals(&self, seed: WorldSeed) -> Arc<[LevelOrdinal]> {
        self.tables(seed).hard
    }

    /// Number of camp-capable ordinals up to and including the level's ordinal.
    #[must_use]
    pub fn camp_ordinal(&self, seed: WorldSeed, level: Level) -> CampOrdinal {
        let ordinal = level_ordinal(seed, level);
        let campless = self.campless_level_ordinals(seed);
        let skipped = campless.iter().filter(|entry| **entry <= ordinal).count();
        let skipped = u32::try_from(skipped).unwrap_or(u32::MAX);
        CampOrdinal::new(ordinal.get().saturating_sub(skipped))
    }

    /// Ordinal of the camp-bearing level with the given camp ordinal.
    #[must_use]
    pub fn level_ordinal_for_camp_ordinal(
        &self,
        seed: WorldSeed,
        camp_ordinal: CampOrdinal,
    ) -> LevelOrdinal {
        let campless = self.campless_level_ordinals(seed);
        let mut ordinal = camp_ordinal.get();
        for entry in campless.iter() {
            if entry.get() <= ordinal {
                ordinal = ordinal.saturating_add(1);
            }
        }
        LevelOrdinal::new(ordinal)
    }

    /// Reports whether the level may host a camp.
    #[must_use]
    pub fn is_campable_level(&self, seed: WorldSeed, level: Level) -> bool {
        let ordinal = level_ordinal(seed, level);
        if self
            .campless_level_ordinals(seed)
            .binary_search(&ordinal)
            .is_ok()
        {
            return false;
        }
        self.camp_ordinal(seed, level).get() <= self.constants.camp_ordinal_limit
    }

    /// Reports whether the level is flagged as hard.
    #[must_use]
    pub fn is_hard_level(&self, seed: WorldSeed, level: Level) -> bool {
        self.hard_level_ordinals(seed)
            .binary_search(&level_ordinal(seed, level))
            .is_ok()
    }

    /// Explains why a level cannot host a camp; `None` for campable levels.
    #[must_use]
    pub fn not_campable_reason(&self, seed: WorldSeed, level: Level) -> Option<UncampableReason> {
        if self.is_campable_level(seed, level) {
            return None;
        }
        if level == RADIATION_LEVEL {
            return Some(UncampableReason::Radiation);
        }
        if level == bottom_level(seed) {
            return Some(UncampableReason::Superstition);
        }
        if self.camp_ordinal(seed, level).get() > self.constants.camp_ordinal_limit {
            return Some(UncampableReason::OrdinalLimit);
        }

        let ordinal = level_ordinal(seed, level).get();
        let salt = seed.get().rem_euclid(REASON_SALT_SEED_MODULUS)
            + REASON_SALT_LEVEL_FACTOR * i64::from(level)
            + REASON_SALT_OFFSET;
        let roll = random(salt);
        if roll < RADIATION_THRESHOLD
            && ordinal >= self.constants.min_level_ordinal_hazard_radiation
        {
            return Some(UncampableReason::Radiation);
        }
        if roll < POLLUTION_THRESHOLD
            && ordinal >= self.constants.min_level_ordinal_hazard_pollution
        {
            return Some(UncampableReason::Pollution);
        }
        Some(UncampableReason::Superstition)
    }

    /// Reports whether the level is a small campless level.
    ///
    /// The bottom level and the two topmost levels are never small.
    #[must_use]
    pub fn is_small_level(&self, seed: WorldSeed, level: Level) -> bool {
        !self.is_campable_level(seed, level)
            && level != bottom_level(seed)
            && level < highest_level(seed).saturating_sub(1)
    }

    /// Every classification of a level in one record.
    #[must_use]
    pub fn level_profile(&self, seed: WorldSeed, level: Level) -> LevelProfile {
        LevelProfile {
            level,
            ordinal: level_ordinal(seed, level),
            camp_ordinal: self.camp_ordinal(seed, level),
            campable: self.is_campable_level(seed, level),
            uncampable_reason: self.not_campable_reason(seed, level),
            hard: self.is_hard_level(seed, level),
            small: self.is_small_level(seed, level),
            earth: is_earth_level(seed, level),
            sun: is_sun_level(seed, level),
            dark: is_dark_level(seed, level),
        }
    }
}

/// Snapshot of every classification computed for a single level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProfile {
    /// Level the profile describes.
    pub level: Level,
    /// Position of the level in generation order.
    pub ordinal: LevelOrdinal,
    /// Camp slot the level belongs to.
    pub camp_ordinal: CampOrdinal,
    /// Whether the level hosts its own camp.
    pub campable: bool,
    /// Why the level hosts no camp, if it does not.
    pub uncampable_reason: Option<UncampableReason>,
    /// Whether the level is flagged as hard.
    pub hard: bool,
    /// Whether the level is a small campless level.
    pub small: bool,
    /// Whether the level lies in the earth band.
    pub earth: bool,
    /// Whether the level lies in the sunlit band.
    pub sun: bool,
    /// Whether the level lies between the earth and sun bands.
    pub dark: bool,
}
