//! Tunable world-generation constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CampOrdinal;

/// Balance constants consumed by the generation systems.
///
/// Every field has a default, so configuration files only need to name the
/// values they override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConstants {
    /// Highest camp ordinal a world may contain.
    pub camp_ordinal_limit: u32,
    /// Lowest level ordinal where an uncampable level may be irradiated.
    pub min_level_ordinal_hazard_radiation: u32,
    /// Lowest level ordinal where an uncampable level may be polluted.
    pub min_level_ordinal_hazard_pollution: u32,
    /// Sector counts planned for levels attached to a camp.
    pub sector_budget: SectorBudget,
}

impl Default for WorldConstants {
    fn default() -> Self {
        Self {
            camp_ordinal_limit: 15,
            min_level_ordinal_hazard_radiation: 10,
            min_level_ordinal_hazard_pollution: 7,
            sector_budget: SectorBudget::default(),
        }
    }
}

impl WorldConstants {
    /// Checks the constants for combinations the systems cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camp_ordinal_limit == 0 {
            return Err(ConfigError::ZeroCampOrdinalLimit);
        }
        self.sector_budget.validate()
    }

    /// Number of sectors planned for one level attached to `camp_ordinal`.
    #[must_use]
    pub fn num_sectors(&self, camp_ordinal: CampOrdinal, is_small_level: bool) -> u32 {
        self.sector_budget.num_sectors(camp_ordinal, is_small_level)
    }
}

/// Linear sector-count curve for small and large levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorBudget {
    /// Sectors of a small level at camp ordinal 1.
    pub small_base: u32,
    /// Sectors added to a small level per further camp ordinal.
    pub small_per_camp: u32,
    /// Ceiling for small levels.
    pub small_max: u32,
    /// Sectors of a regular level at camp ordinal 1.
    pub large_base: u32,
    /// Sectors added to a regular level per further camp ordinal.
    pub large_per_camp: u32,
    /// Ceiling for regular levels.
    pub large_max: u32,
}

impl Default for SectorBudget {
    fn default() -> Self {
        Self {
            small_base: 40,
            small_per_camp: 2,
            small_max: 70,
            large_base: 120,
            large_per_camp: 10,
            large_max: 250,
        }
    }
}

impl SectorBudget {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.small_max < self.small_base {
            return Err(ConfigError::InvertedBudget {
                kind: "small",
                base: self.small_base,
                max: self.small_max,
            });
        }
        if self.large_max < self.large_base {
            return Err(ConfigError::InvertedBudget {
                kind: "large",
                base: self.large_base,
                max: self.large_max,
            });
        }
        Ok(())
    }

    fn num_sectors(&self, camp_ordinal: CampOrdinal, is_small_level: bool) -> u32 {
        let steps = camp_ordinal.get().saturating_sub(1);
        let (base, per_camp, max) = if is_small_level {
            (self.small_base, self.small_per_camp, self.small_max)
        } else {
            (self.large_base, self.large_per_camp, self.large_max)
        };
        base.saturating_add(per_camp.saturating_mul(steps)).min(max)
    }
}

/// Reasons a set of world constants is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A world without camps cannot be generated.
    #[error("camp_ordinal_limit must be at least 1")]
    ZeroCampOrdinalLimit,
    /// A sector budget ceiling lies below its starting value.
    #[error("{kind} sector budget max {max} is below its base {base}")]
    InvertedBudget {
        /// Which budget curve is inverted.
        kind: &'static str,
        /// Configured starting value.
        base: u32,
        /// Configured ceiling.
        max: u32,
    },
}
