use std::fmt;

use serde::Serialize;
use strata_core::{CampOrdinal, Level, UncampableReason, WorldSeed};
use strata_system_camps::CampPlanner;
use strata_system_ordinals::{bottom_level, highest_level, level_range, LevelProfile};

/// Level and camp layout of a single world seed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SeedReport {
    seed: i64,
    bottom_level: Level,
    highest_level: Level,
    levels: Vec<LevelProfile>,
    camps: Vec<CampSummary>,
}

/// Levels and sector budget attached to one camp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct CampSummary {
    camp_ordinal: CampOrdinal,
    levels: Vec<Level>,
    num_sectors: u32,
}

impl SeedReport {
    /// Classifies every level of the seed and groups them under their camps.
    pub(crate) fn build(planner: &CampPlanner, seed: WorldSeed) -> Self {
        let ordinals = planner.ordinals();
        let levels = level_range(seed)
            .rev()
            .map(|level| ordinals.level_profile(seed, level))
            .collect();
        let camps = (1..=ordinals.constants().camp_ordinal_limit)
            .map(CampOrdinal::new)
            .map(|camp_ordinal| CampSummary {
                camp_ordinal,
                levels: planner.levels_for_camp(seed, camp_ordinal),
                num_sectors: planner.num_sectors_for_camp(seed, camp_ordinal),
            })
            .collect();

        Self {
            seed: seed.get(),
            bottom_level: bottom_level(seed),
            highest_level: highest_level(seed),
            levels,
            camps,
        }
    }

    /// Pretty-printed JSON rendition of the report.
    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seed {} (levels {}..={})",
            self.seed, self.bottom_level, self.highest_level
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>5} {:>7} {:>4} {:<13} {:<4} {:<5} {:<5}",
            "level", "ordinal", "camp", "campable", "hard", "small", "band"
        )?;
        for profile in &self.levels {
            writeln!(
                f,
                "{:>5} {:>7} {:>4} {:<13} {:<4} {:<5} {:<5}",
                profile.level,
                profile.ordinal.get(),
                profile.camp_ordinal.get(),
                campability(profile),
                flag(profile.hard),
                flag(profile.small),
                band(profile),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{:>4} {:>7}  levels", "camp", "sectors")?;
        for camp in &self.camps {
            let levels: Vec<String> = camp.levels.iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "{:>4} {:>7}  {}",
                camp.camp_ordinal.get(),
                camp.num_sectors,
                levels.join(", ")
            )?;
        }
        Ok(())
    }
}

fn campability(profile: &LevelProfile) -> &'static str {
    match profile.uncampable_reason {
        None => "yes",
        Some(UncampableReason::Radiation) => "radiation",
        Some(UncampableReason::Superstition) => "superstition",
        Some(UncampableReason::Pollution) => "pollution",
        Some(UncampableReason::OrdinalLimit) => "ordinal-limit",
    }
}

fn band(profile: &LevelProfile) -> &'static str {
    if profile.sun {
        "sun"
    } else if profile.earth {
        "earth"
    } else {
        "dark"
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "-"
    }
}
