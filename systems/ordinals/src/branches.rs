use strata_core::{Level, WorldSeed};

/// Hand-authored balance data for one seed branch.
#[derive(Debug)]
pub(crate) struct Branch {
    pub(crate) bottom_level: Level,
    pub(crate) highest_level: Level,
    pub(crate) campless_ordinals: &'static [u32],
    pub(crate) hard_extras: [u32; 2],
}

pub(crate) const BRANCHES: [Branch; 5] = [
    Branch {
        bottom_level: 0,
        highest_level: 25,
        campless_ordinals: &[3, 5, 8, 10, 12, 14, 15, 17, 20, 23, 25],
        hard_extras: [10, 23],
    },
    Branch {
        bottom_level: 1,
        highest_level: 26,
        campless_ordinals: &[3, 6, 9, 11, 13, 14, 17, 19, 21, 23, 25],
        hard_extras: [9, 23],
    },
    Branch {
        bottom_level: -1,
        highest_level: 25,
        campless_ordinals: &[3, 5, 7, 9, 11, 13, 15, 16, 19, 22, 24, 26],
        hard_extras: [11, 24],
    },
    Branch {
        bottom_level: 1,
        highest_level: 26,
        campless_ordinals: &[3, 6, 8, 11, 13, 14, 16, 18, 21, 23, 25],
        hard_extras: [11, 23],
    },
    Branch {
        bottom_level: 0,
        highest_level: 24,
        campless_ordinals: &[3, 5, 7, 10, 12, 14, 15, 17, 20, 23],
        hard_extras: [10, 23],
    },
];

pub(crate) fn branch(seed: WorldSeed) -> &'static Branch {
    &BRANCHES[seed.branch()]
}
