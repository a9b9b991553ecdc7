#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player follower roster.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the roster is stored under in save data.
pub const SAVE_KEY: &str = "Followers";

/// Unique identifier of a follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowerId(u32);

impl FollowerId {
    /// Creates a new follower identifier with the provided numeric value.
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

/// Companion recruited by the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    id: FollowerId,
    name: String,
    in_party: bool,
}

impl Follower {
    /// Creates a follower that is not yet travelling with the party.
    #[must_use]
    pub fn new(id: FollowerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            in_party: false,
        }
    }

    /// Identifier of the follower.
    #[must_use]
    pub const fn id(&self) -> FollowerId {
        self.id
    }

    /// Display name of the follower.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether the follower travels with the party.
    #[must_use]
    pub const fn in_party(&self) -> bool {
        self.in_party
    }
}

/// How follower contributions to a bonus combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusKind {
    /// Contributions multiply, starting from 1; zero contributions are ignored.
    Multiplier,
    /// Contributions add up, starting from 0.
    Additive,
}

/// Every follower recruited by the player, in recruitment order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerRoster {
    followers: Vec<Follower>,
}

impl FollowerRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every follower in recruitment order.
    #[must_use]
    pub fn all(&self) -> &[Follower] {
        &self.followers
    }

    /// Followers currently travelling with the party.
    pub fn party(&self) -> impl Iterator<Item = &Follower> {
        self.followers.iter().filter(|follower| follower.in_party)
    }

    /// Looks up a follower by identifier.
    #[must_use]
    pub fn follower_by_id(&self, id: FollowerId) -> Option<&Follower> {
        self.followers.iter().find(|follower| follower.id == id)
    }

    /// Recruits a follower straight into the party.
    pub fn add_follower(&mut self, mut follower: Follower) {
        follower.in_party = true;
        self.followers.push(follower);
    }

    /// Moves a follower into or out of the party.
    ///
    /// Returns `false` when no follower carries the identifier.
    pub fn set_in_party(&mut self, id: FollowerId, in_party: bool) -> bool {
        match self.followers.iter_mut().find(|follower| follower.id == id) {
            Some(follower) => {
                follower.in_party = in_party;
                true
            }
            None => false,
        }
    }

    /// Dismisses a follower, returning it.
    ///
    /// Dismissing an unknown follower is logged and otherwise ignored.
    pub fn remove_follower(&mut self, id: FollowerId) -> Option<Follower> {
        let Some(index) = self.followers.iter().position(|follower| follower.id == id) else {
            warn!(follower = id.get(), "couldn't find follower to remove");
            return None;
        };
        Some(self.followers.remove(index))
    }

    /// Combined bonus of the party for one bonus kind.
    ///
    /// `contribution` supplies each party member's share.
    pub fn current_bonus<F>(&self, kind: BonusKind, mut contribution: F) -> f64
    where
        F: FnMut(&Follower) -> f64,
    {
        match kind {
            BonusKind::Multiplier => self
                .party()
                .map(&mut contribution)
                .filter(|value| *value != 0.0)
                .product(),
            BonusKind::Additive => self.party().map(&mut contribution).sum(),
        }
    }
}
