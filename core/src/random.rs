//! Salt-keyed deterministic random draws.
//!
//! Every draw is a pure function of its salt: the salt is hashed with SHA-256
//! and the digest seeds a single SplitMix64 step. Callers derive salts from
//! the world seed plus whatever context (level, index, direction) makes the
//! draw unique.

use sha2::{Digest, Sha256};

/// Uniform draw in `[0, 1)` keyed by `salt`.
#[must_use]
pub fn random(salt: i64) -> f64 {
    const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
    let value = splitmix(derive_salt_seed(salt)) >> 11;
    (value as f64) * SCALE
}

/// Uniform integer in `[min, max)` keyed by `salt`.
///
/// Returns `min` when the range is empty.
#[must_use]
pub fn random_int(salt: i64, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }

    let span = max.saturating_sub(min);
    let offset = (random(salt) * span as f64).floor() as i64;
    min.saturating_add(offset.clamp(0, span - 1))
}

fn derive_salt_seed(salt: i64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(salt.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}

/// First output of a SplitMix64 stream seeded with `seed`.
fn splitmix(seed: u64) -> u64 {
    const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
    let state = if seed == 0 { GOLDEN_GAMMA } else { seed };
    let mut z = state.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
