//! Nearest-neighbour selection by straight-line distance.

use std::cmp::Ordering;

use strata_core::Position;

use crate::Positioned;

/// Comparator ordering values by their distance to `origin`, nearest first.
pub fn sort_by_distance_to<T: Positioned>(origin: Position) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| {
        origin
            .distance_to(a.position())
            .total_cmp(&origin.distance_to(b.position()))
    }
}

/// The `skip`-th closest pair drawn from `first` and `second`.
///
/// Pairs at equal distance keep the order of the cartesian product. `skip`
/// must index one of the `first.len() * second.len()` pairs; anything past
/// the end yields `None`.
#[must_use]
pub fn closest_pair<A, B>(first: &[A], second: &[B], skip: usize) -> Option<(A, B)>
where
    A: Positioned + Copy,
    B: Positioned + Copy,
{
    let mut pairs: Vec<(A, B, f64)> = first
        .iter()
        .flat_map(|&a| {
            second
                .iter()
                .map(move |&b| (a, b, a.position().distance_to(b.position())))
        })
        .collect();
    pairs.sort_by(|left, right| left.2.total_cmp(&right.2));
    pairs.get(skip).map(|&(a, b, _)| (a, b))
}

/// The `skip`-th closest of `candidates` to `position`.
///
/// `skip` is clamped to the farthest candidate; `None` only when
/// `candidates` is empty.
#[must_use]
pub fn closest_sector<T>(candidates: &[T], position: Position, skip: usize) -> Option<T>
where
    T: Positioned + Copy,
{
    let last = candidates.len().checked_sub(1)?;
    let mut sorted = candidates.to_vec();
    sorted.sort_by(sort_by_distance_to(position));
    sorted.get(skip.min(last)).copied()
}

/// First of `positions` nearest to `position`.
#[must_use]
pub fn closest_position(positions: &[Position], position: Position) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for &candidate in positions {
        let distance = candidate.distance_to(position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
