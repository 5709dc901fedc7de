//! Stat engine: the only code that computes new stat values.
//!
//! Everything here is pure. Callers read the current [`PetStats`] from their
//! store, run one of these functions and write the result back inside the
//! same atomic section.

use crate::action::PetAction;
use crate::stats::{PetStats, StatBounds, StatKind};

/// Bounded update of a single stat value: `clamp(current + delta, 0, 100)`.
pub fn apply(current: u8, delta: i32) -> u8 {
    StatBounds::PET.clamp_add(current, delta)
}

/// Apply an action's table entry to `stats`. Other stats are untouched.
pub fn apply_action(stats: PetStats, action: PetAction) -> PetStats {
    let effect = action.effect();
    stats.map_stat(effect.stat, |value| apply(value, effect.delta))
}

/// Subtract `amount` from every stat, each floored at 0 independently.
pub fn decay_all(stats: PetStats, amount: u32) -> PetStats {
    let delta = -(amount.min(i32::MAX as u32) as i32);
    StatKind::ALL
        .into_iter()
        .fold(stats, |acc, kind| acc.map_stat(kind, |value| apply(value, delta)))
}
