//! Pet stat record.

use super::bounds::StatBounds;
use super::kind::StatKind;
use crate::config::PetConfig;
use crate::error::StatError;

/// Current stats of a single pet.
///
/// Fields are private so that every value in a `PetStats` has passed through
/// [`StatBounds::PET`]: construct with [`PetStats::new`] (rejects
/// out-of-range input) or [`PetStats::clamped`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPetStats"))]
pub struct PetStats {
    hunger: u8,
    happiness: u8,
    energy: u8,
}

impl PetStats {
    /// Build stats from raw values, failing if any value is out of range.
    pub fn new(hunger: i64, happiness: i64, energy: i64) -> Result<Self, StatError> {
        Ok(Self {
            hunger: checked(StatKind::Hunger, hunger)?,
            happiness: checked(StatKind::Happiness, happiness)?,
            energy: checked(StatKind::Energy, energy)?,
        })
    }

    /// Build stats from raw values, clamping each into range.
    pub fn clamped(hunger: i64, happiness: i64, energy: i64) -> Self {
        let clamp = |v: i64| v.clamp(StatBounds::PET.min as i64, StatBounds::PET.max as i64) as u8;
        Self {
            hunger: clamp(hunger),
            happiness: clamp(happiness),
            energy: clamp(energy),
        }
    }

    /// Stats every new pet starts with.
    pub const fn initial() -> Self {
        Self {
            hunger: PetConfig::INITIAL_STAT,
            happiness: PetConfig::INITIAL_STAT,
            energy: PetConfig::INITIAL_STAT,
        }
    }

    pub const fn hunger(&self) -> u8 {
        self.hunger
    }

    pub const fn happiness(&self) -> u8 {
        self.happiness
    }

    pub const fn energy(&self) -> u8 {
        self.energy
    }

    /// Read a stat by kind.
    pub const fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hunger => self.hunger,
            StatKind::Happiness => self.happiness,
            StatKind::Energy => self.energy,
        }
    }

    /// Return a copy with one stat recomputed by `f` and clamped.
    pub fn map_stat(self, kind: StatKind, f: impl FnOnce(u8) -> u8) -> Self {
        let value = f(self.get(kind)).min(StatBounds::PET.max);
        let mut next = self;
        match kind {
            StatKind::Hunger => next.hunger = value,
            StatKind::Happiness => next.happiness = value,
            StatKind::Energy => next.energy = value,
        }
        next
    }

    /// True when every stat has hit the floor.
    pub const fn is_depleted(&self) -> bool {
        self.hunger == 0 && self.happiness == 0 && self.energy == 0
    }
}

impl Default for PetStats {
    fn default() -> Self {
        Self::initial()
    }
}

fn checked(stat: StatKind, value: i64) -> Result<u8, StatError> {
    if StatBounds::PET.contains(value) {
        Ok(value as u8)
    } else {
        Err(StatError::OutOfRange { stat, value })
    }
}

/// Unvalidated wire form, checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPetStats {
    hunger: i64,
    happiness: i64,
    energy: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPetStats> for PetStats {
    type Error = StatError;

    fn try_from(raw: RawPetStats) -> Result<Self, Self::Error> {
        PetStats::new(raw.hunger, raw.happiness, raw.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(PetStats::new(0, 100, 50).is_ok());
        assert_eq!(
            PetStats::new(101, 0, 0),
            Err(StatError::OutOfRange {
                stat: StatKind::Hunger,
                value: 101
            })
        );
        assert!(PetStats::new(0, 0, -1).is_err());
    }

    #[test]
    fn clamped_pins_to_bounds() {
        let stats = PetStats::clamped(-5, 250, 42);
        assert_eq!(stats.hunger(), 0);
        assert_eq!(stats.happiness(), 100);
        assert_eq!(stats.energy(), 42);
    }

    #[test]
    fn map_stat_touches_one_field() {
        let stats = PetStats::new(10, 20, 30).unwrap();
        let next = stats.map_stat(StatKind::Happiness, |v| v + 5);
        assert_eq!(next.hunger(), 10);
        assert_eq!(next.happiness(), 25);
        assert_eq!(next.energy(), 30);
    }

    #[test]
    fn initial_stats_are_fifty() {
        let stats = PetStats::default();
        for kind in StatKind::ALL {
            assert_eq!(stats.get(kind), 50);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_range() {
        let ok: PetStats =
            serde_json::from_str(r#"{"hunger":1,"happiness":2,"energy":3}"#).unwrap();
        assert_eq!(ok.energy(), 3);
        assert!(
            serde_json::from_str::<PetStats>(r#"{"hunger":1,"happiness":200,"energy":3}"#)
                .is_err()
        );
    }
}
