//! Clamping bounds for pet stats.

/// Inclusive range a stat value must stay within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: u8,
    pub max: u8,
}

impl StatBounds {
    /// Pet stat bounds [0, 100].
    pub const PET: Self = Self { min: 0, max: 100 };

    /// Returns true if `value` lies inside the bounds.
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min as i64 && value <= self.max as i64
    }

    /// Clamp `current + delta` into the bounds.
    ///
    /// Total over every `delta`: the sum is computed in `i64`, so even
    /// `i32::MIN`/`i32::MAX` deltas cannot overflow.
    pub fn clamp_add(&self, current: u8, delta: i32) -> u8 {
        let sum = current as i64 + delta as i64;
        sum.clamp(self.min as i64, self.max as i64) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let bounds = StatBounds::PET;
        assert!(bounds.contains(0));
        assert!(bounds.contains(100));
        assert!(!bounds.contains(-1));
        assert!(!bounds.contains(101));
    }

    #[test]
    fn clamp_add_survives_extreme_deltas() {
        let bounds = StatBounds::PET;
        assert_eq!(bounds.clamp_add(50, i32::MAX), 100);
        assert_eq!(bounds.clamp_add(50, i32::MIN), 0);
    }
}
