//! Stat kind enumeration.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The three stats every pet carries.
///
/// The string form (`"hunger"`, `"happiness"`, `"energy"`) doubles as the
/// JSON field name and the SQL column name.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    /// How well fed the pet is. Higher is better.
    Hunger,
    /// Mood, raised by playing with or petting the pet.
    Happiness,
    /// Stamina. Only ever drained by decay.
    Energy,
}

impl StatKind {
    /// All stats in storage order.
    pub const ALL: [StatKind; 3] = [StatKind::Hunger, StatKind::Happiness, StatKind::Energy];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_strum() {
        for kind in StatKind::iter() {
            assert_eq!(StatKind::from_str(kind.as_ref()).unwrap(), kind);
        }
        assert_eq!(StatKind::Happiness.to_string(), "happiness");
    }

    #[test]
    fn all_matches_iteration_order() {
        let iterated: Vec<_> = StatKind::iter().collect();
        assert_eq!(iterated, StatKind::ALL.to_vec());
    }
}
