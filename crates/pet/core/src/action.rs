//! User-triggered pet actions and the fixed action table.
//!
//! | action | stat      | delta |
//! |--------|-----------|-------|
//! | feed   | hunger    | +10   |
//! | play   | happiness | +15   |
//! | pet    | happiness | +20   |
//!
//! Energy is intentionally absent: no action restores it.

use std::str::FromStr;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::PetConfig;
use crate::error::StatError;
use crate::stats::StatKind;

/// Actions a user can perform on their pet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PetAction {
    Feed,
    Play,
    Pet,
}

/// The stat an action touches and by how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEffect {
    pub stat: StatKind,
    pub delta: i32,
}

impl PetAction {
    /// Look up this action's row in the action table.
    pub const fn effect(self) -> ActionEffect {
        match self {
            PetAction::Feed => ActionEffect {
                stat: StatKind::Hunger,
                delta: PetConfig::FEED_DELTA,
            },
            PetAction::Play => ActionEffect {
                stat: StatKind::Happiness,
                delta: PetConfig::PLAY_DELTA,
            },
            PetAction::Pet => ActionEffect {
                stat: StatKind::Happiness,
                delta: PetConfig::PET_DELTA,
            },
        }
    }
}

impl FromStr for PetAction {
    type Err = StatError;

    /// Parses the exact lowercase names; anything else is unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" => Ok(PetAction::Feed),
            "play" => Ok(PetAction::Play),
            "pet" => Ok(PetAction::Pet),
            other => Err(StatError::UnknownAction(other.to_string())),
        }
    }
}
