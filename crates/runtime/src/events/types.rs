//! Event payloads.

use pet_core::{PetAction, PetStats};
use serde::{Deserialize, Serialize};

use crate::repository::UserId;

/// Account lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AccountEvent {
    Registered { user_id: UserId, username: String },
    LoggedIn { user_id: UserId },
}

/// A user action was applied to a pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PetEvent {
    ActionApplied {
        user_id: UserId,
        action: PetAction,
        stats: PetStats,
    },
}

/// Outcome of one decay tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DecayEvent {
    Swept { pets: usize, amount: u32 },
    Failed { reason: String },
}

/// Event wrapper carrying the typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuntimeEvent {
    Account(AccountEvent),
    Pet(PetEvent),
    Decay(DecayEvent),
}

impl From<AccountEvent> for RuntimeEvent {
    fn from(event: AccountEvent) -> Self {
        RuntimeEvent::Account(event)
    }
}

impl From<PetEvent> for RuntimeEvent {
    fn from(event: PetEvent) -> Self {
        RuntimeEvent::Pet(event)
    }
}

impl From<DecayEvent> for RuntimeEvent {
    fn from(event: DecayEvent) -> Self {
        RuntimeEvent::Decay(event)
    }
}
