//! Records owned by the persistence layer.

use std::fmt;

use pet_core::{PetConfig, PetStats};
use serde::{Deserialize, Serialize};

/// Database identifier of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier of a pet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub i64);

/// Stored account. The password is only ever held as a hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// A pet and its current stats. Each user owns exactly one.
///
/// Serializes flat: `{"id","name","hunger","happiness","energy"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pet {
    pub id: PetId,
    #[serde(skip)]
    pub user_id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub stats: PetStats,
}

/// Everything needed to create an account together with its pet.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub pet_name: String,
    pub stats: PetStats,
}

impl NewUser {
    /// New account with the default pet (`Fluffy`, all stats at 50).
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            pet_name: PetConfig::DEFAULT_PET_NAME.to_string(),
            stats: PetStats::initial(),
        }
    }

    pub fn with_stats(mut self, stats: PetStats) -> Self {
        self.stats = stats;
        self
    }
}
