//! Pure stat rules for the Everwyn virtual pet.
//!
//! `pet-core` owns the one invariant of the game: every pet stat lives in the
//! closed interval `[0, 100]`. All mutation goes through [`engine`], which
//! takes values in and hands new values back; persistence and scheduling are
//! left to the runtime crate.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod stats;

pub use action::{ActionEffect, PetAction};
pub use config::PetConfig;
pub use engine::{apply, apply_action, decay_all};
pub use error::StatError;
pub use stats::{PetStats, StatBounds, StatKind};
