//! Pet stat model.
//!
//! A pet carries exactly three stats (hunger, happiness, energy). Each one is
//! a bounded integer; [`StatBounds::PET`] is the single source of truth for
//! the range and every write path clamps against it.

pub mod bounds;
pub mod kind;
pub mod pet;

pub use bounds::StatBounds;
pub use kind::StatKind;
pub use pet::PetStats;
