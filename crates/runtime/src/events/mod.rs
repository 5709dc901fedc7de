//! Event system for observing pet activity.
//!
//! Events are grouped by [`Topic`] so that consumers only receive what they
//! subscribe to. Publishing is best-effort and never blocks a request.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{AccountEvent, DecayEvent, PetEvent, RuntimeEvent};
