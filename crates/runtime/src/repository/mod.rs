//! Repository layer for accounts and pet stats.
//!
//! Backends are interchangeable behind [`Store`]:
//! - [`InMemoryStore`] for tests and throwaway runs
//! - [`SqliteStore`] for a durable single-file database
//!
//! The stat engine never sees a repository; repositories receive the pure
//! stat transition as a closure and apply it atomically.

mod error;
mod fence;
mod memory;
mod records;
mod sqlite;
mod traits;

pub use error::{RepositoryError, Result};
pub use fence::CommitFence;
pub use memory::InMemoryStore;
pub use records::{NewUser, Pet, PetId, User, UserId};
pub use sqlite::SqliteStore;
pub use traits::{PetRepository, StatUpdate, Store, UserRepository};
