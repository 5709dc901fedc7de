//! In-memory repository implementation for tests and development.

mod store;

pub use store::InMemoryStore;
