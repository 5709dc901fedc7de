//! SQLite-backed repository implementation.

mod schema;
mod store;

pub use store::SqliteStore;
