//! Runtime services for the Everwyn virtual pet backend.
//!
//! This crate wires the pure stat rules from `pet-core` to storage,
//! credentials and a periodic decay worker. Front-ends build a [`Runtime`]
//! and talk to it through the cloneable [`PetService`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream front-ends interact with
//! - [`auth`] hashes passwords and signs bearer tokens
//! - [`events`] provides a topic-based event bus
//! - [`repository`] holds the swappable storage backends
//! - [`workers`] runs the decay sweep
pub mod api;
pub mod auth;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod workers;

mod utils;

pub use api::{
    ActionRequest, Credentials, LoginResponse, MessageResponse, PetService, RegisterResponse,
    Resource, Result, RuntimeError, ServiceError,
};
pub use auth::{AuthError, Claims, PasswordHasher, TokenIssuer};
pub use events::{AccountEvent, DecayEvent, EventBus, PetEvent, RuntimeEvent, Topic};
pub use repository::{
    InMemoryStore, NewUser, Pet, PetId, PetRepository, RepositoryError, SqliteStore, Store, User,
    UserId, UserRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::{DecayConfig, DecayMetrics};
