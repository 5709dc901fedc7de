//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on workers or infrastructure.

pub mod errors;
pub mod service;
pub mod types;

pub use errors::{Resource, Result, RuntimeError, ServiceError};
pub use service::PetService;
pub use types::{ActionRequest, Credentials, LoginResponse, MessageResponse, RegisterResponse};
