//! HTTP surface.
//!
//! Canonical routes live under `/api`; the older `/api/users/*` and
//! `/api/user/pet*` paths are kept as aliases for existing clients.

mod auth;
mod error;
mod handlers;

pub use auth::AuthUser;
pub use error::ApiError;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use runtime::PetService;

/// Build the application router around a running service.
pub fn router(service: PetService) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/pet", get(handlers::get_pet))
        .route("/api/pet/action", post(handlers::pet_action))
        // Legacy aliases
        .route("/api/users/signup", post(handlers::register))
        .route("/api/users/login", post(handlers::login))
        .route("/api/users/logout", post(handlers::logout))
        .route("/api/user/pet", get(handlers::get_pet))
        .route("/api/user/pet/action", post(handlers::pet_action))
        .fallback(handlers::not_found)
        .layer(middleware::map_response(error::json_method_not_allowed))
        .with_state(service)
}
