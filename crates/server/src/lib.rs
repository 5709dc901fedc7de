//! Everwyn virtual pet server.
//!
//! Thin HTTP glue over the [`runtime`] crate: environment configuration,
//! logging setup, backend selection, the axum router and the development seed.

pub mod config;
pub mod http;
pub mod logging;
pub mod seed;
pub mod store;

pub use config::ServerConfig;
pub use http::router;
