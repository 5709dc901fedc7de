//! Worker tasks that back the runtime.
//!
//! The decay worker sweeps every pet on a fixed period; it shares the store
//! with the request path and relies on the store's atomic updates.

mod decay;
mod metrics;

pub use decay::{DecayConfig, DecayWorker};
pub use metrics::DecayMetrics;
