//! Small helpers shared by the service and the workers.

mod blocking;

pub(crate) use blocking::{run_blocking, run_blocking_write};
