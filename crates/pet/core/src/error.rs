//! Errors raised by the stat rules.

use thiserror::Error;

use crate::stats::StatKind;

/// Failures surfaced by `pet-core`.
///
/// Stat arithmetic itself is total and never fails; these only arise when
/// parsing external input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("unknown pet action: {0:?}")]
    UnknownAction(String),

    #[error("{stat} value {value} is outside [0, 100]")]
    OutOfRange { stat: StatKind, value: i64 },
}
