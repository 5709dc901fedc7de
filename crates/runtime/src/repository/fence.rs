//! Commit hand-off between a timed-out caller and the write it started.
//!
//! A repository write runs on the blocking pool and cannot be cancelled.
//! The caller and the store race on one atomic: the store must win
//! [`CommitFence::enter_commit`] before it makes a write visible, the caller
//! wins [`CommitFence::abandon`] when it stops waiting. Exactly one of them
//! succeeds, so a request reported as failed never leaves a write behind.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use super::error::{RepositoryError, Result};

const OPEN: u8 = 0;
const COMMITTING: u8 = 1;
const ABANDONED: u8 = 2;

#[derive(Clone, Debug, Default)]
pub struct CommitFence(Option<Arc<AtomicU8>>);

impl CommitFence {
    /// A fence that can never be abandoned. Used by callers without a timeout.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new() -> Self {
        Self(Some(Arc::new(AtomicU8::new(OPEN))))
    }

    /// Claim the right to commit. Fails once the caller has abandoned the write;
    /// the store must then discard everything it did.
    pub fn enter_commit(&self) -> Result<()> {
        let Some(state) = &self.0 else {
            return Ok(());
        };
        match state.compare_exchange(OPEN, COMMITTING, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => Ok(()),
            Err(ABANDONED) => Err(RepositoryError::Abandoned),
            // Entered twice by the same write
            Err(_) => Ok(()),
        }
    }

    /// Give up on the write. Returns `false` if the store already started
    /// committing, in which case the caller must wait for its outcome.
    pub fn abandon(&self) -> bool {
        let Some(state) = &self.0 else {
            return false;
        };
        matches!(
            state.compare_exchange(OPEN, ABANDONED, Ordering::AcqRel, Ordering::Acquire),
            Ok(_) | Err(ABANDONED)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abandon_blocks_commit() {
        let fence = CommitFence::new();
        let store_side = fence.clone();
        assert!(fence.abandon());
        assert!(matches!(
            store_side.enter_commit(),
            Err(RepositoryError::Abandoned)
        ));
    }

    #[test]
    fn commit_blocks_abandon() {
        let fence = CommitFence::new();
        let store_side = fence.clone();
        store_side.enter_commit().unwrap();
        assert!(!fence.abandon());
        store_side.enter_commit().unwrap();
    }

    #[test]
    fn unfenced_writes_always_commit() {
        let fence = CommitFence::none();
        assert!(!fence.abandon());
        fence.enter_commit().unwrap();
    }
}
