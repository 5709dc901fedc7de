//! Bounded execution of synchronous repository calls.

use std::time::Duration;

use crate::api::ServiceError;
use crate::repository::CommitFence;

/// Run `f` on the blocking pool and wait at most `timeout` for it.
///
/// On expiry the caller gets [`ServiceError::StorageTimeout`]; the blocking
/// task itself cannot be cancelled and finishes in the background. Only use
/// this for reads; writes go through [`run_blocking_write`].
pub(crate) async fn run_blocking<T, F>(timeout: Duration, f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(f);
    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined.map_err(ServiceError::WorkerJoin)?,
        Err(_) => Err(ServiceError::StorageTimeout(timeout)),
    }
}

/// Like [`run_blocking`], for a write guarded by a [`CommitFence`].
///
/// On expiry the fence is abandoned so the store discards the write. If the
/// store already started committing, the timeout is ignored and the real
/// outcome is returned: a reported failure never leaves a write behind.
pub(crate) async fn run_blocking_write<T, F>(timeout: Duration, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&CommitFence) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let fence = CommitFence::new();
    let store_fence = fence.clone();
    let mut task = tokio::task::spawn_blocking(move || f(&store_fence));

    match tokio::time::timeout(timeout, &mut task).await {
        Ok(joined) => joined.map_err(ServiceError::WorkerJoin)?,
        Err(_) if fence.abandon() => Err(ServiceError::StorageTimeout(timeout)),
        Err(_) => {
            tracing::debug!("Write committed as the timeout expired, waiting for it");
            task.await.map_err(ServiceError::WorkerJoin)?
        }
    }
}
