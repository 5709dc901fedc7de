//! Decay sweep metrics and statistics.
//!
//! Tracks sweep counts, failures and timing for monitoring and tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Decay metrics tracked by [`DecayWorker`](super::DecayWorker).
///
/// Uses atomics for lock-free access across threads.
#[derive(Debug, Default)]
pub struct DecayMetrics {
    /// Total number of sweeps that completed
    sweeps: AtomicU64,

    /// Total number of sweeps that failed
    failed: AtomicU64,

    /// Ticks skipped because the previous sweep was still running
    skipped: AtomicU64,

    /// Timed-out sweeps that later committed
    late: AtomicU64,

    /// Pets touched by the most recent successful sweep
    last_swept: AtomicU64,

    /// Total pets touched across all sweeps
    total_swept: AtomicU64,

    /// Total time spent sweeping, in nanoseconds
    total_sweep_nanos: AtomicU64,
}

impl DecayMetrics {
    /// Creates a new empty metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful sweep over `pets` pets.
    pub fn record_success(&self, pets: usize, elapsed: Duration) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.last_swept.store(pets as u64, Ordering::Relaxed);
        self.total_swept.fetch_add(pets as u64, Ordering::Relaxed);
        self.total_sweep_nanos
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Records a failed sweep.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a timed-out sweep that finished in the background over `pets` pets.
    ///
    /// The sweep stays counted as failed; its pets still count as swept.
    pub fn record_late(&self, pets: usize) {
        self.late.fetch_add(1, Ordering::Relaxed);
        self.last_swept.store(pets as u64, Ordering::Relaxed);
        self.total_swept.fetch_add(pets as u64, Ordering::Relaxed);
    }

    pub fn late(&self) -> u64 {
        self.late.load(Ordering::Relaxed)
    }

    /// Records a tick skipped behind a still-running sweep.
    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn last_swept(&self) -> u64 {
        self.last_swept.load(Ordering::Relaxed)
    }

    pub fn total_swept(&self) -> u64 {
        self.total_swept.load(Ordering::Relaxed)
    }

    /// Average sweep time, or `None` before the first sweep.
    pub fn average_sweep_time(&self) -> Option<Duration> {
        let sweeps = self.sweeps();
        if sweeps == 0 {
            return None;
        }
        let total = self.total_sweep_nanos.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total / sweeps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_success() {
        let metrics = DecayMetrics::new();
        metrics.record_success(3, Duration::from_millis(10));
        metrics.record_success(5, Duration::from_millis(30));

        assert_eq!(metrics.sweeps(), 2);
        assert_eq!(metrics.last_swept(), 5);
        assert_eq!(metrics.total_swept(), 8);
        assert_eq!(metrics.average_sweep_time(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_record_failure() {
        let metrics = DecayMetrics::new();
        metrics.record_failure();
        assert_eq!(metrics.failed(), 1);
        assert_eq!(metrics.sweeps(), 0);
        assert_eq!(metrics.average_sweep_time(), None);
    }

    #[test]
    fn test_record_late() {
        let metrics = DecayMetrics::new();
        metrics.record_failure();
        metrics.record_late(4);

        assert_eq!(metrics.failed(), 1);
        assert_eq!(metrics.late(), 1);
        assert_eq!(metrics.sweeps(), 0);
        assert_eq!(metrics.last_swept(), 4);
        assert_eq!(metrics.total_swept(), 4);
    }
}
