//! Fan-out metrics
//!
//! Counters describing what a [`MultiSink`](crate::sinks::MultiSink) did with
//! the calls it received.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for dispatcher observability
///
/// # Example
///
/// ```
/// use mloggers::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_masked();
///
/// assert_eq!(metrics.dispatched_count(), 1);
/// assert_eq!(metrics.masked_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Sink invocations that were attempted
    dispatched: AtomicU64,

    /// Sink invocations skipped because of a mask
    masked: AtomicU64,

    /// Calls dropped by the severity filter
    filtered: AtomicU64,

    /// Sink invocations that returned an error or panicked
    failed: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            masked: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn masked_count(&self) -> u64 {
        self.masked.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_masked(&self) {
        self.masked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of attempted sink invocations that failed
    pub fn failure_rate(&self) -> f64 {
        let dispatched = self.dispatched_count();
        if dispatched == 0 {
            return 0.0;
        }
        (self.failed_count() as f64 / dispatched as f64) * 100.0
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.masked.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}
