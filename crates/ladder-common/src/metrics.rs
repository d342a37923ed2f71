//! Scan metrics collection.
//!
//! Tracks how long each scan took to execute and how many scans ran past
//! the configured cycle time.

use serde::Serialize;
use std::time::Duration;

/// Scan execution metrics.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    /// Total scans recorded.
    total_scans: u64,
    /// Minimum observed scan time in nanoseconds.
    min_ns: u64,
    /// Maximum observed scan time in nanoseconds.
    max_ns: u64,
    /// Sum of all scan times for mean calculation.
    sum_ns: u64,
    /// Scans whose execution exceeded the deadline.
    overrun_count: u64,
    /// Configured cycle deadline in nanoseconds.
    deadline_ns: u64,
}

impl ScanMetrics {
    /// Create a new collector for the given cycle deadline.
    #[must_use]
    pub fn new(cycle_deadline: Duration) -> Self {
        Self {
            total_scans: 0,
            min_ns: u64::MAX,
            max_ns: 0,
            sum_ns: 0,
            overrun_count: 0,
            deadline_ns: duration_ns(cycle_deadline),
        }
    }

    /// Record one scan execution time.
    ///
    /// Returns `true` if the scan overran the deadline.
    pub fn record(&mut self, duration: Duration) -> bool {
        let ns = duration_ns(duration);

        self.total_scans += 1;
        self.min_ns = self.min_ns.min(ns);
        self.max_ns = self.max_ns.max(ns);
        self.sum_ns = self.sum_ns.saturating_add(ns);

        let overrun = ns > self.deadline_ns;
        if overrun {
            self.overrun_count += 1;
        }
        overrun
    }

    /// Get total number of scans recorded.
    #[must_use]
    pub fn total_scans(&self) -> u64 {
        self.total_scans
    }

    /// Get minimum observed scan time.
    #[must_use]
    pub fn min(&self) -> Option<Duration> {
        (self.total_scans > 0).then(|| Duration::from_nanos(self.min_ns))
    }

    /// Get maximum observed scan time.
    #[must_use]
    pub fn max(&self) -> Option<Duration> {
        (self.total_scans > 0).then(|| Duration::from_nanos(self.max_ns))
    }

    /// Get mean scan time.
    #[must_use]
    pub fn mean(&self) -> Option<Duration> {
        (self.total_scans > 0).then(|| Duration::from_nanos(self.sum_ns / self.total_scans))
    }

    /// Get number of overruns.
    #[must_use]
    pub fn overrun_count(&self) -> u64 {
        self.overrun_count
    }

    /// Get a snapshot of current metrics.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_scans: self.total_scans,
            min_ns: self.min().map(duration_ns),
            max_ns: self.max().map(duration_ns),
            mean_ns: self.mean().map(duration_ns),
            overrun_count: self.overrun_count,
        }
    }
}

/// Immutable snapshot of metrics for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Total scans executed.
    pub total_scans: u64,
    /// Minimum scan time in nanoseconds.
    pub min_ns: Option<u64>,
    /// Maximum scan time in nanoseconds.
    pub max_ns: Option<u64>,
    /// Mean scan time in nanoseconds.
    pub mean_ns: Option<u64>,
    /// Number of overruns.
    pub overrun_count: u64,
}

impl MetricsSnapshot {
    /// Get jitter (max - min) in nanoseconds.
    #[must_use]
    pub fn jitter_ns(&self) -> Option<u64> {
        match (self.min_ns, self.max_ns) {
            (Some(min), Some(max)) => Some(max - min),
            _ => None,
        }
    }
}

fn duration_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
