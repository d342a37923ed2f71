//! Per-scan hooks for the run loop.
//!
//! Status rendering, scan limits, and test probes all attach here instead
//! of living inside the loop.

use crate::ladder::Ladder;
use std::ops::ControlFlow;
use std::time::Duration;

/// Outcome of one scan, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// 1-based scan number within the ladder's lifetime.
    pub scan: u64,
    /// Conjunction of all rung results for this scan.
    pub result: bool,
    /// Time spent evaluating the rungs.
    pub execution_time: Duration,
    /// Whether `execution_time` exceeded the cycle time.
    pub overrun: bool,
}

/// Hook invoked after every scan of [`Ladder::run_with`].
///
/// Returning [`ControlFlow::Break`] ends the run after the current scan.
pub trait ScanObserver {
    /// Called once per completed scan.
    fn on_scan(&mut self, report: &ScanReport, ladder: &Ladder) -> ControlFlow<()>;
}

impl<F> ScanObserver for F
where
    F: FnMut(&ScanReport, &Ladder) -> ControlFlow<()>,
{
    fn on_scan(&mut self, report: &ScanReport, ladder: &Ladder) -> ControlFlow<()> {
        self(report, ladder)
    }
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn on_scan(&mut self, _report: &ScanReport, _ladder: &Ladder) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Stops the run after a fixed number of scans, then defers to `inner`.
#[derive(Debug, Clone)]
pub struct ScanLimit<O> {
    remaining: u64,
    inner: O,
}

impl<O: ScanObserver> ScanLimit<O> {
    /// Allow `max_scans` scans. Zero means unlimited.
    pub fn new(max_scans: u64, inner: O) -> Self {
        Self {
            remaining: if max_scans == 0 { u64::MAX } else { max_scans },
            inner,
        }
    }

    /// Consume the limiter, returning the wrapped observer.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: ScanObserver> ScanObserver for ScanLimit<O> {
    fn on_scan(&mut self, report: &ScanReport, ladder: &Ladder) -> ControlFlow<()> {
        self.inner.on_scan(report, ladder)?;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
