//! Ladder program and its cyclic scan loop.
//!
//! A scan evaluates every rung top to bottom. The run loop repeats scans at
//! a fixed cycle time until stopped:
//!
//! 1. Check the stop flag
//! 2. Scan all rungs
//! 3. Record metrics, warn on overrun
//! 4. Notify the observer
//! 5. Sleep until the next deadline

use crate::observer::{NoopObserver, ScanObserver, ScanReport};
use crate::rung::Rung;
use crate::snapshot::LadderSnapshot;
use ladder_common::config::validate_cycle_time;
use ladder_common::error::{LadderError, LadderResult};
use ladder_common::metrics::{MetricsSnapshot, ScanMetrics};
use ladder_common::state::{RunState, StateMachine};
use ladder_stdlib::component::Component;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Cloneable handle that requests a running ladder to stop.
///
/// The flag is polled once per cycle, so the loop exits within one cycle
/// time of the request. A request made while the ladder is not running is
/// kept and ends the next run before its first scan.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request a stop.
    pub fn stop(&self) {
        debug!("Stop requested");
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true if a stop is pending.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Result of one call to [`Ladder::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Scans executed during this run.
    pub scans: u64,
    /// Result of the final scan, `None` if no scan ran.
    pub last_result: Option<bool>,
    /// Execution-time statistics for this run.
    pub metrics: MetricsSnapshot,
}

/// An ordered list of rungs plus run-loop state.
#[derive(Debug, Default)]
pub struct Ladder {
    rungs: Vec<Rung>,
    stop: Arc<AtomicBool>,
    state: StateMachine,
    scan_count: u64,
}

impl Ladder {
    /// Create an empty ladder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rung to the bottom of the ladder.
    pub fn add_rung(&mut self, rung: Rung) {
        self.rungs.push(rung);
    }

    /// Rungs in scan order.
    #[must_use]
    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    /// Rung by 0-based index.
    #[must_use]
    pub fn rung(&self, index: usize) -> Option<&Rung> {
        self.rungs.get(index)
    }

    /// Rung by 0-based index, for mutation.
    pub fn rung_mut(&mut self, index: usize) -> Option<&mut Rung> {
        self.rungs.get_mut(index)
    }

    /// First component with `name`, searching rungs top to bottom.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.rungs.iter().find_map(|rung| rung.component(name))
    }

    /// First component with `name`, for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::ComponentNotFound`] if no rung holds `name`.
    pub fn component_mut(&mut self, name: &str) -> LadderResult<&mut Component> {
        self.rungs
            .iter_mut()
            .find_map(|rung| rung.component_mut(name))
            .ok_or_else(|| LadderError::ComponentNotFound(name.to_string()))
    }

    /// Actuate the named contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::ComponentNotFound`] or [`LadderError::NotAnInput`].
    pub fn activate(&mut self, name: &str) -> LadderResult<()> {
        self.component_mut(name)?.activate()
    }

    /// Release the named contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::ComponentNotFound`] or [`LadderError::NotAnInput`].
    pub fn deactivate(&mut self, name: &str) -> LadderResult<()> {
        self.component_mut(name)?.deactivate()
    }

    /// Reset every rung. Scan count and run state are kept.
    pub fn reset(&mut self) {
        for rung in &mut self.rungs {
            rung.reset();
        }
    }

    /// Scans executed over the ladder's lifetime.
    #[must_use]
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    /// Current run-loop state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state.state()
    }

    /// Returns true while inside [`Ladder::run`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.state().is_running()
    }

    /// Request the run loop to stop.
    pub fn stop(&self) {
        debug!(running = self.is_running(), "Stop requested");
        self.stop.store(true, Ordering::Release);
    }

    /// Handle for stopping the ladder from another thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    /// Evaluate every rung once, top to bottom.
    ///
    /// All rungs are evaluated even after one returns false. Returns the
    /// conjunction of the rung results; an empty ladder yields true.
    pub fn scan_once(&mut self) -> bool {
        let mut result = true;
        for rung in &mut self.rungs {
            result &= rung.evaluate();
        }
        self.scan_count += 1;
        trace!(scan = self.scan_count, result, "Scan complete");
        result
    }

    /// Run the scan loop until [`Ladder::stop`] is called.
    ///
    /// Blocks the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidCycleTime`] for a zero cycle time or one
    /// too large to schedule, before any scan runs.
    pub fn run(&mut self, cycle_time: Duration) -> LadderResult<RunSummary> {
        self.run_with(cycle_time, &mut NoopObserver)
    }

    /// Run the scan loop, calling `observer` after each scan.
    ///
    /// The loop ends when a stop is requested or the observer breaks.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidCycleTime`] for a zero cycle time or one
    /// too large to schedule, before any scan runs.
    pub fn run_with<O>(&mut self, cycle_time: Duration, observer: &mut O) -> LadderResult<RunSummary>
    where
        O: ScanObserver + ?Sized,
    {
        let cycle_time = validate_cycle_time(cycle_time)?;
        let mut next_deadline = Instant::now().checked_add(cycle_time).ok_or_else(|| {
            LadderError::InvalidCycleTime("cycle time is too large".into())
        })?;
        self.state.transition(RunState::Running)?;

        info!(
            rungs = self.rungs.len(),
            cycle_ms = cycle_time.as_millis(),
            "Entering scan loop"
        );

        let mut metrics = ScanMetrics::new(cycle_time);
        let mut last_result = None;

        while !self.stop.load(Ordering::Acquire) {
            let scan_start = Instant::now();
            let result = self.scan_once();
            let execution_time = scan_start.elapsed();
            last_result = Some(result);

            let overrun = metrics.record(execution_time);
            if overrun {
                warn!(
                    scan = self.scan_count,
                    execution_us = execution_time.as_micros(),
                    deadline_us = cycle_time.as_micros(),
                    "Scan overrun"
                );
            }

            let report = ScanReport {
                scan: self.scan_count,
                result,
                execution_time,
                overrun,
            };
            if observer.on_scan(&report, self).is_break() {
                break;
            }

            wait_until(next_deadline);
            next_deadline = next_deadline.checked_add(cycle_time).unwrap_or(next_deadline);
            // Resynchronize after long overruns instead of bursting
            let now = Instant::now();
            if next_deadline < now {
                next_deadline = now.checked_add(cycle_time).unwrap_or(now);
            }
        }

        self.stop.store(false, Ordering::Release);
        self.state.transition(RunState::Stopped)?;

        let metrics = metrics.snapshot();
        info!(
            scans = metrics.total_scans,
            overruns = metrics.overrun_count,
            "Scan loop exited"
        );

        Ok(RunSummary {
            scans: metrics.total_scans,
            last_result,
            metrics,
        })
    }

    /// Capture the current state of every rung.
    #[must_use]
    pub fn snapshot(&self) -> LadderSnapshot {
        LadderSnapshot::capture(self)
    }
}

fn wait_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        thread::sleep(deadline - now);
    }
}
