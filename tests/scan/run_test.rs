//! The cyclic run loop, its stop flag, and observers.

use super::common::ladder_of;
use ladder_common::{LadderError, RunState};
use ladder_runtime::{Ladder, NoopObserver, ScanLimit, ScanReport};
use ladder_stdlib::{Contact, CounterUp, Output};
use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

const CYCLE: Duration = Duration::from_millis(5);

fn counting_ladder() -> Ladder {
    ladder_of(vec![vec![
        Contact::new("Enable").into(),
        CounterUp::new("Count", 1_000_000).unwrap().into(),
        Output::new("Full").into(),
    ]])
}

#[test]
fn test_run_stops_from_another_thread() {
    let mut ladder = counting_ladder();
    let handle = ladder.stop_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.stop();
    });

    let started = Instant::now();
    let summary = ladder.run(CYCLE).unwrap();
    stopper.join().unwrap();

    assert!(summary.scans >= 1);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(ladder.state(), RunState::Stopped);
    assert_eq!(ladder.scan_count(), summary.scans);
}

#[test]
fn test_zero_cycle_time_fails_before_scanning() {
    let mut ladder = counting_ladder();
    assert!(matches!(
        ladder.run(Duration::ZERO),
        Err(LadderError::InvalidCycleTime(_))
    ));
    assert_eq!(ladder.scan_count(), 0);
    assert_eq!(ladder.state(), RunState::Idle);
}

#[test]
fn test_scan_loop_paces_to_cycle_time() {
    let mut ladder = counting_ladder();
    let started = Instant::now();
    let summary = ladder
        .run_with(CYCLE, &mut ScanLimit::new(4, NoopObserver))
        .unwrap();

    assert_eq!(summary.scans, 4);
    // Three full sleeps between four scans
    assert!(started.elapsed() >= CYCLE * 3);
}

#[test]
fn test_observer_drives_inputs_between_runs() {
    let mut ladder = counting_ladder();
    ladder.activate("Enable").unwrap();

    let mut results = Vec::new();
    let mut observer = |report: &ScanReport, ladder: &Ladder| -> ControlFlow<()> {
        results.push((report.scan, ladder.component("Count").and_then(|c| c.detail())));
        if report.scan == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let summary = ladder.run_with(CYCLE, &mut observer).unwrap();

    assert_eq!(summary.scans, 3);
    assert_eq!(summary.last_result, Some(false));
    assert_eq!(
        results,
        vec![
            (1, Some("CV=1 PV=1000000".to_string())),
            (2, Some("CV=1 PV=1000000".to_string())),
            (3, Some("CV=1 PV=1000000".to_string())),
        ]
    );

    // State survives across runs
    ladder.deactivate("Enable").unwrap();
    ladder.run_with(CYCLE, &mut ScanLimit::new(1, NoopObserver)).unwrap();
    ladder.activate("Enable").unwrap();
    ladder.run_with(CYCLE, &mut ScanLimit::new(1, NoopObserver)).unwrap();
    assert_eq!(
        ladder.component("Count").unwrap().detail().as_deref(),
        Some("CV=2 PV=1000000")
    );
}

#[test]
fn test_stop_before_run_yields_zero_scans() {
    let mut ladder = counting_ladder();
    ladder.stop();
    let summary = ladder.run(CYCLE).unwrap();
    assert_eq!(summary.scans, 0);
    assert_eq!(ladder.state(), RunState::Stopped);
}

#[test]
fn test_snapshot_after_run() {
    let mut ladder = counting_ladder();
    ladder.activate("Enable").unwrap();
    ladder.run_with(CYCLE, &mut ScanLimit::new(2, NoopObserver)).unwrap();

    let snapshot = ladder.snapshot();
    assert_eq!(snapshot.scan_count, 2);
    assert_eq!(snapshot.state, RunState::Stopped);
    assert_eq!(snapshot.rungs[0].result, Some(false));
    assert_eq!(snapshot.rungs[0].components.len(), 3);
}
