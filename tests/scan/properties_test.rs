//! Scan-cycle properties of rungs and their components.

use super::common::{ladder_of, trace};
use ladder_common::LadderError;
use ladder_runtime::Rung;
use ladder_stdlib::{
    Component, Contact, CounterDown, CounterDownInputs, CounterUp, CounterUpInputs,
    FallingEdgeContact, InvertedContact, OffDelayTimer, OnDelayTimer, Output, PulseTimer,
    RetentiveInputs, RetentiveOutput, RisingEdgeContact, TimerPreset,
};

fn contacts() -> Vec<Component> {
    vec![
        Contact::new("NO").into(),
        InvertedContact::new("NC").into(),
        RisingEdgeContact::new("P").into(),
        FallingEdgeContact::new("N").into(),
    ]
}

#[test]
fn test_default_rung_matches_flat_and() {
    let inputs = contacts();
    let expected = inputs
        .iter()
        .cloned()
        .map(|mut c| c.evaluate(true))
        .fold(true, |acc, v| acc && v);

    let mut components = inputs;
    components.push(Output::new("Y").into());
    let mut rung = Rung::new(components).unwrap();
    assert_eq!(rung.evaluate(), expected);

    // Each subset, one contact at a time
    for contact in contacts() {
        let expected = contact.clone().evaluate(true);
        let mut rung = Rung::new(vec![contact, Output::new("Y").into()]).unwrap();
        assert_eq!(rung.evaluate(), expected);
    }
}

#[test]
fn test_rising_edge_never_fires_twice() {
    let mut p = RisingEdgeContact::new("P");
    p.activate();
    assert!(p.evaluate(None));
    assert!(!p.evaluate(None));

    // Direct IN behaves the same
    let mut p = RisingEdgeContact::new("P");
    let pulses: Vec<bool> = [true, true, false, true, true]
        .into_iter()
        .map(|input| p.evaluate(Some(input)))
        .collect();
    assert_eq!(pulses, [true, false, false, true, false]);
}

#[test]
fn test_retentive_output_only_reset_clears() {
    let mut latch = RetentiveOutput::new("L");
    assert!(latch.evaluate(true));
    for _ in 0..10 {
        assert!(latch.evaluate(false));
    }
    assert!(!latch.evaluate_with(RetentiveInputs {
        input: true,
        reset: true,
    }));
    assert!(!latch.evaluate(false));

    latch.evaluate(true);
    assert!(!latch.reset());
    assert!(!latch.state());
}

#[test]
fn test_on_delay_sequence_in_rung() {
    let mut ladder = ladder_of(vec![vec![
        Contact::new("X").into(),
        OnDelayTimer::new("T", TimerPreset::delay(3)).unwrap().into(),
        Output::new("Y").into(),
    ]]);

    let mut seen = vec![ladder.scan_once()];
    ladder.activate("X").unwrap();
    seen.extend((0..3).map(|_| ladder.scan_once()));
    assert_eq!(seen, [false, false, false, true]);

    ladder.deactivate("X").unwrap();
    assert!(!ladder.scan_once());
    assert_eq!(ladder.component("T").unwrap().detail().as_deref(), Some("ET=0 PT=3"));
}

#[test]
fn test_off_delay_sequence() {
    let mut tof = OffDelayTimer::new("TOF", TimerPreset::pt(2)).unwrap();
    let q: Vec<bool> = [true, false, false]
        .into_iter()
        .map(|i| tof.evaluate(i))
        .collect();
    assert_eq!(q, [true, true, false]);
}

#[test]
fn test_pulse_timer_holds_and_restarts() {
    let mut ladder = ladder_of(vec![vec![
        RisingEdgeContact::new("Button").into(),
        PulseTimer::new("TP", TimerPreset::pt(3)).unwrap().into(),
        Output::new("Y").into(),
    ]]);

    ladder.activate("Button").unwrap();
    assert_eq!(trace(&mut ladder, "Y", 5), [true, true, true, false, false]);

    // New press mid-pulse restarts ET
    ladder.deactivate("Button").unwrap();
    ladder.scan_once();
    ladder.activate("Button").unwrap();
    assert_eq!(trace(&mut ladder, "Y", 2), [true, true]);
    ladder.deactivate("Button").unwrap();
    ladder.scan_once();
    ladder.activate("Button").unwrap();
    assert_eq!(trace(&mut ladder, "Y", 4), [true, true, true, false]);
}

#[test]
fn test_counter_up_trajectory() {
    let mut ctu = CounterUp::new("CTU", 2).unwrap();
    let mut cv = Vec::new();
    let mut q = Vec::new();
    for input in [false, true, true, false, true] {
        q.push(ctu.evaluate(input));
        cv.push(ctu.cv());
    }
    assert_eq!(cv, [0, 1, 1, 1, 2]);
    assert_eq!(q, [false, false, false, false, true]);
}

#[test]
fn test_counter_up_rejects_negative_override() {
    let mut ctu = CounterUp::new("CTU", 5).unwrap();
    ctu.evaluate(true);

    let err = ctu
        .evaluate_with(CounterUpInputs {
            cu: false,
            r: false,
            pv: Some(-1),
        })
        .unwrap_err();
    assert!(matches!(err, LadderError::NegativePreset { value: -1, .. }));
    assert_eq!(ctu.cv(), 1);
    assert_eq!(ctu.pv(), 5);
}

#[test]
fn test_counter_down_trajectory_and_load() {
    let mut ctd = CounterDown::new("CTD", 3).unwrap();
    assert_eq!(ctd.cv(), 3);
    assert!(!ctd.q());

    for expected in [2, 1, 0] {
        let q = ctd.evaluate(true);
        assert_eq!(ctd.cv(), expected);
        assert_eq!(q, expected == 0);
        ctd.evaluate(false);
    }

    // Load wins over a simultaneous edge
    let q = ctd
        .evaluate_with(CounterDownInputs {
            cd: true,
            ld: true,
            ..CounterDownInputs::default()
        })
        .unwrap();
    assert!(!q);
    assert_eq!(ctd.cv(), 3);

    ctd.evaluate(false);
    ctd.evaluate(true);
    assert_eq!(ctd.cv(), 2);
    ctd.evaluate_with(CounterDownInputs {
        r: true,
        ..CounterDownInputs::default()
    })
    .unwrap();
    assert_eq!(ctd.cv(), 3);
}

#[test]
fn test_rung_output_count() {
    assert_eq!(
        Rung::new(contacts()).unwrap_err(),
        LadderError::NoOutput
    );

    let mut two = contacts();
    two.push(Output::new("Y1").into());
    two.push(RetentiveOutput::new("Y2").into());
    assert!(matches!(
        Rung::new(two),
        Err(LadderError::MultipleOutputs { .. })
    ));

    for position in 0..=4 {
        let mut components = contacts();
        components.insert(position, Output::new("Y").into());
        assert!(Rung::new(components).is_ok());
    }
}

#[test]
fn test_scan_idempotent_under_constant_input() {
    let mut ladder = ladder_of(vec![
        vec![
            Contact::new("A").into(),
            InvertedContact::new("B").into(),
            Output::new("Y1").into(),
        ],
        vec![RisingEdgeContact::new("P").into(), Output::new("Y2").into()],
        vec![
            Contact::new("Run").into(),
            OnDelayTimer::new("T", TimerPreset::delay(2)).unwrap().into(),
            Output::new("Y3").into(),
        ],
    ]);
    ladder.activate("A").unwrap();
    ladder.activate("P").unwrap();
    ladder.activate("Run").unwrap();

    ladder.scan_once();
    ladder.scan_once();
    let steady = ladder.scan_once();
    assert_eq!(ladder.scan_once(), steady);

    // Held edge does not re-pulse, elapsed timer does not restart
    assert!(!ladder.component("Y2").unwrap().state());
    assert!(ladder.component("Y3").unwrap().state());
    assert!(ladder.component("Y1").unwrap().state());
    assert_eq!(ladder.component("T").unwrap().detail().as_deref(), Some("ET=4 PT=2"));
}
