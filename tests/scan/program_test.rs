//! Programs loaded from TOML configuration files.

use super::common::{toml_file, trace};
use ladder_common::{ConfigError, LadderError, SimConfig};
use ladder_runtime::build_ladder;
use ladder_stdlib::ComponentKind;
use std::time::Duration;

const CONVEYOR: &str = r#"
cycle_time = "20ms"
max_scans = 50

[render]
every_scans = 5
json = true

[[program.rungs]]
components = [
    { kind = "contact", name = "Start", active = true },
    { kind = "inverted_contact", name = "EStop" },
    { kind = "on_delay_timer", name = "Settle", delay = 2 },
    { kind = "output", name = "Motor" },
]

[[program.rungs]]
components = [
    { kind = "rising_edge", name = "PartSensor" },
    { kind = "counter_up", name = "Parts", PV = 2 },
    { kind = "retentive_output", name = "BatchDone" },
]
"#;

#[test]
fn test_load_program_from_file() {
    let file = toml_file(CONVEYOR);
    let config = SimConfig::from_file(file.path()).unwrap();

    assert_eq!(config.cycle_time, Duration::from_millis(20));
    assert_eq!(config.max_scans, 50);
    assert!(config.render.json);
    assert_eq!(config.render.every_scans, 5);
    assert_eq!(config.program.rungs.len(), 2);

    let mut ladder = build_ladder(&config.program).unwrap();
    assert_eq!(
        ladder.component("Parts").map(|c| c.kind()),
        Some(ComponentKind::CounterUp)
    );

    assert_eq!(trace(&mut ladder, "Motor", 3), [false, true, true]);

    for _ in 0..2 {
        ladder.activate("PartSensor").unwrap();
        ladder.scan_once();
        ladder.deactivate("PartSensor").unwrap();
        ladder.scan_once();
    }
    assert!(ladder.component("BatchDone").unwrap().state());

    ladder.activate("EStop").unwrap();
    assert_eq!(trace(&mut ladder, "Motor", 1), [false]);
}

#[test]
fn test_invalid_program_rejected() {
    let config = SimConfig::from_toml(
        r#"
        [[program.rungs]]
        components = [
            { kind = "contact", name = "A" },
            { kind = "pulse_timer", name = "T", delay = 2, pt = 3 },
            { kind = "output", name = "Y" },
        ]
        "#,
    )
    .unwrap();
    assert_eq!(
        build_ladder(&config.program).unwrap_err(),
        LadderError::ConflictingPreset { delay: 2, pt: 3 }
    );

    let config = SimConfig::from_toml(
        r#"
        [[program.rungs]]
        components = [{ kind = "contact", name = "A" }]
        "#,
    )
    .unwrap();
    assert_eq!(
        build_ladder(&config.program).unwrap_err(),
        LadderError::NoOutput
    );
}

#[test]
fn test_unknown_kind_is_parse_error() {
    let result = SimConfig::from_toml(
        r#"
        [[program.rungs]]
        components = [{ kind = "relay", name = "K1" }]
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SimConfig::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_config_round_trip_through_file() {
    let config = SimConfig::from_toml(CONVEYOR).unwrap();
    let file = toml_file(&config.to_toml().unwrap());
    assert_eq!(SimConfig::from_file(file.path()).unwrap(), config);
}
