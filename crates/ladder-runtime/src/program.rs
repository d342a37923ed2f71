//! Build a [`Ladder`] from its declarative description.
//!
//! Construction goes through the same typed constructors as hand-built
//! programs, so presets and rung shape are validated identically.

use crate::ladder::Ladder;
use crate::rung::Rung;
use ladder_common::config::{ComponentConfig, ProgramConfig, RungConfig};
use ladder_common::error::LadderResult;
use ladder_stdlib::{
    Component, Contact, CounterDown, CounterUp, FallingEdgeContact, InvertedContact,
    OffDelayTimer, OnDelayTimer, Output, PulseTimer, RetentiveOutput, RisingEdgeContact,
    TimerPreset,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Construct a single component.
///
/// # Errors
///
/// Returns the preset validation errors of the timer and counter constructors.
pub fn build_component(config: &ComponentConfig) -> LadderResult<Component> {
    let mut component: Component = match config {
        ComponentConfig::Contact { name, .. } => Contact::new(name).into(),
        ComponentConfig::InvertedContact { name, .. } => InvertedContact::new(name).into(),
        ComponentConfig::RisingEdge { name, .. } => RisingEdgeContact::new(name).into(),
        ComponentConfig::FallingEdge { name, .. } => FallingEdgeContact::new(name).into(),
        ComponentConfig::Output { name } => Output::new(name).into(),
        ComponentConfig::RetentiveOutput { name } => RetentiveOutput::new(name).into(),
        ComponentConfig::OnDelayTimer { name, delay, pt } => {
            OnDelayTimer::new(name, preset(*delay, *pt))?.into()
        }
        ComponentConfig::OffDelayTimer { name, delay, pt } => {
            OffDelayTimer::new(name, preset(*delay, *pt))?.into()
        }
        ComponentConfig::PulseTimer { name, delay, pt } => {
            PulseTimer::new(name, preset(*delay, *pt))?.into()
        }
        ComponentConfig::CounterUp { name, preset } => CounterUp::new(name, *preset)?.into(),
        ComponentConfig::CounterDown {
            name,
            preset,
            current_value,
        } => match current_value {
            Some(cv) => CounterDown::with_current_value(name, *preset, *cv)?.into(),
            None => CounterDown::new(name, *preset)?.into(),
        },
    };

    if let ComponentConfig::Contact { active: true, .. }
    | ComponentConfig::InvertedContact { active: true, .. }
    | ComponentConfig::RisingEdge { active: true, .. }
    | ComponentConfig::FallingEdge { active: true, .. } = config
    {
        component.activate()?;
        // An input that starts high is not an edge
        component.reset();
    }

    Ok(component)
}

fn preset(delay: Option<i64>, pt: Option<i64>) -> TimerPreset {
    TimerPreset { delay, pt }
}

/// Construct a rung, validating its output count.
///
/// # Errors
///
/// Returns component construction errors, or [`ladder_common::LadderError::NoOutput`]
/// / [`ladder_common::LadderError::MultipleOutputs`].
pub fn build_rung(config: &RungConfig) -> LadderResult<Rung> {
    let components = config
        .components
        .iter()
        .map(build_component)
        .collect::<LadderResult<Vec<_>>>()?;
    Rung::new(components)
}

/// Construct a whole ladder.
///
/// Duplicate component names are allowed but logged: name lookups resolve to
/// the first match.
///
/// # Errors
///
/// Returns the first rung or component construction error.
pub fn build_ladder(config: &ProgramConfig) -> LadderResult<Ladder> {
    let mut ladder = Ladder::new();
    let mut seen = HashSet::new();

    for (index, rung_config) in config.rungs.iter().enumerate() {
        for component in &rung_config.components {
            if !seen.insert(component.name()) {
                warn!(
                    rung = index + 1,
                    name = component.name(),
                    "Duplicate component name; lookups resolve to the first"
                );
            }
        }
        ladder.add_rung(build_rung(rung_config)?);
    }

    debug!(rungs = ladder.rungs().len(), "Ladder built");
    Ok(ladder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_common::config::SimConfig;
    use ladder_common::error::LadderError;
    use ladder_stdlib::ComponentKind;

    fn program(toml: &str) -> ProgramConfig {
        SimConfig::from_toml(toml).unwrap().program
    }

    #[test]
    fn test_build_from_toml() {
        let config = program(
            r#"
            [[program.rungs]]
            components = [
                { kind = "contact", name = "Start", active = true },
                { kind = "inverted_contact", name = "Stop" },
                { kind = "on_delay_timer", name = "T1", PT = 2 },
                { kind = "output", name = "Lamp" },
            ]

            [[program.rungs]]
            components = [
                { kind = "rising_edge", name = "Pulse" },
                { kind = "counter_down", name = "C1", preset = 3 },
                { kind = "retentive_output", name = "Done" },
            ]
            "#,
        );

        let mut ladder = build_ladder(&config).unwrap();
        assert_eq!(ladder.rungs().len(), 2);
        assert_eq!(
            ladder.component("T1").map(Component::kind),
            Some(ComponentKind::OnDelayTimer)
        );

        ladder.scan_once();
        assert!(!ladder.component("Lamp").unwrap().state());
        ladder.scan_once();
        assert!(ladder.component("Lamp").unwrap().state());
    }

    #[test]
    fn test_active_edge_contact_does_not_fire() {
        let config = ComponentConfig::RisingEdge {
            name: "P".into(),
            active: true,
        };
        let mut component = build_component(&config).unwrap();
        assert!(component.state());
        assert!(!component.evaluate(true));
    }

    #[test]
    fn test_same_validation_as_typed_api() {
        let missing = ComponentConfig::PulseTimer {
            name: "T".into(),
            delay: None,
            pt: None,
        };
        assert_eq!(build_component(&missing), Err(LadderError::MissingPreset));

        let conflicting = ComponentConfig::OnDelayTimer {
            name: "T".into(),
            delay: Some(1),
            pt: Some(2),
        };
        assert_eq!(
            build_component(&conflicting),
            Err(LadderError::ConflictingPreset { delay: 1, pt: 2 })
        );

        let negative = ComponentConfig::CounterUp {
            name: "C".into(),
            preset: -1,
        };
        assert!(matches!(
            build_component(&negative),
            Err(LadderError::NegativePreset { .. })
        ));
    }

    #[test]
    fn test_rung_shape_errors() {
        let no_output = RungConfig {
            components: vec![ComponentConfig::Contact {
                name: "A".into(),
                active: false,
            }],
        };
        assert_eq!(build_rung(&no_output).unwrap_err(), LadderError::NoOutput);

        let two_outputs = RungConfig {
            components: vec![
                ComponentConfig::Output { name: "Y1".into() },
                ComponentConfig::Output { name: "Y2".into() },
            ],
        };
        assert_eq!(
            build_rung(&two_outputs).unwrap_err(),
            LadderError::MultipleOutputs { count: 2 }
        );
    }

    #[test]
    fn test_counter_down_current_value() {
        let config = ComponentConfig::CounterDown {
            name: "C".into(),
            preset: 5,
            current_value: Some(1),
        };
        let component = build_component(&config).unwrap();
        assert_eq!(component.detail().as_deref(), Some("CV=1 PV=5"));
    }

    #[test]
    fn test_counter_down_config_q_follows_cv() {
        let exhausted = ComponentConfig::CounterDown {
            name: "C".into(),
            preset: 5,
            current_value: Some(0),
        };
        assert!(build_component(&exhausted).unwrap().state());

        let negative = ComponentConfig::CounterDown {
            name: "C".into(),
            preset: 5,
            current_value: Some(-2),
        };
        assert!(matches!(
            build_component(&negative),
            Err(LadderError::NegativePreset { .. })
        ));
    }

    #[test]
    fn test_empty_program() {
        let ladder = build_ladder(&ProgramConfig::default()).unwrap();
        assert!(ladder.rungs().is_empty());
    }
}
