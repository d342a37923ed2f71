//! Serializable view of a ladder's state, used for rendering and JSON output.

use crate::ladder::Ladder;
use crate::rung::Rung;
use ladder_common::state::RunState;
use ladder_stdlib::component::{Component, ComponentKind, Role};
use serde::Serialize;

/// Point-in-time state of a whole ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderSnapshot {
    /// Scans executed so far.
    pub scan_count: u64,
    /// Run-loop state.
    pub state: RunState,
    /// Rungs in scan order.
    pub rungs: Vec<RungSnapshot>,
}

/// Point-in-time state of one rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RungSnapshot {
    /// 1-based position in the ladder.
    pub index: usize,
    /// Result of the last evaluation, if any.
    pub result: Option<bool>,
    /// Name of the output coil.
    pub output: String,
    /// Every component, coil included.
    pub components: Vec<ComponentSnapshot>,
}

/// Point-in-time state of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSnapshot {
    /// Component name.
    pub name: String,
    /// Primitive kind.
    pub kind: ComponentKind,
    /// Role in the rung.
    pub role: Role,
    /// Boolean state.
    pub state: bool,
    /// Timer or counter accumulator, e.g. `ET=1 PT=3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&Component> for ComponentSnapshot {
    fn from(component: &Component) -> Self {
        Self {
            name: component.name().to_string(),
            kind: component.kind(),
            role: component.role(),
            state: component.state(),
            detail: component.detail(),
        }
    }
}

impl RungSnapshot {
    pub(crate) fn capture(index: usize, rung: &Rung) -> Self {
        Self {
            index,
            result: rung.last_result(),
            output: rung.output().name().to_string(),
            components: rung.components().iter().map(Into::into).collect(),
        }
    }
}

impl LadderSnapshot {
    pub(crate) fn capture(ladder: &Ladder) -> Self {
        Self {
            scan_count: ladder.scan_count(),
            state: ladder.state(),
            rungs: ladder
                .rungs()
                .iter()
                .enumerate()
                .map(|(i, rung)| RungSnapshot::capture(i + 1, rung))
                .collect(),
        }
    }
}
