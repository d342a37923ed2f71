//! The [`Component`] tagged union over every primitive a rung can hold.
//!
//! Rungs treat components by [`Role`]:
//! - **Input** components (contacts) are gates: evaluated every scan and
//!   ANDed into the power flow.
//! - **Function blocks** (timers, counters) are transformers: they take the
//!   power flow as IN and replace it with their Q.
//! - **Output** coils terminate the rung.

use crate::coils::{Output, RetentiveOutput};
use crate::contacts::{Contact, FallingEdgeContact, InvertedContact, RisingEdgeContact};
use crate::counters::{CounterDown, CounterUp};
use crate::timers::{OffDelayTimer, OnDelayTimer, PulseTimer};
use ladder_common::error::{LadderError, LadderResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a component combines with the power flow of its rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Contact: ANDed into the rung.
    Input,
    /// Timer or counter: fed the rung as IN.
    FunctionBlock,
    /// Coil: receives the rung result.
    Output,
}

/// Primitive kind, used for display and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Normally-open contact.
    Contact,
    /// Normally-closed contact.
    InvertedContact,
    /// Positive transition contact.
    RisingEdge,
    /// Negative transition contact.
    FallingEdge,
    /// Plain coil.
    Output,
    /// Latching coil.
    RetentiveOutput,
    /// TON.
    OnDelayTimer,
    /// TOF.
    OffDelayTimer,
    /// TP.
    PulseTimer,
    /// CTU.
    CounterUp,
    /// CTD.
    CounterDown,
}

impl ComponentKind {
    /// Role of components of this kind.
    #[must_use]
    pub fn role(self) -> Role {
        match self {
            Self::Contact | Self::InvertedContact | Self::RisingEdge | Self::FallingEdge => {
                Role::Input
            }
            Self::Output | Self::RetentiveOutput => Role::Output,
            Self::OnDelayTimer
            | Self::OffDelayTimer
            | Self::PulseTimer
            | Self::CounterUp
            | Self::CounterDown => Role::FunctionBlock,
        }
    }

    /// Ladder-diagram symbol or IEC mnemonic.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Contact => "-| |-",
            Self::InvertedContact => "-|/|-",
            Self::RisingEdge => "-|P|-",
            Self::FallingEdge => "-|N|-",
            Self::Output => "-( )-",
            Self::RetentiveOutput => "-(L)-",
            Self::OnDelayTimer => "TON",
            Self::OffDelayTimer => "TOF",
            Self::PulseTimer => "TP",
            Self::CounterUp => "CTU",
            Self::CounterDown => "CTD",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contact => "contact",
            Self::InvertedContact => "inverted_contact",
            Self::RisingEdge => "rising_edge",
            Self::FallingEdge => "falling_edge",
            Self::Output => "output",
            Self::RetentiveOutput => "retentive_output",
            Self::OnDelayTimer => "on_delay_timer",
            Self::OffDelayTimer => "off_delay_timer",
            Self::PulseTimer => "pulse_timer",
            Self::CounterUp => "counter_up",
            Self::CounterDown => "counter_down",
        };
        f.write_str(name)
    }
}

/// Any ladder primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Normally-open contact.
    Contact(Contact),
    /// Normally-closed contact.
    InvertedContact(InvertedContact),
    /// Positive transition contact.
    RisingEdge(RisingEdgeContact),
    /// Negative transition contact.
    FallingEdge(FallingEdgeContact),
    /// Plain coil.
    Output(Output),
    /// Latching coil.
    RetentiveOutput(RetentiveOutput),
    /// TON.
    OnDelayTimer(OnDelayTimer),
    /// TOF.
    OffDelayTimer(OffDelayTimer),
    /// TP.
    PulseTimer(PulseTimer),
    /// CTU.
    CounterUp(CounterUp),
    /// CTD.
    CounterDown(CounterDown),
}

impl Component {
    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Contact(c) => c.name(),
            Self::InvertedContact(c) => c.name(),
            Self::RisingEdge(c) => c.name(),
            Self::FallingEdge(c) => c.name(),
            Self::Output(c) => c.name(),
            Self::RetentiveOutput(c) => c.name(),
            Self::OnDelayTimer(t) => t.name(),
            Self::OffDelayTimer(t) => t.name(),
            Self::PulseTimer(t) => t.name(),
            Self::CounterUp(c) => c.name(),
            Self::CounterDown(c) => c.name(),
        }
    }

    /// Primitive kind.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Contact(_) => ComponentKind::Contact,
            Self::InvertedContact(_) => ComponentKind::InvertedContact,
            Self::RisingEdge(_) => ComponentKind::RisingEdge,
            Self::FallingEdge(_) => ComponentKind::FallingEdge,
            Self::Output(_) => ComponentKind::Output,
            Self::RetentiveOutput(_) => ComponentKind::RetentiveOutput,
            Self::OnDelayTimer(_) => ComponentKind::OnDelayTimer,
            Self::OffDelayTimer(_) => ComponentKind::OffDelayTimer,
            Self::PulseTimer(_) => ComponentKind::PulseTimer,
            Self::CounterUp(_) => ComponentKind::CounterUp,
            Self::CounterDown(_) => ComponentKind::CounterDown,
        }
    }

    /// Role in the power flow.
    #[must_use]
    pub fn role(&self) -> Role {
        self.kind().role()
    }

    /// Returns true for output coils.
    #[must_use]
    pub fn is_output(&self) -> bool {
        self.role() == Role::Output
    }

    /// Boolean state: the level of a contact, the state of a coil, or Q of a
    /// function block.
    #[must_use]
    pub fn state(&self) -> bool {
        match self {
            Self::Contact(c) => c.state(),
            Self::InvertedContact(c) => c.state(),
            Self::RisingEdge(c) => c.state(),
            Self::FallingEdge(c) => c.state(),
            Self::Output(c) => c.state(),
            Self::RetentiveOutput(c) => c.state(),
            Self::OnDelayTimer(t) => t.q(),
            Self::OffDelayTimer(t) => t.q(),
            Self::PulseTimer(t) => t.q(),
            Self::CounterUp(c) => c.q(),
            Self::CounterDown(c) => c.q(),
        }
    }

    /// `"TRUE"` or `"FALSE"`.
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.state() {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Accumulator values of function blocks, e.g. `ET=2 PT=5`.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::OnDelayTimer(t) => Some(format!("ET={} PT={}", t.et(), t.pt())),
            Self::OffDelayTimer(t) => Some(format!("ET={} PT={}", t.et(), t.pt())),
            Self::PulseTimer(t) => Some(format!("ET={} PT={}", t.et(), t.pt())),
            Self::CounterUp(c) => Some(format!("CV={} PV={}", c.cv(), c.pv())),
            Self::CounterDown(c) => Some(format!("CV={} PV={}", c.cv(), c.pv())),
            _ => None,
        }
    }

    /// Execute one scan.
    ///
    /// Contacts ignore `rail` and return their own contribution, which the
    /// caller ANDs into the power flow. Function blocks and coils take `rail`
    /// as their input and return their new Q/state.
    pub fn evaluate(&mut self, rail: bool) -> bool {
        match self {
            Self::Contact(c) => c.evaluate(),
            Self::InvertedContact(c) => c.evaluate(),
            Self::RisingEdge(c) => c.evaluate(None),
            Self::FallingEdge(c) => c.evaluate(None),
            Self::Output(c) => c.evaluate(rail),
            Self::RetentiveOutput(c) => c.evaluate(rail),
            Self::OnDelayTimer(t) => t.evaluate(rail),
            Self::OffDelayTimer(t) => t.evaluate(rail),
            Self::PulseTimer(t) => t.evaluate(rail),
            Self::CounterUp(c) => c.evaluate(rail),
            Self::CounterDown(c) => c.evaluate(rail),
        }
    }

    /// Actuate a contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::NotAnInput`] for coils and function blocks.
    pub fn activate(&mut self) -> LadderResult<()> {
        self.set_input(true)
    }

    /// Release a contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::NotAnInput`] for coils and function blocks.
    pub fn deactivate(&mut self) -> LadderResult<()> {
        self.set_input(false)
    }

    fn set_input(&mut self, active: bool) -> LadderResult<()> {
        match (self, active) {
            (Self::Contact(c), true) => c.activate(),
            (Self::Contact(c), false) => c.deactivate(),
            (Self::InvertedContact(c), true) => c.activate(),
            (Self::InvertedContact(c), false) => c.deactivate(),
            (Self::RisingEdge(c), true) => c.activate(),
            (Self::RisingEdge(c), false) => c.deactivate(),
            (Self::FallingEdge(c), true) => c.activate(),
            (Self::FallingEdge(c), false) => c.deactivate(),
            (other, _) => {
                return Err(LadderError::NotAnInput {
                    name: other.name().to_string(),
                    kind: other.kind().to_string(),
                })
            }
        }
        Ok(())
    }

    /// Return the component to its reset state.
    ///
    /// Plain contacts and plain coils have no reset and are left unchanged.
    pub fn reset(&mut self) {
        match self {
            Self::RisingEdge(c) => c.reset(),
            Self::FallingEdge(c) => c.reset(),
            Self::RetentiveOutput(c) => {
                c.reset();
            }
            Self::OnDelayTimer(t) => t.reset(),
            Self::OffDelayTimer(t) => t.reset(),
            Self::PulseTimer(t) => t.reset(),
            Self::CounterUp(c) => c.reset(),
            Self::CounterDown(c) => c.reset(),
            Self::Contact(_) | Self::InvertedContact(_) | Self::Output(_) => {}
        }
    }
}

macro_rules! impl_from_primitive {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    Contact => Contact,
    InvertedContact => InvertedContact,
    RisingEdge => RisingEdgeContact,
    FallingEdge => FallingEdgeContact,
    Output => Output,
    RetentiveOutput => RetentiveOutput,
    OnDelayTimer => OnDelayTimer,
    OffDelayTimer => OffDelayTimer,
    PulseTimer => PulseTimer,
    CounterUp => CounterUp,
    CounterDown => CounterDown,
}
