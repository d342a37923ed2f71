//! Ladder logic primitives.
//!
//! This crate provides every component a rung can hold:
//!
//! - **Contacts** ([`contacts`]): normally open, normally closed, rising and falling edge
//! - **Coils** ([`coils`]): plain and retentive (latching) outputs
//! - **Timers** ([`timers`]): TON, TOF, TP counted in scans
//! - **Counters** ([`counters`]): CTU, CTD
//! - **Component** ([`component`]): the tagged union rungs are built from
//!
//! # Example
//!
//! ```
//! use ladder_stdlib::{Component, Contact, CounterUp, OnDelayTimer, Output, TimerPreset};
//!
//! // Contact
//! let mut start = Contact::new("Start");
//! start.activate();
//! assert!(start.evaluate());
//!
//! // On-delay timer, preset in scans
//! let mut ton = OnDelayTimer::new("Delay", TimerPreset::delay(2)).unwrap();
//! ton.evaluate(true);
//! assert!(ton.evaluate(true));
//!
//! // Counter up
//! let mut ctu = CounterUp::new("Parts", 1).unwrap();
//! assert!(ctu.evaluate(true));
//!
//! // Any primitive converts into a Component
//! let coil: Component = Output::new("Lamp").into();
//! assert!(coil.is_output());
//! ```

pub mod coils;
pub mod component;
pub mod contacts;
pub mod counters;
pub mod timers;

// Re-export main types for convenience
pub use coils::{Output, RetentiveInputs, RetentiveOutput};
pub use component::{Component, ComponentKind, Role};
pub use contacts::{Contact, FallingEdgeContact, InvertedContact, RisingEdgeContact};
pub use counters::{CounterDown, CounterDownInputs, CounterUp, CounterUpInputs};
pub use timers::{OffDelayTimer, OnDelayTimer, PulseTimer, TimerPreset};
