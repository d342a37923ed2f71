#![doc = "Rung evaluation and cyclic scan engine for the ladder simulator."]

pub mod ladder;
pub mod observer;
pub mod program;
pub mod rung;
pub mod snapshot;

pub use ladder::*;
pub use observer::*;
pub use program::*;
pub use rung::*;
pub use snapshot::*;
