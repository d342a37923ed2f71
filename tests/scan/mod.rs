//! Whole-ladder integration tests.

mod common;
mod program_test;
mod properties_test;
mod run_test;
