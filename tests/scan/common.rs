//! Shared builders for integration tests.

#![allow(dead_code)]

use ladder_runtime::{Ladder, Rung};
use ladder_stdlib::Component;
use std::io::Write;
use tempfile::NamedTempFile;

/// Build a ladder from rungs given as component lists.
pub fn ladder_of(rungs: Vec<Vec<Component>>) -> Ladder {
    let mut ladder = Ladder::new();
    for components in rungs {
        ladder.add_rung(Rung::new(components).expect("valid rung"));
    }
    ladder
}

/// Scan `n` times, collecting the state of `name` after each scan.
pub fn trace(ladder: &mut Ladder, name: &str, n: usize) -> Vec<bool> {
    (0..n)
        .map(|_| {
            ladder.scan_once();
            ladder.component(name).expect("component exists").state()
        })
        .collect()
}

/// Write `content` to a temporary `.toml` file.
pub fn toml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}
