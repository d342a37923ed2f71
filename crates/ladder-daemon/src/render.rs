//! Console status output, attached to the scan loop as an observer.

use ladder_runtime::{Ladder, LadderSnapshot, ScanObserver, ScanReport};
use std::io::{self, Write};
use std::ops::ControlFlow;
use tracing::warn;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// One `Rung N output: TRUE` line per rung plus component states.
    Text,
    /// One JSON snapshot per line.
    Json,
}

/// Writes ladder status every `every_scans` scans.
#[derive(Debug)]
pub struct StatusRenderer<W> {
    out: W,
    format: RenderFormat,
    every_scans: u64,
}

impl<W: Write> StatusRenderer<W> {
    /// Render to `out` once per `every_scans` scans (minimum 1).
    pub fn new(out: W, format: RenderFormat, every_scans: u64) -> Self {
        Self {
            out,
            format,
            every_scans: every_scans.max(1),
        }
    }

    /// Write the current state of `ladder`.
    pub fn render(&mut self, ladder: &Ladder) -> io::Result<()> {
        let snapshot = ladder.snapshot();
        match self.format {
            RenderFormat::Text => write_text(&mut self.out, &snapshot)?,
            RenderFormat::Json => {
                serde_json::to_writer(&mut self.out, &snapshot)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_text(out: &mut impl Write, snapshot: &LadderSnapshot) -> io::Result<()> {
    writeln!(out, "--- scan {} ({}) ---", snapshot.scan_count, snapshot.state)?;
    for rung in &snapshot.rungs {
        let status = match rung.result {
            Some(true) => "TRUE",
            Some(false) => "FALSE",
            None => "-",
        };
        writeln!(out, "Rung {} output: {status}", rung.index)?;
        for component in &rung.components {
            let state = if component.state { "TRUE" } else { "FALSE" };
            write!(
                out,
                "  {:<5} {:<16} {state}",
                component.kind.symbol(),
                component.name
            )?;
            if let Some(detail) = &component.detail {
                write!(out, " [{detail}]")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

impl<W: Write> ScanObserver for StatusRenderer<W> {
    fn on_scan(&mut self, report: &ScanReport, ladder: &Ladder) -> ControlFlow<()> {
        if report.scan % self.every_scans == 0 {
            if let Err(e) = self.render(ladder) {
                // A closed console should not stop the ladder
                warn!(error = %e, "Status render failed");
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_runtime::Rung;
    use ladder_stdlib::{Contact, CounterUp, Output};
    use std::time::Duration;

    fn ladder() -> Ladder {
        let mut ladder = Ladder::new();
        ladder.add_rung(
            Rung::new(vec![
                Contact::new("Start").into(),
                CounterUp::new("Parts", 2).unwrap().into(),
                Output::new("Lamp").into(),
            ])
            .unwrap(),
        );
        ladder
    }

    fn report(scan: u64) -> ScanReport {
        ScanReport {
            scan,
            result: true,
            execution_time: Duration::ZERO,
            overrun: false,
        }
    }

    #[test]
    fn test_text_render() {
        let mut ladder = ladder();
        ladder.activate("Start").unwrap();
        ladder.scan_once();

        let mut renderer = StatusRenderer::new(Vec::new(), RenderFormat::Text, 1);
        renderer.render(&ladder).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(text.contains("Rung 1 output: FALSE"));
        assert!(text.contains("Start"));
        assert!(text.contains("[CV=1 PV=2]"));
    }

    #[test]
    fn test_json_render() {
        let mut ladder = ladder();
        ladder.scan_once();

        let mut renderer = StatusRenderer::new(Vec::new(), RenderFormat::Json, 1);
        renderer.render(&ladder).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["scan_count"], 1);
        assert_eq!(value["rungs"][0]["output"], "Lamp");
    }

    #[test]
    fn test_render_interval() {
        let ladder = ladder();
        let mut renderer = StatusRenderer::new(Vec::new(), RenderFormat::Json, 3);
        for scan in 1..=6 {
            assert!(renderer.on_scan(&report(scan), &ladder).is_continue());
        }
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
