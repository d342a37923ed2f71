//! Ladder simulator entry point.
//!
//! Loads a ladder program, runs it on a fixed scan cycle, and prints rung
//! status until stopped by `q` on the console, SIGINT/SIGTERM, or a scan
//! limit.

mod render;
mod signals;

use anyhow::{Context, Result};
use clap::Parser;
use ladder_common::config::{ComponentConfig, ProgramConfig, RungConfig, SimConfig};
use ladder_runtime::{build_ladder, Ladder, NoopObserver, RunSummary, ScanLimit};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::render::{RenderFormat, StatusRenderer};
use crate::signals::{spawn_quit_listener, SignalHandler};

/// Ladder simulator command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "ladder-daemon",
    about = "Ladder logic simulator - scans a ladder program on a fixed cycle",
    version,
    long_about = None
)]
struct Args {
    /// Path to a simulator configuration file (TOML).
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scan period, e.g. `100ms` or `1s` (overrides config file).
    #[arg(long, short = 't', value_parser = humantime::parse_duration)]
    cycle_time: Option<Duration>,

    /// Maximum scans to run, 0 = until stopped (overrides config file).
    #[arg(long)]
    max_scans: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// Print JSON snapshots instead of text.
    #[arg(long)]
    json: bool,

    /// Do not read `q` from stdin; stop only by signal or scan limit.
    #[arg(long)]
    no_listener: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ladder simulator");

    let mut config = load_config(&args)?;
    apply_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;

    info!(
        cycle_time = %humantime::format_duration(config.cycle_time),
        max_scans = config.max_scans,
        "Configuration loaded"
    );

    let program = if config.program.is_empty() {
        info!("No program configured, using built-in demo program");
        demo_program()
    } else {
        config.program.clone()
    };
    let ladder = build_ladder(&program).context("Failed to build ladder program")?;

    run_simulator(ladder, &config, !args.no_listener)
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!(
        "ladder_daemon={level},ladder_runtime={level},ladder_common={level}"
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing file wins):
/// 1. Command-line `--config` argument
/// 2. `LADDER_CONFIG_PATH` environment variable
/// 3. `config/ladder.toml` (working directory)
/// 4. Built-in defaults
fn load_config(args: &Args) -> Result<SimConfig> {
    if let Some(config_path) = &args.config {
        info!(?config_path, "Loading config from command-line argument");
        return SimConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    if let Ok(env_path) = std::env::var("LADDER_CONFIG_PATH") {
        let config_path = PathBuf::from(&env_path);
        if config_path.exists() {
            info!(?config_path, "Loading config from LADDER_CONFIG_PATH");
            return SimConfig::from_file(&config_path).with_context(|| {
                format!("Failed to load config from LADDER_CONFIG_PATH={env_path}")
            });
        }
        warn!(
            path = %env_path,
            "LADDER_CONFIG_PATH set but file does not exist, checking other locations"
        );
    }

    let local_path = PathBuf::from("config/ladder.toml");
    if local_path.exists() {
        info!(?local_path, "Loading config from local path");
        return SimConfig::from_file(&local_path)
            .with_context(|| format!("Failed to load config from {}", local_path.display()));
    }

    info!("No config file found, using built-in defaults");
    Ok(SimConfig::default())
}

fn apply_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(cycle_time) = args.cycle_time {
        config.cycle_time = cycle_time;
    }
    if let Some(max_scans) = args.max_scans {
        config.max_scans = max_scans;
    }
    if args.json {
        config.render.json = true;
    }
}

/// Two rungs: a start/stop circuit and an override lamp.
fn demo_program() -> ProgramConfig {
    let contact = |name: &str| ComponentConfig::Contact {
        name: name.into(),
        active: false,
    };

    ProgramConfig {
        rungs: vec![
            RungConfig {
                components: vec![
                    contact("StartSwitch"),
                    ComponentConfig::InvertedContact {
                        name: "StopSwitch".into(),
                        active: false,
                    },
                    ComponentConfig::Output {
                        name: "OutputLight1".into(),
                    },
                ],
            },
            RungConfig {
                components: vec![
                    contact("OverrideSwitch"),
                    ComponentConfig::Output {
                        name: "WarningLight".into(),
                    },
                ],
            },
        ],
    }
}

/// Run the scan loop until a stop source fires.
fn run_simulator(mut ladder: Ladder, config: &SimConfig, listen: bool) -> Result<()> {
    let signals = SignalHandler::install(ladder.stop_handle())
        .context("Failed to set up signal handlers")?;

    if listen {
        spawn_quit_listener(ladder.stop_handle()).context("Failed to start quit listener")?;
        println!("Ladder is running. Press 'Q' then Enter to quit.");
    }

    let format = if config.render.json {
        RenderFormat::Json
    } else {
        RenderFormat::Text
    };

    let summary = if config.render.enabled {
        let renderer = StatusRenderer::new(std::io::stdout(), format, config.render.every_scans);
        let mut observer = ScanLimit::new(config.max_scans, renderer);
        ladder.run_with(config.cycle_time, &mut observer)
    } else {
        let mut observer = ScanLimit::new(config.max_scans, NoopObserver);
        ladder.run_with(config.cycle_time, &mut observer)
    }
    .context("Scan loop failed")?;

    report_summary(&summary, signals.signal_count(), format);
    Ok(())
}

fn report_summary(summary: &RunSummary, signals: u32, format: RenderFormat) {
    info!(
        scans = summary.scans,
        signals,
        overruns = summary.metrics.overrun_count,
        mean_us = summary.metrics.mean_ns.map_or(0, |ns| ns / 1_000),
        max_us = summary.metrics.max_ns.map_or(0, |ns| ns / 1_000),
        jitter_us = summary.metrics.jitter_ns().map_or(0, |ns| ns / 1_000),
        "Simulator shutdown complete"
    );
    if format == RenderFormat::Text {
        println!("Ladder stopped after {} scans.", summary.scans);
    }
}
