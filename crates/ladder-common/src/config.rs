//! Configuration structures for the ladder simulator.
//!
//! Supports TOML deserialization with sensible defaults. A configuration file
//! carries both run-loop settings and the ladder program itself:
//!
//! ```toml
//! cycle_time = "100ms"
//!
//! [[program.rungs]]
//! components = [
//!     { kind = "contact", name = "Start", active = true },
//!     { kind = "inverted_contact", name = "Stop" },
//!     { kind = "output", name = "Motor" },
//! ]
//! ```

use crate::error::{LadderError, LadderResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Top-level simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Period of the scan loop.
    #[serde(with = "humantime_serde")]
    pub cycle_time: Duration,

    /// Stop after this many scans (0 = run until stopped).
    pub max_scans: u64,

    /// Status rendering configuration.
    pub render: RenderConfig,

    /// The ladder program to run.
    pub program: ProgramConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycle_time: Duration::from_millis(100),
            max_scans: 0,
            render: RenderConfig::default(),
            program: ProgramConfig::default(),
        }
    }
}

/// Status rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Print rung status while running.
    pub enabled: bool,

    /// Render once every this many scans.
    pub every_scans: u64,

    /// Emit JSON snapshots instead of text.
    pub json: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            every_scans: 10,
            json: false,
        }
    }
}

/// A ladder program: rungs in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Rungs, evaluated top to bottom.
    pub rungs: Vec<RungConfig>,
}

impl ProgramConfig {
    /// Returns true if the program has no rungs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }
}

/// One rung: components left to right, exactly one of them an output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RungConfig {
    /// Components in power-flow order.
    pub components: Vec<ComponentConfig>,
}

/// Declarative description of a single component.
///
/// Presets are kept as signed integers so that negative values reach
/// construction-time validation instead of failing as parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentConfig {
    /// Normally-open contact.
    Contact {
        /// Component name.
        name: String,
        /// Start activated.
        #[serde(default)]
        active: bool,
    },
    /// Normally-closed contact.
    InvertedContact {
        /// Component name.
        name: String,
        /// Start activated (i.e. open).
        #[serde(default)]
        active: bool,
    },
    /// One-shot on a false to true transition.
    RisingEdge {
        /// Component name.
        name: String,
        /// Start activated.
        #[serde(default)]
        active: bool,
    },
    /// One-shot on a true to false transition.
    FallingEdge {
        /// Component name.
        name: String,
        /// Start activated.
        #[serde(default)]
        active: bool,
    },
    /// Plain output coil.
    Output {
        /// Component name.
        name: String,
    },
    /// Latching output coil.
    RetentiveOutput {
        /// Component name.
        name: String,
    },
    /// TON timer.
    OnDelayTimer {
        /// Component name.
        name: String,
        /// Preset in scans.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<i64>,
        /// Preset in scans (IEC name).
        #[serde(default, alias = "PT", skip_serializing_if = "Option::is_none")]
        pt: Option<i64>,
    },
    /// TOF timer.
    OffDelayTimer {
        /// Component name.
        name: String,
        /// Preset in scans.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<i64>,
        /// Preset in scans (IEC name).
        #[serde(default, alias = "PT", skip_serializing_if = "Option::is_none")]
        pt: Option<i64>,
    },
    /// TP timer.
    PulseTimer {
        /// Component name.
        name: String,
        /// Pulse length in scans.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<i64>,
        /// Pulse length in scans (IEC name).
        #[serde(default, alias = "PT", skip_serializing_if = "Option::is_none")]
        pt: Option<i64>,
    },
    /// CTU counter.
    CounterUp {
        /// Component name.
        name: String,
        /// Preset value.
        #[serde(alias = "PV")]
        preset: i64,
    },
    /// CTD counter.
    CounterDown {
        /// Component name.
        name: String,
        /// Preset value.
        #[serde(alias = "PV")]
        preset: i64,
        /// Starting value; defaults to the preset.
        #[serde(default, alias = "CV", skip_serializing_if = "Option::is_none")]
        current_value: Option<i64>,
    },
}

impl ComponentConfig {
    /// Component name, whatever the kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Contact { name, .. }
            | Self::InvertedContact { name, .. }
            | Self::RisingEdge { name, .. }
            | Self::FallingEdge { name, .. }
            | Self::Output { name }
            | Self::RetentiveOutput { name }
            | Self::OnDelayTimer { name, .. }
            | Self::OffDelayTimer { name, .. }
            | Self::PulseTimer { name, .. }
            | Self::CounterUp { name, .. }
            | Self::CounterDown { name, .. } => name,
        }
    }

    /// Returns true for output coils.
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output { .. } | Self::RetentiveOutput { .. })
    }
}

/// Reject a zero scan period or one too large to schedule.
///
/// # Errors
///
/// Returns [`LadderError::InvalidCycleTime`] if `cycle_time` is zero or if
/// the next scan deadline cannot be represented as an [`Instant`].
pub fn validate_cycle_time(cycle_time: Duration) -> LadderResult<Duration> {
    if cycle_time.is_zero() {
        return Err(LadderError::InvalidCycleTime(
            "cycle time must be greater than zero".into(),
        ));
    }
    if Instant::now().checked_add(cycle_time).is_none() {
        return Err(LadderError::InvalidCycleTime(format!(
            "cycle time {}s is too large",
            cycle_time.as_secs()
        )));
    }
    Ok(cycle_time)
}

/// Convert a cycle time in seconds, rejecting non-positive or non-finite values.
///
/// # Errors
///
/// Returns [`LadderError::InvalidCycleTime`] for `secs <= 0`, NaN, or infinity.
pub fn cycle_time_from_secs(secs: f64) -> LadderResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(LadderError::InvalidCycleTime(format!(
            "cycle time must be a positive number of seconds, got {secs}"
        )));
    }
    let cycle_time = Duration::try_from_secs_f64(secs)
        .map_err(|e| LadderError::InvalidCycleTime(e.to_string()))?;
    validate_cycle_time(cycle_time)
}

impl SimConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check run-loop settings.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidCycleTime`] for a zero cycle time.
    pub fn validate(&self) -> LadderResult<()> {
        validate_cycle_time(self.cycle_time)?;
        Ok(())
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
