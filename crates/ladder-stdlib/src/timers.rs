//! Scan-counting timer function blocks.
//!
//! This module provides the three IEC 61131-3 timer shapes:
//! - [`OnDelayTimer`] - TON: Q goes TRUE after IN has been TRUE for PT scans
//! - [`OffDelayTimer`] - TOF: Q stays TRUE for PT scans after IN goes FALSE
//! - [`PulseTimer`] - TP: Q is TRUE for PT scans after each rising edge of IN
//!
//! Time is measured in scans: every evaluation advances ET by one tick.
//! PT is fixed at construction. `state` is an alias for Q.

use ladder_common::error::{non_negative, LadderError, LadderResult};

/// Timer preset as supplied by the caller.
///
/// Either `delay` or `pt` must be set. Setting both is accepted only when
/// they agree.
///
/// # Example
///
/// ```
/// use ladder_stdlib::timers::TimerPreset;
///
/// assert_eq!(TimerPreset::delay(5).resolve(), Ok(5));
/// assert!(TimerPreset::default().resolve().is_err());
/// assert!(TimerPreset::pt(-1).resolve().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerPreset {
    /// Preset under its descriptive name.
    pub delay: Option<i64>,
    /// Preset under its IEC name.
    pub pt: Option<i64>,
}

impl TimerPreset {
    /// Preset given as `delay`.
    #[must_use]
    pub fn delay(value: i64) -> Self {
        Self {
            delay: Some(value),
            pt: None,
        }
    }

    /// Preset given as `pt`.
    #[must_use]
    pub fn pt(value: i64) -> Self {
        Self {
            delay: None,
            pt: Some(value),
        }
    }

    /// Validate and resolve to a tick count.
    ///
    /// # Errors
    ///
    /// - [`LadderError::MissingPreset`] if neither field is set.
    /// - [`LadderError::ConflictingPreset`] if both are set and differ.
    /// - [`LadderError::NegativePreset`] if the value is negative.
    pub fn resolve(self) -> LadderResult<u64> {
        let value = match (self.delay, self.pt) {
            (None, None) => return Err(LadderError::MissingPreset),
            (Some(delay), Some(pt)) if delay != pt => {
                return Err(LadderError::ConflictingPreset { delay, pt })
            }
            (Some(value), _) | (None, Some(value)) => value,
        };
        non_negative("PT", value)
    }
}

/// Timer On-Delay (TON).
///
/// ET counts scans while IN is TRUE; Q goes TRUE once ET reaches PT and
/// stays TRUE while IN remains TRUE. IN going FALSE resets ET and Q at once.
///
/// # Timing Diagram (PT = 3)
///
/// ```text
/// scan  0  1  2  3  4  5
/// IN    0  1  1  1  1  0
/// ET    0  1  2  3  4  0
/// Q     0  0  0  1  1  0
/// ```
///
/// # Example
///
/// ```
/// use ladder_stdlib::timers::{OnDelayTimer, TimerPreset};
///
/// let mut ton = OnDelayTimer::new("TON", TimerPreset::delay(3)).unwrap();
/// let q: Vec<bool> = [false, true, true, true]
///     .into_iter()
///     .map(|input| ton.evaluate(input))
///     .collect();
/// assert_eq!(q, [false, false, false, true]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnDelayTimer {
    name: String,
    /// Preset time in scans.
    pt: u64,
    /// Elapsed time in scans.
    et: u64,
    /// Output Q.
    q: bool,
}

impl OnDelayTimer {
    /// Create a new TON timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is missing, conflicting, or negative.
    pub fn new(name: impl Into<String>, preset: TimerPreset) -> LadderResult<Self> {
        Ok(Self {
            name: name.into(),
            pt: preset.resolve()?,
            et: 0,
            q: false,
        })
    }

    /// Execute one scan.
    pub fn evaluate(&mut self, input: bool) -> bool {
        if input {
            self.et = self.et.saturating_add(1);
            self.q = self.et >= self.pt;
        } else {
            self.et = 0;
            self.q = false;
        }
        self.q
    }

    /// Alias for [`evaluate`](Self::evaluate).
    pub fn update(&mut self, input: bool) -> bool {
        self.evaluate(input)
    }

    /// Return to ET=0, Q=FALSE.
    pub fn reset(&mut self) {
        self.et = 0;
        self.q = false;
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset time.
    #[must_use]
    pub fn pt(&self) -> u64 {
        self.pt
    }

    /// Elapsed time.
    #[must_use]
    pub fn et(&self) -> u64 {
        self.et
    }

    /// Output Q.
    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }
}

/// Timer Off-Delay (TOF).
///
/// Q follows IN up immediately. After IN goes FALSE, ET counts scans and Q
/// drops once ET reaches PT. A TRUE input during the delay restarts it.
/// ET only runs while Q is held, so a timer that never saw IN stays idle.
///
/// # Timing Diagram (PT = 2)
///
/// ```text
/// scan  0  1  2  3  4
/// IN    1  0  0  0  1
/// ET    0  1  2  2  0
/// Q     1  1  0  0  1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffDelayTimer {
    name: String,
    pt: u64,
    et: u64,
    q: bool,
}

impl OffDelayTimer {
    /// Create a new TOF timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is missing, conflicting, or negative.
    pub fn new(name: impl Into<String>, preset: TimerPreset) -> LadderResult<Self> {
        Ok(Self {
            name: name.into(),
            pt: preset.resolve()?,
            et: 0,
            q: false,
        })
    }

    /// Execute one scan.
    pub fn evaluate(&mut self, input: bool) -> bool {
        if input {
            self.q = true;
            self.et = 0;
        } else if self.q {
            self.et = self.et.saturating_add(1);
            if self.et >= self.pt {
                self.q = false;
            }
        }
        self.q
    }

    /// Alias for [`evaluate`](Self::evaluate).
    pub fn update(&mut self, input: bool) -> bool {
        self.evaluate(input)
    }

    /// Return to ET=0, Q=FALSE.
    pub fn reset(&mut self) {
        self.et = 0;
        self.q = false;
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset time.
    #[must_use]
    pub fn pt(&self) -> u64 {
        self.pt
    }

    /// Elapsed time.
    #[must_use]
    pub fn et(&self) -> u64 {
        self.et
    }

    /// Output Q.
    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }
}

/// Timer Pulse (TP).
///
/// Every rising edge of IN (re)starts a pulse: ET=0, Q=TRUE. Without a new
/// edge, ET counts scans while Q is TRUE and Q drops once ET reaches PT.
/// Unlike the strict IEC TP, an edge during a running pulse restarts it.
///
/// # Timing Diagram (PT = 3)
///
/// ```text
/// scan  0  1  2  3  4  5  6
/// IN    1  0  0  0  1  0  1
/// ET    0  1  2  3  0  1  0
/// Q     1  1  1  0  1  1  1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseTimer {
    name: String,
    pt: u64,
    et: u64,
    q: bool,
    /// Previous IN for edge detection.
    previous_in: bool,
}

impl PulseTimer {
    /// Create a new TP timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is missing, conflicting, or negative.
    pub fn new(name: impl Into<String>, preset: TimerPreset) -> LadderResult<Self> {
        Ok(Self {
            name: name.into(),
            pt: preset.resolve()?,
            et: 0,
            q: false,
            previous_in: false,
        })
    }

    /// Execute one scan.
    pub fn evaluate(&mut self, input: bool) -> bool {
        if input && !self.previous_in {
            self.et = 0;
            self.q = true;
        } else if self.q {
            self.et = self.et.saturating_add(1);
            if self.et >= self.pt {
                self.q = false;
            }
        }
        self.previous_in = input;
        self.q
    }

    /// Alias for [`evaluate`](Self::evaluate).
    pub fn update(&mut self, input: bool) -> bool {
        self.evaluate(input)
    }

    /// Return to ET=0, Q=FALSE with no edge memory.
    pub fn reset(&mut self) {
        self.et = 0;
        self.q = false;
        self.previous_in = false;
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset time.
    #[must_use]
    pub fn pt(&self) -> u64 {
        self.pt
    }

    /// Elapsed time.
    #[must_use]
    pub fn et(&self) -> u64 {
        self.et
    }

    /// Output Q.
    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }

    /// IN seen by the last evaluation.
    #[must_use]
    pub fn previous_in(&self) -> bool {
        self.previous_in
    }
}
