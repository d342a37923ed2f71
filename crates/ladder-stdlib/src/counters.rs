//! Counter function blocks.
//!
//! - [`CounterUp`] - CTU: counts rising edges of CU up towards PV
//! - [`CounterDown`] - CTD: counts rising edges of CD down from PV to zero
//!
//! Counters detect edges internally, so they must be evaluated every scan.
//! CV never goes negative. PV may be replaced at runtime through the
//! `pv` input; a negative PV is rejected before anything changes.

use ladder_common::error::{non_negative, LadderResult};

/// Inputs for one scan of a [`CounterUp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterUpInputs {
    /// Count up input - counts on rising edge.
    pub cu: bool,
    /// Reset input - forces CV to 0.
    pub r: bool,
    /// Replacement preset value, applied before counting.
    pub pv: Option<i64>,
}

/// Counter Up (CTU).
///
/// Counts up on each rising edge of CU. Q is TRUE when CV >= PV. R resets
/// CV to 0 and takes priority over counting.
///
/// # IEC 61131-3 Interface
///
/// ```text
/// FUNCTION_BLOCK CTU
/// VAR_INPUT
///     CU : BOOL;    (* Count up input - counts on rising edge *)
///     R : BOOL;     (* Reset input *)
///     PV : INT;     (* Preset value *)
/// END_VAR
/// VAR_OUTPUT
///     Q : BOOL;     (* Output - TRUE when CV >= PV *)
///     CV : INT;     (* Current value *)
/// END_VAR
/// ```
///
/// # Example
///
/// ```
/// use ladder_stdlib::counters::{CounterUp, CounterUpInputs};
///
/// let mut ctu = CounterUp::new("CTU", 2).unwrap();
/// assert!(!ctu.evaluate(true));   // CV = 1
/// assert!(!ctu.evaluate(true));   // held high, CV = 1
/// assert!(!ctu.evaluate(false));
/// assert!(ctu.evaluate(true));    // CV = 2
///
/// let q = ctu.evaluate_with(CounterUpInputs { cu: true, r: true, pv: None }).unwrap();
/// assert!(!q);
/// assert_eq!(ctu.cv(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterUp {
    name: String,
    /// Preset value.
    pv: u64,
    /// Current value.
    cv: u64,
    /// Output Q.
    q: bool,
    /// Previous CU for edge detection.
    previous_in: bool,
}

impl CounterUp {
    /// Create a new CTU counter at CV=0.
    ///
    /// # Errors
    ///
    /// Returns an error if `preset` is negative.
    pub fn new(name: impl Into<String>, preset: i64) -> LadderResult<Self> {
        let pv = non_negative("PV", preset)?;
        Ok(Self {
            name: name.into(),
            pv,
            cv: 0,
            q: pv == 0,
            previous_in: false,
        })
    }

    /// Execute one scan with CU driven by `input`.
    pub fn evaluate(&mut self, input: bool) -> bool {
        self.step(input, false)
    }

    /// Execute one scan with the full input set.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the counter untouched, if `pv` is negative.
    pub fn evaluate_with(&mut self, inputs: CounterUpInputs) -> LadderResult<bool> {
        if let Some(pv) = inputs.pv {
            self.set_preset(pv)?;
        }
        Ok(self.step(inputs.cu, inputs.r))
    }

    fn step(&mut self, cu: bool, r: bool) -> bool {
        if r {
            self.cv = 0;
        } else if cu && !self.previous_in {
            self.cv = self.cv.saturating_add(1);
        }
        self.previous_in = cu;
        self.q = self.cv >= self.pv;
        self.q
    }

    /// Replace the preset value and refresh Q against the current count.
    ///
    /// # Errors
    ///
    /// Returns an error if `pv` is negative.
    pub fn set_preset(&mut self, pv: i64) -> LadderResult<()> {
        self.pv = non_negative("PV", pv)?;
        self.q = self.cv >= self.pv;
        Ok(())
    }

    /// Return to CV=0 with no edge memory.
    pub fn reset(&mut self) {
        self.cv = 0;
        self.previous_in = false;
        self.q = self.cv >= self.pv;
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset value.
    #[must_use]
    pub fn pv(&self) -> u64 {
        self.pv
    }

    /// Current value.
    #[must_use]
    pub fn cv(&self) -> u64 {
        self.cv
    }

    /// Output Q.
    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }
}

/// Inputs for one scan of a [`CounterDown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDownInputs {
    /// Count down input - counts on rising edge.
    pub cd: bool,
    /// Reset input - reloads CV from PV.
    pub r: bool,
    /// Load input - reloads CV from PV.
    pub ld: bool,
    /// Replacement preset value, applied before counting or loading.
    pub pv: Option<i64>,
}

/// Counter Down (CTD).
///
/// Starts at CV=PV and counts down on each rising edge of CD, stopping at
/// zero. Q is TRUE when CV <= 0. LD and R both reload PV into CV and take
/// priority over counting.
///
/// # IEC 61131-3 Interface
///
/// ```text
/// FUNCTION_BLOCK CTD
/// VAR_INPUT
///     CD : BOOL;    (* Count down input - counts on rising edge *)
///     LD : BOOL;    (* Load input - loads PV into CV *)
///     PV : INT;     (* Preset value *)
/// END_VAR
/// VAR_OUTPUT
///     Q : BOOL;     (* Output - TRUE when CV <= 0 *)
///     CV : INT;     (* Current value *)
/// END_VAR
/// ```
///
/// # Example
///
/// ```
/// use ladder_stdlib::counters::CounterDown;
///
/// let mut ctd = CounterDown::new("CTD", 3).unwrap();
/// assert_eq!(ctd.cv(), 3);
///
/// for expected in [2, 1, 0] {
///     let q = ctd.evaluate(true);
///     assert_eq!(ctd.cv(), expected);
///     assert_eq!(q, expected == 0);
///     ctd.evaluate(false);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDown {
    name: String,
    pv: u64,
    cv: u64,
    q: bool,
    previous_in: bool,
}

impl CounterDown {
    /// Create a new CTD counter loaded with its preset.
    ///
    /// # Errors
    ///
    /// Returns an error if `preset` is negative.
    pub fn new(name: impl Into<String>, preset: i64) -> LadderResult<Self> {
        Self::with_current_value(name, preset, preset)
    }

    /// Create a new CTD counter starting at `current_value` instead of PV.
    ///
    /// # Errors
    ///
    /// Returns an error if `preset` or `current_value` is negative.
    pub fn with_current_value(
        name: impl Into<String>,
        preset: i64,
        current_value: i64,
    ) -> LadderResult<Self> {
        let pv = non_negative("PV", preset)?;
        let cv = non_negative("CV", current_value)?;
        Ok(Self {
            name: name.into(),
            pv,
            cv,
            q: cv == 0,
            previous_in: false,
        })
    }

    /// Execute one scan with CD driven by `input`.
    pub fn evaluate(&mut self, input: bool) -> bool {
        self.step(input, false)
    }

    /// Execute one scan with the full input set.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the counter untouched, if `pv` is negative.
    pub fn evaluate_with(&mut self, inputs: CounterDownInputs) -> LadderResult<bool> {
        if let Some(pv) = inputs.pv {
            self.set_preset(pv)?;
        }
        Ok(self.step(inputs.cd, inputs.r || inputs.ld))
    }

    fn step(&mut self, cd: bool, load: bool) -> bool {
        if load {
            self.cv = self.pv;
        } else if cd && !self.previous_in && self.cv > 0 {
            self.cv -= 1;
        }
        self.previous_in = cd;
        self.q = self.cv == 0;
        self.q
    }

    /// Replace the preset value. CV is untouched until the next load.
    ///
    /// # Errors
    ///
    /// Returns an error if `pv` is negative.
    pub fn set_preset(&mut self, pv: i64) -> LadderResult<()> {
        self.pv = non_negative("PV", pv)?;
        self.q = self.cv == 0;
        Ok(())
    }

    /// Reload CV from PV with no edge memory.
    pub fn reset(&mut self) {
        self.cv = self.pv;
        self.previous_in = false;
        self.q = self.cv == 0;
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preset value.
    #[must_use]
    pub fn pv(&self) -> u64 {
        self.pv
    }

    /// Current value.
    #[must_use]
    pub fn cv(&self) -> u64 {
        self.cv
    }

    /// Output Q.
    #[must_use]
    pub fn q(&self) -> bool {
        self.q
    }
}
