//! Output coils: the actuator at the right-hand end of every rung.
//!
//! - [`Output`] - Plain coil (`-( )-`): follows the rung result each scan
//! - [`RetentiveOutput`] - Latching coil (`-(L)-` with reset): stays energized
//!   until explicitly reset
//!
//! The retentive coil is a reset-dominant bistable, equivalent to IEC `RS`.

/// Plain output coil.
///
/// # Example
///
/// ```
/// use ladder_stdlib::coils::Output;
///
/// let mut lamp = Output::new("Lamp");
/// assert!(lamp.evaluate(true));
/// assert!(!lamp.evaluate(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    name: String,
    state: bool,
}

impl Output {
    /// Create a new, de-energized coil.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: false,
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> bool {
        self.state
    }

    /// Mirror the rung result.
    pub fn evaluate(&mut self, input: bool) -> bool {
        self.state = input;
        self.state
    }
}

/// Inputs for one scan of a [`RetentiveOutput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentiveInputs {
    /// Set input (the rung result).
    pub input: bool,
    /// Reset input - dominant.
    pub reset: bool,
}

/// Latching output coil - reset dominant.
///
/// # Logic
///
/// ```text
/// Q := NOT RESET AND (INPUT OR Q)
/// ```
///
/// # Truth Table
///
/// | INPUT | RESET | Q (prev) | Q (new) |
/// |-------|-------|----------|---------|
/// |   0   |   0   |    0     |    0    |
/// |   0   |   0   |    1     |    1    |
/// |   0   |   1   |    X     |    0    |
/// |   1   |   0   |    X     |    1    |
/// |   1   |   1   |    X     |    0    | ← Reset dominant
///
/// # Example
///
/// ```
/// use ladder_stdlib::coils::{RetentiveInputs, RetentiveOutput};
///
/// let mut latch = RetentiveOutput::new("Latch");
/// assert!(latch.evaluate(true));
/// assert!(latch.evaluate(false)); // stays latched
///
/// let q = latch.evaluate_with(RetentiveInputs { input: true, reset: true });
/// assert!(!q); // reset wins
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentiveOutput {
    name: String,
    state: bool,
}

impl RetentiveOutput {
    /// Create a new, unlatched coil.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: false,
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> bool {
        self.state
    }

    /// Latch on a TRUE input; a FALSE input leaves the state unchanged.
    pub fn evaluate(&mut self, input: bool) -> bool {
        self.evaluate_with(RetentiveInputs {
            input,
            reset: false,
        })
    }

    /// Execute one scan with an explicit reset input.
    pub fn evaluate_with(&mut self, inputs: RetentiveInputs) -> bool {
        self.state = !inputs.reset && (inputs.input || self.state);
        self.state
    }

    /// Force the coil off.
    pub fn reset(&mut self) -> bool {
        self.state = false;
        self.state
    }
}
