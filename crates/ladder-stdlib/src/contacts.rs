//! Contact instructions: the boolean sensors placed along a rung.
//!
//! - [`Contact`] - Normally open (`-| |-`): passes power while activated
//! - [`InvertedContact`] - Normally closed (`-|/|-`): passes power until activated
//! - [`RisingEdgeContact`] - Positive transition (`-|P|-`): one scan on FALSE→TRUE
//! - [`FallingEdgeContact`] - Negative transition (`-|N|-`): one scan on TRUE→FALSE
//!
//! The edge contacts keep the previous state of their own input. They must be
//! evaluated every scan, whatever the power flow upstream of them, or the
//! edge memory goes stale.

/// Normally-open contact.
///
/// # Example
///
/// ```
/// use ladder_stdlib::contacts::Contact;
///
/// let mut start = Contact::new("Start");
/// assert!(!start.evaluate());
///
/// start.activate();
/// assert!(start.evaluate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    state: bool,
}

impl Contact {
    /// Create a new, deactivated contact.
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

    /// Close the contact.
    pub fn activate(&mut self) {
        self.state = true;
    }

    /// Open the contact.
    pub fn deactivate(&mut self) {
        self.state = false;
    }

    /// Return the current state unchanged.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        self.state
    }
}

/// Normally-closed contact.
///
/// Starts TRUE; activating it opens the circuit.
///
/// # Example
///
/// ```
/// use ladder_stdlib::contacts::InvertedContact;
///
/// let mut stop = InvertedContact::new("Stop");
/// assert!(stop.evaluate());
///
/// stop.activate();
/// assert!(!stop.evaluate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedContact {
    name: String,
    state: bool,
}

impl InvertedContact {
    /// Create a new contact in its resting (closed, TRUE) state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: true,
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

    /// Actuate the contact, opening the circuit.
    pub fn activate(&mut self) {
        self.state = false;
    }

    /// Release the contact, closing the circuit.
    pub fn deactivate(&mut self) {
        self.state = true;
    }

    /// Return the current state unchanged.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        self.state
    }
}

/// Rising edge contact (one-shot).
///
/// TRUE for exactly one evaluation after `state` goes from FALSE to TRUE.
///
/// ```text
/// Q := STATE AND NOT M;
/// M := STATE;
/// ```
///
/// # Example
///
/// ```
/// use ladder_stdlib::contacts::RisingEdgeContact;
///
/// let mut ons = RisingEdgeContact::new("ONS");
/// assert!(!ons.evaluate(None));
///
/// ons.activate();
/// assert!(ons.evaluate(None));
/// assert!(!ons.evaluate(None)); // held high
///
/// // Direct input overwrites the state before edge detection
/// assert!(!ons.evaluate(Some(false)));
/// assert!(ons.evaluate(Some(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RisingEdgeContact {
    name: String,
    state: bool,
    /// State seen by the previous evaluation (M in IEC R_TRIG).
    previous_state: bool,
}

impl RisingEdgeContact {
    /// Create a new, deactivated one-shot.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: false,
            previous_state: false,
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current (level) state, not the pulse.
    #[must_use]
    pub fn state(&self) -> bool {
        self.state
    }

    /// State recorded by the last evaluation.
    #[must_use]
    pub fn previous_state(&self) -> bool {
        self.previous_state
    }

    /// Set the level state TRUE.
    pub fn activate(&mut self) {
        self.state = true;
    }

    /// Set the level state FALSE.
    pub fn deactivate(&mut self) {
        self.state = false;
    }

    /// Execute one scan.
    ///
    /// `direct` overwrites the level state first when supplied. The edge
    /// memory is updated unconditionally.
    pub fn evaluate(&mut self, direct: Option<bool>) -> bool {
        if let Some(input) = direct {
            self.state = input;
        }
        let pulse = self.state && !self.previous_state;
        self.previous_state = self.state;
        pulse
    }

    /// Resynchronize the edge memory with the current state, dropping any
    /// pending edge.
    pub fn reset(&mut self) {
        self.previous_state = self.state;
    }
}

/// Falling edge contact (one-shot).
///
/// TRUE for exactly one evaluation after `state` goes from TRUE to FALSE.
///
/// ```text
/// Q := NOT STATE AND M;
/// M := STATE;
/// ```
///
/// # Example
///
/// ```
/// use ladder_stdlib::contacts::FallingEdgeContact;
///
/// let mut fns = FallingEdgeContact::new("FNS");
/// assert!(!fns.evaluate(Some(true)));
/// assert!(fns.evaluate(Some(false)));
/// assert!(!fns.evaluate(Some(false)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingEdgeContact {
    name: String,
    state: bool,
    /// State seen by the previous evaluation (M in IEC F_TRIG).
    previous_state: bool,
}

impl FallingEdgeContact {
    /// Create a new, deactivated one-shot.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: false,
            previous_state: false,
        }
    }

    /// Component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current (level) state, not the pulse.
    #[must_use]
    pub fn state(&self) -> bool {
        self.state
    }

    /// State recorded by the last evaluation.
    #[must_use]
    pub fn previous_state(&self) -> bool {
        self.previous_state
    }

    /// Set the level state TRUE.
    pub fn activate(&mut self) {
        self.state = true;
    }

    /// Set the level state FALSE.
    pub fn deactivate(&mut self) {
        self.state = false;
    }

    /// Execute one scan.
    ///
    /// `direct` overwrites the level state first when supplied. The edge
    /// memory is updated unconditionally.
    pub fn evaluate(&mut self, direct: Option<bool>) -> bool {
        if let Some(input) = direct {
            self.state = input;
        }
        let pulse = self.previous_state && !self.state;
        self.previous_state = self.state;
        pulse
    }

    /// Resynchronize the edge memory with the current state, dropping any
    /// pending edge.
    pub fn reset(&mut self) {
        self.previous_state = self.state;
    }
}
