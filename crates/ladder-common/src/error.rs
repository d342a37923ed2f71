use thiserror::Error;

/// Ladder error types covering rung shape, preset validation, and lookups.
///
/// Every variant is raised while building or operating on a ladder program.
/// Scanning itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LadderError {
    /// A rung was built without an output coil.
    #[error("rung must have an output component")]
    NoOutput,

    /// A rung was built, or extended, with more than one output coil.
    #[error("rung can have only one output component (found {count})")]
    MultipleOutputs {
        /// Number of output coils the rung would contain.
        count: usize,
    },

    /// A timer was constructed without `delay` or `pt`.
    #[error("timer preset missing: supply `delay` or `pt`")]
    MissingPreset,

    /// A timer was given both `delay` and `pt` with different values.
    #[error("conflicting timer presets: delay={delay}, pt={pt}")]
    ConflictingPreset {
        /// Value supplied as `delay`.
        delay: i64,
        /// Value supplied as `pt`.
        pt: i64,
    },

    /// A preset (timer PT, counter PV, or counter CV) was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativePreset {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// Scan cycle time was zero, negative, or not finite.
    #[error("invalid cycle time: {0}")]
    InvalidCycleTime(String),

    /// Activate/deactivate was requested on a component that is not a contact.
    #[error("component {name} ({kind}) cannot be activated")]
    NotAnInput {
        /// Component name.
        name: String,
        /// Component kind.
        kind: String,
    },

    /// No component with the given name exists.
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    /// Ladder program content is invalid.
    #[error("program error: {0}")]
    Config(String),

    /// Invalid run-state transition attempted.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Source state.
        from: String,
        /// Attempted target state.
        to: String,
    },
}

/// Convenience type alias for ladder operations.
pub type LadderResult<T> = Result<T, LadderError>;

/// Reject negative values for a named preset field.
///
/// # Errors
///
/// Returns [`LadderError::NegativePreset`] when `value < 0`.
pub fn non_negative(field: &'static str, value: i64) -> LadderResult<u64> {
    u64::try_from(value).map_err(|_| LadderError::NegativePreset { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(non_negative("PT", 0), Ok(0));
        assert_eq!(non_negative("PT", 7), Ok(7));
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        assert_eq!(
            non_negative("PV", -1),
            Err(LadderError::NegativePreset {
                field: "PV",
                value: -1
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LadderError::NoOutput.to_string(),
            "rung must have an output component"
        );
        assert_eq!(
            LadderError::MultipleOutputs { count: 2 }.to_string(),
            "rung can have only one output component (found 2)"
        );
    }
}
