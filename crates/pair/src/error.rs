//! Error types for the splitwave-pair crate.

/// Broad classification of a structural failure.
///
/// Shape errors concern the layout of the input (mismatched or empty
/// components); range errors concern values or indices outside what the
/// operation accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Component sequences of unequal length, or empty input.
    Shape,
    /// Indices, shifts or parameters outside their valid range.
    Range,
}

/// Error type for all fallible operations in the splitwave-pair crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PairError {
    /// Returned when a component has no samples.
    #[error("waveform pair has no samples")]
    Empty,

    /// Returned when the two components differ in length.
    #[error("component lengths differ: {len1} vs {len2}")]
    LengthMismatch {
        /// Length of component 1.
        len1: usize,
        /// Length of component 2.
        len2: usize,
    },

    /// Returned when a component contains NaN or infinity.
    #[error("component {component} contains non-finite values")]
    NonFiniteData {
        /// Component number (1 or 2).
        component: u8,
    },

    /// Returned when the sample interval is not finite and positive.
    #[error("sample interval must be finite and positive, got {delta}")]
    InvalidDelta {
        /// The rejected sample interval.
        delta: f64,
    },

    /// Returned when window bounds violate `0 <= start < end <= len`.
    #[error("window [{start}, {end}) outside trace of length {len}")]
    WindowOutOfRange {
        /// Start index (inclusive).
        start: usize,
        /// End index (exclusive).
        end: usize,
        /// Length of the trace the window refers to.
        len: usize,
    },

    /// Returned when a lag would leave no overlapping samples.
    #[error("lag of {shift} samples leaves no overlap in trace of length {len}")]
    LagTooLarge {
        /// Requested shift.
        shift: isize,
        /// Length of the trace.
        len: usize,
    },

    /// Returned when a synthetic-signal parameter is invalid.
    #[error("invalid synthetic parameter {name}: {reason}")]
    InvalidSynthParameter {
        /// Parameter name.
        name: &'static str,
        /// Explanation.
        reason: String,
    },
}

impl PairError {
    /// Returns whether this is a shape or a range failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PairError::Empty | PairError::LengthMismatch { .. } => ErrorKind::Shape,
            _ => ErrorKind::Range,
        }
    }
}
