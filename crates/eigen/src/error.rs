//! Error types for the splitwave-eigen crate.

use splitwave_pair::{ErrorKind, PairError};

/// Error type for all fallible operations in the splitwave-eigen crate.
///
/// Structural failures abort a search before any cell is evaluated, so a
/// partially filled surface is never returned.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EigenError {
    /// Returned when the input pair or a signal operator rejects its input.
    #[error(transparent)]
    Pair(#[from] PairError),

    /// Returned when a search parameter is zero, negative or not finite.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositiveParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when the angular step is so small the angle axis cannot be
    /// held in memory.
    #[error("step_angle {step_angle} gives more than {max} candidate angles")]
    TooManyAngles {
        /// The rejected step in degrees.
        step_angle: f64,
        /// Largest allowed number of angles.
        max: usize,
    },

    /// Returned when the analysis window holds too few samples.
    #[error("analysis window too short: got {width} samples, need at least {min}")]
    WindowTooShort {
        /// Width of the window.
        width: usize,
        /// Minimum width.
        min: usize,
    },

    /// Returned when the window cannot stay inside the trace at the largest
    /// candidate lag.
    #[error(
        "window [{start}, {end}) does not fit a trace of length {len} at lag {max_lag}"
    )]
    WindowExceedsLag {
        /// Window start in source-trace coordinates.
        start: usize,
        /// Window end in source-trace coordinates.
        end: usize,
        /// Source trace length.
        len: usize,
        /// Largest candidate lag in samples.
        max_lag: usize,
    },

    /// Returned when a confidence level lies outside `(0, 1)`.
    #[error("confidence level must be in (0, 1), got {level}")]
    InvalidConfidence {
        /// The rejected level.
        level: f64,
    },

    /// Returned when a surface is paired with a waveform it was not computed from.
    #[error("surface was computed for {surface_len} samples, pair has {pair_len}")]
    SurfaceMismatch {
        /// Trace length recorded in the surface.
        surface_len: usize,
        /// Length of the supplied pair.
        pair_len: usize,
    },

    /// Returned when JSON serialization fails.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Error message from the serializer.
        reason: String,
    },
}

impl EigenError {
    /// Returns the shape/range classification of a structural failure, or
    /// `None` for failures outside the search (serialization).
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            EigenError::Pair(e) => Some(e.kind()),
            EigenError::SurfaceMismatch { .. } => Some(ErrorKind::Shape),
            EigenError::Serialization { .. } => None,
            _ => Some(ErrorKind::Range),
        }
    }
}
