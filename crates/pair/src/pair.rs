//! Validated two-component waveform.

use crate::error::PairError;
use crate::window::Window;

/// Two co-sampled horizontal components plus their sample interval.
///
/// Guarantees:
/// - both components have the same, non-zero length
/// - all samples are finite
/// - the sample interval is finite and positive
/// - an attached [`Window`] lies inside the trace
///
/// Operators never mutate a pair; they return a new one.
///
/// # Example
///
/// ```
/// use splitwave_pair::WaveformPair;
///
/// let pair = WaveformPair::new(vec![1.0, 0.0, -1.0], vec![0.0, 1.0, 0.0], 0.01).unwrap();
/// assert_eq!(pair.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaveformPair {
    x: Vec<f64>,
    y: Vec<f64>,
    delta: f64,
    window: Option<Window>,
}

impl WaveformPair {
    /// Creates a new pair from component 1 (`x`), component 2 (`y`) and the
    /// sample interval in time units per sample.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PairError::Empty`] | either component is empty |
    /// | [`PairError::LengthMismatch`] | `x.len() != y.len()` |
    /// | [`PairError::NonFiniteData`] | any sample is NaN or infinite |
    /// | [`PairError::InvalidDelta`] | `delta` is not finite and positive |
    pub fn new(x: Vec<f64>, y: Vec<f64>, delta: f64) -> Result<Self, PairError> {
        if x.is_empty() || y.is_empty() {
            return Err(PairError::Empty);
        }
        if x.len() != y.len() {
            return Err(PairError::LengthMismatch {
                len1: x.len(),
                len2: y.len(),
            });
        }
        if !x.iter().all(|v| v.is_finite()) {
            return Err(PairError::NonFiniteData { component: 1 });
        }
        if !y.iter().all(|v| v.is_finite()) {
            return Err(PairError::NonFiniteData { component: 2 });
        }
        if !delta.is_finite() || delta <= 0.0 {
            return Err(PairError::InvalidDelta { delta });
        }
        Ok(Self {
            x,
            y,
            delta,
            window: None,
        })
    }

    /// Builds a pair from components already known to satisfy the invariants.
    pub(crate) fn from_parts(
        x: Vec<f64>,
        y: Vec<f64>,
        delta: f64,
        window: Option<Window>,
    ) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(!x.is_empty());
        debug_assert!(window.is_none_or(|w| w.end() <= x.len()));
        Self {
            x,
            y,
            delta,
            window,
        }
    }

    /// Attaches an analysis window.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PairError::WindowOutOfRange`] | `window.end() > self.len()` |
    pub fn with_window(mut self, window: Window) -> Result<Self, PairError> {
        if window.end() > self.len() {
            return Err(PairError::WindowOutOfRange {
                start: window.start(),
                end: window.end(),
                len: self.len(),
            });
        }
        self.window = Some(window);
        Ok(self)
    }

    /// Returns component 1.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns component 2.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the sample interval (time units per sample).
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the attached analysis window, if any.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Returns the number of samples per component.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if the pair is empty.
    ///
    /// Note: a valid `WaveformPair` is never empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Consumes the pair and returns `(x, y)`.
    pub fn into_components(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}
