//! Search configuration and its resolution against a concrete waveform.

use splitwave_pair::{WaveformPair, Window};
use tracing::debug;

use crate::error::EigenError;

/// Default angular step in degrees.
pub const DEFAULT_STEP_ANGLE: f64 = 2.0;

/// Smallest analysis window that still yields a covariance estimate.
pub const MIN_WINDOW: usize = 2;

/// Largest number of candidate angles a search may hold.
pub const MAX_ANGLES: usize = 180_000_000;

/// Default lag step: `2 * max(1, floor(max_shift / 40))`.
///
/// About 20 lag candidates across the range, always even so that half the
/// lag is a whole number of samples.
pub fn default_step_shift(max_shift: usize) -> usize {
    2 * (max_shift / 40).max(1)
}

/// Default analysis window width: the smaller of half the trace and
/// `10 * max_shift`.
pub fn default_window_width(trace_len: usize, max_shift: usize) -> usize {
    (trace_len / 2).min(max_shift.saturating_mul(10))
}

/// How the number of degrees of freedom behind the F-test is estimated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DofMethod {
    /// Half the analysis window length.
    #[default]
    HalfWindow,
    /// Walsh et al. (2013) estimate from the spectrum of the corrected
    /// minor-component trace.
    Spectral,
}

/// Configuration for the splitting grid search.
///
/// Every option is either set explicitly or derived from `max_shift` and
/// the trace length when the configuration is resolved.
///
/// | Option | Default |
/// |--------|---------|
/// | `step_angle` | [`DEFAULT_STEP_ANGLE`] |
/// | `step_shift` | [`default_step_shift`] |
/// | `window` | window attached to the pair, else centred [`default_window_width`] |
/// | `dof` | [`DofMethod::HalfWindow`] |
/// | `units` | `"s"` |
///
/// # Example
///
/// ```
/// use splitwave_eigen::GridConfig;
///
/// let config = GridConfig::new(40).with_step_angle(1.0);
/// assert_eq!(config.step_shift(), 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    max_shift: usize,
    step_angle: Option<f64>,
    step_shift: Option<usize>,
    window: Option<Window>,
    dof: DofMethod,
    units: String,
}

impl GridConfig {
    /// Creates a configuration searching lags in `[0, max_shift)` samples.
    pub fn new(max_shift: usize) -> Self {
        Self {
            max_shift,
            step_angle: None,
            step_shift: None,
            window: None,
            dof: DofMethod::default(),
            units: "s".to_string(),
        }
    }

    /// Sets the angular step in degrees.
    pub fn with_step_angle(mut self, step: f64) -> Self {
        self.step_angle = Some(step);
        self
    }

    /// Sets the lag step in samples.
    pub fn with_step_shift(mut self, step: usize) -> Self {
        self.step_shift = Some(step);
        self
    }

    /// Sets the analysis window in source-trace coordinates.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Sets the degrees-of-freedom estimator.
    pub fn with_dof(mut self, dof: DofMethod) -> Self {
        self.dof = dof;
        self
    }

    /// Sets the label for time units on the lag axis.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Returns the maximum shift in samples (exclusive).
    pub fn max_shift(&self) -> usize {
        self.max_shift
    }

    /// Returns the effective angular step.
    pub fn step_angle(&self) -> f64 {
        self.step_angle.unwrap_or(DEFAULT_STEP_ANGLE)
    }

    /// Returns the effective lag step.
    pub fn step_shift(&self) -> usize {
        self.step_shift
            .unwrap_or_else(|| default_step_shift(self.max_shift))
    }

    /// Returns the explicit window, if set.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Returns the degrees-of-freedom estimator.
    pub fn dof(&self) -> DofMethod {
        self.dof
    }

    /// Returns the time-unit label.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Validates the trace-independent parameters.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EigenError::NonPositiveParameter`] | `max_shift`, `step_angle` or `step_shift` not positive |
    /// | [`EigenError::TooManyAngles`] | `step_angle` so small the angle axis exceeds [`MAX_ANGLES`] |
    pub fn validate(&self) -> Result<(), EigenError> {
        if self.max_shift == 0 {
            return Err(EigenError::NonPositiveParameter {
                name: "max_shift",
                value: 0.0,
            });
        }
        let step_angle = self.step_angle();
        if !step_angle.is_finite() || step_angle <= 0.0 {
            return Err(EigenError::NonPositiveParameter {
                name: "step_angle",
                value: step_angle,
            });
        }
        if (180.0 / step_angle).ceil() > MAX_ANGLES as f64 {
            return Err(EigenError::TooManyAngles {
                step_angle,
                max: MAX_ANGLES,
            });
        }
        if self.step_shift() == 0 {
            return Err(EigenError::NonPositiveParameter {
                name: "step_shift",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Resolves all defaults against `pair` and checks that every grid node
    /// can be evaluated.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EigenError::NonPositiveParameter`], [`EigenError::TooManyAngles`] | see [`validate`](Self::validate) |
    /// | [`EigenError::Pair`] | explicit window extends past the trace |
    /// | [`EigenError::WindowTooShort`] | window narrower than [`MIN_WINDOW`] |
    /// | [`EigenError::WindowExceedsLag`] | window leaves the lagged trace at the largest lag |
    pub fn resolve(&self, pair: &WaveformPair) -> Result<SearchGrid, EigenError> {
        self.validate()?;
        let len = pair.len();
        let step_angle = self.step_angle();
        let step_shift = self.step_shift();

        let window = match self.window.or(pair.window()) {
            Some(w) => {
                if w.end() > len {
                    return Err(splitwave_pair::PairError::WindowOutOfRange {
                        start: w.start(),
                        end: w.end(),
                        len,
                    }
                    .into());
                }
                w
            }
            None => {
                let width = default_window_width(len, self.max_shift);
                if width < MIN_WINDOW {
                    return Err(EigenError::WindowTooShort {
                        width,
                        min: MIN_WINDOW,
                    });
                }
                Window::centred(len, width)?
            }
        };
        if window.width() < MIN_WINDOW {
            return Err(EigenError::WindowTooShort {
                width: window.width(),
                min: MIN_WINDOW,
            });
        }

        // the lag axis is bounded by the trace, so check it before allocating
        let n_lags = self.max_shift.div_ceil(step_shift);
        let max_lag = (n_lags - 1) * step_shift;
        let fits = max_lag < len
            && window.start() >= max_lag / 2
            && window.end() + (max_lag - max_lag / 2) <= len;
        if !fits {
            return Err(EigenError::WindowExceedsLag {
                start: window.start(),
                end: window.end(),
                len,
                max_lag,
            });
        }

        let n_angles = (180.0 / step_angle).ceil() as usize;
        let angles: Vec<f64> = (0..n_angles).map(|i| i as f64 * step_angle).collect();
        let lags: Vec<usize> = (0..n_lags).map(|i| i * step_shift).collect();

        debug!(
            n_angles,
            n_lags,
            step_angle,
            step_shift,
            window_start = window.start(),
            window_end = window.end(),
            "resolved splitting search grid"
        );

        Ok(SearchGrid {
            angles,
            lags,
            window,
            trace_len: len,
            delta: pair.delta(),
            dof: self.dof,
            units: self.units.clone(),
        })
    }
}

/// A fully resolved and validated search grid.
///
/// Rows of every surface grid follow [`lags`](Self::lags), columns follow
/// [`angles`](Self::angles).
#[derive(Clone, Debug, PartialEq)]
pub struct SearchGrid {
    angles: Vec<f64>,
    lags: Vec<usize>,
    window: Window,
    trace_len: usize,
    delta: f64,
    dof: DofMethod,
    units: String,
}

impl SearchGrid {
    /// Returns the candidate fast directions in degrees.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Returns the candidate lags in samples.
    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    /// Returns the analysis window in source-trace coordinates.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the source trace length.
    pub fn trace_len(&self) -> usize {
        self.trace_len
    }

    /// Returns the sample interval.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the degrees-of-freedom estimator.
    pub fn dof(&self) -> DofMethod {
        self.dof
    }

    /// Returns the time-unit label.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns `(n_lags, n_angles)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.lags.len(), self.angles.len())
    }

    /// Returns the analysis window re-centred inside a pair lagged by `lag`
    /// samples.
    ///
    /// Lagging trims `lag` samples; half of that is attributed to each end
    /// so the window stays on the same part of the record.
    pub fn window_at_lag(&self, lag: usize) -> Result<Window, EigenError> {
        let half = lag / 2;
        let lagged_len = self.trace_len.saturating_sub(lag);
        let start = self.window.start().checked_sub(half);
        match start {
            Some(start) => Ok(Window::new(
                start,
                self.window.end() - half,
                lagged_len,
            )?),
            None => Err(EigenError::WindowExceedsLag {
                start: self.window.start(),
                end: self.window.end(),
                len: self.trace_len,
                max_lag: lag,
            }),
        }
    }
}
