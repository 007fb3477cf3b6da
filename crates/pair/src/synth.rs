//! Synthetic split shear waves for testing and calibration.
//!
//! A Ricker wavelet is polarized at `srcpol`, split with a known fast
//! direction and delay, and optionally contaminated with Gaussian noise.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::PairError;
use crate::ops::{rotate, split};
use crate::pair::WaveformPair;

/// Ricker ("Mexican hat") wavelet of `n` samples centred on the trace,
/// with width parameter `width` in samples.
pub fn ricker(n: usize, width: f64) -> Vec<f64> {
    let amp = 2.0 / ((3.0 * width).sqrt() * PI.powf(0.25));
    let wsq = width * width;
    let centre = (n as f64 - 1.0) / 2.0;
    (0..n)
        .map(|i| {
            let t = i as f64 - centre;
            let tsq = t * t;
            amp * (1.0 - tsq / wsq) * (-tsq / (2.0 * wsq)).exp()
        })
        .collect()
}

/// Configuration for a synthetic split waveform.
///
/// # Example
///
/// ```
/// use splitwave_pair::{SynthConfig, synthetic_pair};
///
/// let config = SynthConfig::new()
///     .with_fast(30.0)
///     .with_lag(20)
///     .with_noise(0.02)
///     .with_seed(7);
/// let pair = synthetic_pair(&config).unwrap();
/// assert_eq!(pair.len(), 1001);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SynthConfig {
    /// Output length in samples.
    n_samples: usize,
    /// Ricker width parameter in samples.
    width: f64,
    /// Source polarization in degrees.
    srcpol: f64,
    /// Fast direction in degrees.
    fast: f64,
    /// Delay between fast and slow waves in samples.
    lag: usize,
    /// Noise standard deviation as a fraction of the peak source amplitude.
    noise: f64,
    /// Sample interval.
    delta: f64,
    /// Noise seed.
    seed: Option<u64>,
}

impl SynthConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `n_samples = 1001`, `width = 16`, `srcpol = 0`, `fast = 0`,
    /// `lag = 0`, `noise = 0`, `delta = 1`, `seed = None`.
    pub fn new() -> Self {
        Self {
            n_samples: 1001,
            width: 16.0,
            srcpol: 0.0,
            fast: 0.0,
            lag: 0,
            noise: 0.0,
            delta: 1.0,
            seed: None,
        }
    }

    /// Sets the output length in samples.
    pub fn with_n_samples(mut self, n: usize) -> Self {
        self.n_samples = n;
        self
    }

    /// Sets the Ricker width parameter in samples.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the source polarization in degrees.
    pub fn with_srcpol(mut self, srcpol: f64) -> Self {
        self.srcpol = srcpol;
        self
    }

    /// Sets the fast direction in degrees.
    pub fn with_fast(mut self, fast: f64) -> Self {
        self.fast = fast;
        self
    }

    /// Sets the splitting delay in samples.
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = lag;
        self
    }

    /// Sets the relative noise level.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Sets the sample interval.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the noise seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the output length in samples.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns the Ricker width parameter.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the source polarization.
    pub fn srcpol(&self) -> f64 {
        self.srcpol
    }

    /// Returns the fast direction.
    pub fn fast(&self) -> f64 {
        self.fast
    }

    /// Returns the splitting delay in samples.
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Returns the relative noise level.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Returns the sample interval.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the noise seed, if set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), PairError> {
        if self.n_samples < 2 {
            return Err(PairError::InvalidSynthParameter {
                name: "n_samples",
                reason: format!("need at least 2 samples, got {}", self.n_samples),
            });
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PairError::InvalidSynthParameter {
                name: "width",
                reason: format!("must be finite and positive, got {}", self.width),
            });
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(PairError::InvalidSynthParameter {
                name: "noise",
                reason: format!("must be finite and non-negative, got {}", self.noise),
            });
        }
        if !self.srcpol.is_finite() || !self.fast.is_finite() {
            return Err(PairError::InvalidSynthParameter {
                name: "angle",
                reason: "srcpol and fast must be finite".to_string(),
            });
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(PairError::InvalidDelta { delta: self.delta });
        }
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a split shear wave of exactly `config.n_samples()` samples.
///
/// The source is built `lag` samples longer than requested so that the
/// trimming done by the splitting operator leaves the requested length.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PairError::InvalidSynthParameter`] | a parameter fails [`SynthConfig::validate`] |
/// | [`PairError::InvalidDelta`] | `delta` is not finite and positive |
pub fn synthetic_pair(config: &SynthConfig) -> Result<WaveformPair, PairError> {
    config.validate()?;
    let n_src = config.n_samples() + config.lag();
    let wavelet = ricker(n_src, config.width());
    let peak = wavelet.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));

    // polarize along srcpol: the direction rotate(.., srcpol) maps onto x
    let source = WaveformPair::new(wavelet, vec![0.0; n_src], config.delta())?;
    let source = rotate(&source, -config.srcpol());
    let lag = isize::try_from(config.lag()).map_err(|_| PairError::LagTooLarge {
        shift: isize::MAX,
        len: n_src,
    })?;
    let split_pair = split(&source, config.fast(), lag)?;

    if config.noise() == 0.0 {
        return Ok(split_pair);
    }

    let sigma = config.noise() * peak;
    let normal = Normal::new(0.0, sigma).map_err(|e| PairError::InvalidSynthParameter {
        name: "noise",
        reason: e.to_string(),
    })?;
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    debug!(sigma, seed = ?config.seed(), "adding gaussian noise");

    let delta = split_pair.delta();
    let (mut x, mut y) = split_pair.into_components();
    for v in x.iter_mut().chain(y.iter_mut()) {
        *v += normal.sample(&mut rng);
    }
    WaveformPair::new(x, y, delta)
}
