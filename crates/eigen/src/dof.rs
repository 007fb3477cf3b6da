//! Degrees of freedom and the F-test confidence threshold on `lam2`.
//!
//! Silver & Chan (1991), eq. 16:
//!
//! `lam2_alpha = lam2_min * (1 + k / (n - k) * F[k, n - k](1 - alpha))`
//!
//! with `k = 2` fitted parameters (fast direction and lag) and `n` the
//! number of degrees of freedom of the noise.

use num_complex::Complex;
use rustfft::FftPlanner;
use splitwave_stats::{detrend_linear, tukey};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::warn;

/// Number of parameters fitted by the grid search.
pub const K_PARAMS: f64 = 2.0;

/// Fraction of the trace inside the cosine tapers before the spectrum is taken.
const TAPER_ALPHA: f64 = 0.05;

/// Degrees of freedom of a windowed record of `window_len` samples,
/// taken as half the window length.
pub fn half_window_ndf(window_len: usize) -> f64 {
    window_len as f64 / 2.0
}

/// Walsh et al. (2013) degrees-of-freedom estimate from the spectrum of a
/// noise trace.
///
/// The trace is tapered with a 5% Tukey window and linearly detrended, then
/// `ndf = 2 * (2 * E2^2 / E4 - 1)` where `E2` and `E4` are weighted sums of
/// the second and fourth powers of the FFT amplitudes. Returns `NaN` for an
/// all-zero trace.
pub fn spectral_ndf(trace: &[f64]) -> f64 {
    let n = trace.len();
    if n == 0 {
        return f64::NAN;
    }
    let taper = tukey(n, TAPER_ALPHA);
    let tapered: Vec<f64> = trace.iter().zip(&taper).map(|(v, w)| v * w).collect();
    let mut buffer: Vec<Complex<f64>> = detrend_linear(&tapered)
        .into_iter()
        .map(|v| Complex::new(v, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let mut e2 = 0.0;
    let mut e4 = 0.0;
    for (i, c) in buffer.iter().enumerate() {
        let a = if i == 0 || i == n - 1 { 0.5 } else { 1.0 };
        let p = c.norm_sqr();
        e2 += a * p;
        e4 += 4.0 * a * a / 3.0 * p * p;
    }
    if e4 == 0.0 {
        return f64::NAN;
    }
    2.0 * (2.0 * e2 * e2 / e4 - 1.0)
}

/// Confidence threshold on `lam2` for `ndf` degrees of freedom at the given
/// confidence level (e.g. `0.95`).
///
/// Returns infinity, with a warning, when `ndf` does not exceed the number
/// of fitted parameters: every cell then lies inside the region.
pub fn lam2_threshold(lam2_min: f64, ndf: f64, confidence: f64) -> f64 {
    if ndf.is_nan() || ndf <= K_PARAMS {
        warn!(ndf, "too few degrees of freedom for the F-test, threshold is unbounded");
        return f64::INFINITY;
    }
    let f = match FisherSnedecor::new(K_PARAMS, ndf - K_PARAMS) {
        Ok(dist) => dist.inverse_cdf(confidence),
        Err(e) => {
            warn!(ndf, error = %e, "invalid F distribution, threshold is unbounded");
            return f64::INFINITY;
        }
    };
    lam2_min * (1.0 + K_PARAMS / (ndf - K_PARAMS) * f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, StandardNormal};

    #[test]
    fn half_window() {
        assert_eq!(half_window_ndf(400), 200.0);
        assert_eq!(half_window_ndf(11), 5.5);
    }

    #[test]
    fn threshold_matches_tabulated_f() {
        // F(2, 98) at 0.95 is about 3.089
        let t = lam2_threshold(1.0, 100.0, 0.95);
        assert_relative_eq!(t, 1.0 + 2.0 / 98.0 * 3.0892, epsilon = 1e-3);
    }

    #[test]
    fn threshold_scales_with_lam2_min() {
        let a = lam2_threshold(1.0, 50.0, 0.95);
        let b = lam2_threshold(3.0, 50.0, 0.95);
        assert_relative_eq!(b, 3.0 * a, max_relative = 1e-12);
    }

    #[test]
    fn threshold_grows_with_confidence() {
        let lo = lam2_threshold(1.0, 40.0, 0.68);
        let hi = lam2_threshold(1.0, 40.0, 0.99);
        assert!(1.0 < lo && lo < hi);
    }

    #[test]
    fn threshold_unbounded_for_small_ndf() {
        assert!(lam2_threshold(1.0, 2.0, 0.95).is_infinite());
        assert!(lam2_threshold(1.0, 1.5, 0.95).is_infinite());
        assert!(lam2_threshold(1.0, f64::NAN, 0.95).is_infinite());
    }

    #[test]
    fn spectral_ndf_white_noise_scales_with_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let trace: Vec<f64> = (0..1024)
            .map(|_| <StandardNormal as Distribution<f64>>::sample(&StandardNormal, &mut rng))
            .collect();
        let ndf = spectral_ndf(&trace);
        // exponential periodogram ordinates give about 1.5 per sample
        assert!(ndf > 1000.0 && ndf < 2000.0, "ndf = {ndf}");
    }

    #[test]
    fn spectral_ndf_smooth_signal_is_small() {
        let trace: Vec<f64> = (0..512)
            .map(|i| (2.0 * std::f64::consts::PI * 3.0 * i as f64 / 512.0).sin())
            .collect();
        let ndf = spectral_ndf(&trace);
        assert!(ndf < 20.0, "ndf = {ndf}");
    }

    #[test]
    fn spectral_ndf_silent_trace() {
        assert!(spectral_ndf(&[0.0; 64]).is_nan());
        assert!(spectral_ndf(&[]).is_nan());
    }
}
