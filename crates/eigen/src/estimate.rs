//! Best-fit splitting parameters and their confidence region.

use std::sync::OnceLock;

use splitwave_pair::{WaveformPair, lag, rotate, window};
use splitwave_stats::sd;
use tracing::{debug, warn};

use crate::config::{DofMethod, GridConfig};
use crate::dof::{half_window_ndf, lam2_threshold, spectral_ndf};
use crate::error::EigenError;
use crate::grid::grideigcov;
use crate::surface::{EigenvalueSurface, Grid};

/// Confidence level of the default contour.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Splitting measurement by the eigenvalue method.
///
/// Holds the input pair and its eigenvalue surface. Derived quantities are
/// computed on first access and cached; the estimate never changes after
/// construction.
///
/// # Example
///
/// ```
/// use splitwave_eigen::{GridConfig, SplittingEstimate};
/// use splitwave_pair::{SynthConfig, synthetic_pair};
///
/// let pair = synthetic_pair(
///     &SynthConfig::new().with_fast(30.0).with_lag(20).with_noise(0.02).with_seed(1),
/// )
/// .unwrap();
/// let est = SplittingEstimate::new(pair, &GridConfig::new(40)).unwrap();
/// assert!((est.fast() - 30.0).abs() <= 2.0);
/// assert!((est.lag() - 20.0).abs() <= 2.0);
/// assert!(est.fdfast() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct SplittingEstimate {
    pair: WaveformPair,
    surface: EigenvalueSurface,
    evaluation: OnceLock<Evaluation>,
}

#[derive(Clone, Copy, Debug)]
struct Evaluation {
    row: usize,
    col: usize,
    lam2_min: f64,
    ndf: f64,
    lam2_95: f64,
    fdfast: f64,
    fdlag: f64,
}

impl SplittingEstimate {
    /// Runs the grid search on `pair` and wraps the result.
    ///
    /// # Errors
    ///
    /// Any error from [`grideigcov`].
    pub fn new(pair: WaveformPair, config: &GridConfig) -> Result<Self, EigenError> {
        let surface = grideigcov(&pair, config)?;
        Ok(Self {
            pair,
            surface,
            evaluation: OnceLock::new(),
        })
    }

    /// Wraps a surface that was computed for `pair`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EigenError::SurfaceMismatch`] | surface trace length differs from `pair.len()` |
    pub fn from_surface(
        pair: WaveformPair,
        surface: EigenvalueSurface,
    ) -> Result<Self, EigenError> {
        let surface_len = surface.search_grid().trace_len();
        if surface_len != pair.len() {
            return Err(EigenError::SurfaceMismatch {
                surface_len,
                pair_len: pair.len(),
            });
        }
        Ok(Self {
            pair,
            surface,
            evaluation: OnceLock::new(),
        })
    }

    fn eval(&self) -> &Evaluation {
        self.evaluation.get_or_init(|| self.evaluate())
    }

    fn evaluate(&self) -> Evaluation {
        let (row, col) = self.surface.lam2().argmin().unwrap_or((0, 0));
        let lam2_min = self.surface.lam2().get(row, col);
        let ndf = self.degrees_of_freedom(row, col);
        let lam2_95 = lam2_threshold(lam2_min, ndf, DEFAULT_CONFIDENCE);
        let fdfast = self.angle_half_width(row, col, lam2_95);
        let fdlag = self.lag_half_width(row, col, lam2_95);
        debug!(
            fast = self.surface.search_grid().angles()[col],
            lag_samples = self.surface.search_grid().lags()[row],
            lam2_min,
            ndf,
            lam2_95,
            "evaluated splitting estimate"
        );
        Evaluation {
            row,
            col,
            lam2_min,
            ndf,
            lam2_95,
            fdfast,
            fdlag,
        }
    }

    fn degrees_of_freedom(&self, row: usize, col: usize) -> f64 {
        let grid = self.surface.search_grid();
        let lag_samples = grid.lags()[row];
        let width = grid
            .window_at_lag(lag_samples)
            .map(|w| w.width())
            .unwrap_or_else(|_| grid.window().width());
        match grid.dof() {
            DofMethod::HalfWindow => half_window_ndf(width),
            DofMethod::Spectral => {
                let srcpol = self.surface.srcpol().get(row, col);
                match self.corrected_at(row, col) {
                    Ok(corrected) => spectral_ndf(rotate(&corrected, srcpol).y()),
                    Err(e) => {
                        warn!(error = %e, "spectral degrees of freedom unavailable, using half window");
                        half_window_ndf(width)
                    }
                }
            }
        }
    }

    /// Half-width of the contour along the angle axis, wrapping at 180.
    fn angle_half_width(&self, row: usize, col: usize, threshold: f64) -> f64 {
        let angles = self.surface.search_grid().angles();
        let values = self.surface.lam2().row(row);
        let a0 = angles[col];
        let n = angles.len();

        let right = (1..n).map(|j| {
            let c = (col + j) % n;
            ((angles[c] - a0).rem_euclid(180.0), values[c])
        });
        let left = (1..n).map(|j| {
            let c = (col + n - j) % n;
            ((a0 - angles[c]).rem_euclid(180.0), values[c])
        });
        let right = first_crossing(values[col], right, threshold).unwrap_or(180.0);
        let left = first_crossing(values[col], left, threshold).unwrap_or(180.0);
        (left + right).min(180.0) / 2.0
    }

    /// Half-width of the contour along the lag axis, in time units. The
    /// scan stops at the grid edge.
    fn lag_half_width(&self, row: usize, col: usize, threshold: f64) -> f64 {
        let grid = self.surface.search_grid();
        let lags: Vec<f64> = grid.lags().iter().map(|&l| l as f64 * grid.delta()).collect();
        let values = self.surface.lam2().column(col);
        let l0 = lags[row];

        let up = (row + 1..lags.len()).map(|r| (lags[r] - l0, values[r]));
        let down = (0..row).rev().map(|r| (l0 - lags[r], values[r]));
        let up = first_crossing(values[row], up, threshold)
            .unwrap_or_else(|| lags.last().map_or(0.0, |&l| l - l0));
        let down = first_crossing(values[row], down, threshold).unwrap_or(l0 - lags[0]);
        (up + down) / 2.0
    }

    fn corrected_at(&self, row: usize, col: usize) -> Result<WaveformPair, EigenError> {
        let grid = self.surface.search_grid();
        let fast = grid.angles()[col];
        let lag_samples = grid.lags()[row];
        let shift = isize::try_from(lag_samples).map_err(|_| EigenError::WindowExceedsLag {
            start: grid.window().start(),
            end: grid.window().end(),
            len: grid.trace_len(),
            max_lag: lag_samples,
        })?;
        let w = grid.window_at_lag(lag_samples)?;
        let aligned = window(&lag(&rotate(&self.pair, fast), -shift)?, &w)?;
        Ok(rotate(&aligned, -fast))
    }

    /// Fast direction in degrees, `[0, 180)`.
    pub fn fast(&self) -> f64 {
        self.surface.search_grid().angles()[self.eval().col]
    }

    /// Delay time in time units.
    pub fn lag(&self) -> f64 {
        self.lag_samples() as f64 * self.surface.search_grid().delta()
    }

    /// Delay in samples.
    pub fn lag_samples(&self) -> usize {
        self.surface.search_grid().lags()[self.eval().row]
    }

    /// `(row, col)` of the best-fit cell.
    pub fn best_index(&self) -> (usize, usize) {
        let e = self.eval();
        (e.row, e.col)
    }

    /// Formal error on the fast direction, degrees.
    pub fn fdfast(&self) -> f64 {
        self.eval().fdfast
    }

    /// Formal error on the delay, time units.
    pub fn fdlag(&self) -> f64 {
        self.eval().fdlag
    }

    /// Smallest `lam2` on the grid.
    pub fn lam2_min(&self) -> f64 {
        self.eval().lam2_min
    }

    /// Degrees of freedom used by the F-test.
    pub fn ndf(&self) -> f64 {
        self.eval().ndf
    }

    /// 95% confidence threshold on `lam2`.
    pub fn lam2_95(&self) -> f64 {
        self.eval().lam2_95
    }

    /// Confidence threshold on `lam2` at an arbitrary level.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EigenError::InvalidConfidence`] | `confidence` not in `(0, 1)` |
    pub fn lam2_at(&self, confidence: f64) -> Result<f64, EigenError> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(EigenError::InvalidConfidence { level: confidence });
        }
        let e = self.eval();
        Ok(lam2_threshold(e.lam2_min, e.ndf, confidence))
    }

    /// Source polarization in degrees, `[0, 180)`.
    pub fn srcpol(&self) -> f64 {
        let e = self.eval();
        self.surface.srcpol().get(e.row, e.col)
    }

    /// Number of grid cells inside the 95% contour.
    pub fn confidence_cells(&self) -> usize {
        self.surface.count_within(self.lam2_95())
    }

    /// The input pair with the best-fit splitting removed, in the original
    /// frame and restricted to the analysis window.
    ///
    /// # Errors
    ///
    /// Propagates operator errors; none occur for a surface computed from
    /// this pair.
    pub fn corrected(&self) -> Result<WaveformPair, EigenError> {
        let e = self.eval();
        self.corrected_at(e.row, e.col)
    }

    /// Signal-to-noise ratio of the corrected pair (Restivo & Helffrich):
    /// peak amplitude along the source polarization over twice the
    /// standard deviation across it. Infinite for a noise-free pair.
    ///
    /// # Errors
    ///
    /// See [`corrected`](Self::corrected).
    pub fn snr(&self) -> Result<f64, EigenError> {
        let frame = rotate(&self.corrected()?, self.srcpol());
        let peak = frame.x().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let noise = 2.0 * sd(frame.y());
        Ok(if noise == 0.0 { f64::INFINITY } else { peak / noise })
    }

    /// The input pair.
    pub fn pair(&self) -> &WaveformPair {
        &self.pair
    }

    /// The eigenvalue surface.
    pub fn surface(&self) -> &EigenvalueSurface {
        &self.surface
    }

    /// Angle grid in degrees.
    pub fn degs(&self) -> Grid {
        self.surface.degs()
    }

    /// Lag grid in time units.
    pub fn lags(&self) -> Grid {
        self.surface.lags()
    }

    /// Larger eigenvalue grid.
    pub fn lam1(&self) -> &Grid {
        self.surface.lam1()
    }

    /// Smaller eigenvalue grid.
    pub fn lam2(&self) -> &Grid {
        self.surface.lam2()
    }

    /// Time-unit label of the lag axis.
    pub fn units(&self) -> &str {
        self.surface.units()
    }
}

/// Walks `(distance, value)` points outward from a cell holding `v0` and
/// returns the distance where the values first rise above `threshold`,
/// interpolated linearly between the last point inside and the first
/// outside. `None` if every point stays inside.
fn first_crossing(
    v0: f64,
    points: impl Iterator<Item = (f64, f64)>,
    threshold: f64,
) -> Option<f64> {
    let (mut d_in, mut v_in) = (0.0, v0);
    for (d, v) in points {
        if v > threshold {
            return Some(d_in + (threshold - v_in) / (v - v_in) * (d - d_in));
        }
        d_in = d;
        v_in = v;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use splitwave_pair::{SynthConfig, synthetic_pair};

    fn estimate(fast: f64, lag: usize, noise: f64) -> SplittingEstimate {
        let pair = synthetic_pair(
            &SynthConfig::new()
                .with_n_samples(600)
                .with_srcpol(75.0)
                .with_fast(fast)
                .with_lag(lag)
                .with_noise(noise)
                .with_seed(17),
        )
        .unwrap();
        SplittingEstimate::new(pair, &GridConfig::new(24)).unwrap()
    }

    #[test]
    fn first_crossing_interpolates() {
        let points = [(1.0, 0.5), (2.0, 1.0), (4.0, 3.0)];
        let d = first_crossing(0.0, points.into_iter(), 2.0).unwrap();
        assert_abs_diff_eq!(d, 3.0, epsilon = 1e-12);
        let d = first_crossing(0.0, [(2.0, 4.0)].into_iter(), 1.0).unwrap();
        assert_abs_diff_eq!(d, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn first_crossing_none_when_inside() {
        let points = [(1.0, 0.5), (2.0, 1.0)];
        assert_eq!(first_crossing(0.0, points.into_iter(), 2.0), None);
        assert_eq!(first_crossing(0.0, [(1.0, 5.0)].into_iter(), f64::INFINITY), None);
    }

    #[test]
    fn recovers_noise_free_split() {
        let est = estimate(40.0, 10, 0.0);
        assert_abs_diff_eq!(est.fast(), 40.0, epsilon = 1e-9);
        assert_eq!(est.lag_samples(), 10);
        assert_abs_diff_eq!(est.srcpol(), 75.0, epsilon = 1e-6);
    }

    #[test]
    fn evaluation_is_cached() {
        let est = estimate(60.0, 8, 0.05);
        let first = (est.fast(), est.lag(), est.fdfast(), est.fdlag(), est.lam2_95());
        let second = (est.fast(), est.lag(), est.fdfast(), est.fdlag(), est.lam2_95());
        assert_eq!(first, second);
    }

    #[test]
    fn errors_are_positive_and_bounded() {
        let est = estimate(60.0, 8, 0.05);
        assert!(est.fdfast() > 0.0 && est.fdfast() <= 90.0);
        assert!(est.fdlag() > 0.0);
        assert!(est.confidence_cells() >= 1);
    }

    #[test]
    fn lam2_at_orders_levels() {
        let est = estimate(60.0, 8, 0.05);
        let l68 = est.lam2_at(0.68).unwrap();
        let l99 = est.lam2_at(0.99).unwrap();
        assert!(est.lam2_min() < l68 && l68 < est.lam2_95() && est.lam2_95() < l99);
        assert_abs_diff_eq!(est.lam2_at(0.95).unwrap(), est.lam2_95(), epsilon = 1e-12);
    }

    #[test]
    fn lam2_at_rejects_bad_levels() {
        let est = estimate(60.0, 8, 0.05);
        for level in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert!(matches!(
                est.lam2_at(level),
                Err(EigenError::InvalidConfidence { .. })
            ));
        }
    }

    #[test]
    fn corrected_pair_is_linear_without_noise() {
        let est = estimate(40.0, 10, 0.0);
        let corrected = est.corrected().unwrap();
        let [lo, hi] = crate::eigcov::eigcov(&corrected);
        assert!(lo < 1e-12 * hi);
        assert!(est.snr().unwrap() > 1e3);
    }

    #[test]
    fn spectral_dof_gives_finite_threshold_on_noisy_data() {
        let pair = synthetic_pair(
            &SynthConfig::new()
                .with_n_samples(600)
                .with_srcpol(75.0)
                .with_fast(60.0)
                .with_lag(8)
                .with_noise(0.1)
                .with_seed(4),
        )
        .unwrap();
        let est =
            SplittingEstimate::new(pair, &GridConfig::new(24).with_dof(DofMethod::Spectral))
                .unwrap();
        assert!(est.ndf() > 2.0);
        assert!(est.lam2_95().is_finite());
        assert!(est.lam2_95() > est.lam2_min());
    }

    #[test]
    fn from_surface_checks_length() {
        let est = estimate(60.0, 8, 0.05);
        let other = synthetic_pair(&SynthConfig::new().with_n_samples(500)).unwrap();
        let err = SplittingEstimate::from_surface(other, est.surface().clone()).unwrap_err();
        assert!(matches!(
            err,
            EigenError::SurfaceMismatch {
                surface_len: 600,
                pair_len: 500
            }
        ));
    }

    #[test]
    fn estimate_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SplittingEstimate>();
    }

    /// Estimate over a 3 x 6 grid (lags 0, 2, 4 samples at delta 0.5;
    /// angles 0..150 in 30 degree steps) whose `lam2` surface is replaced
    /// by `values`, given row by row.
    fn hand_surface(values: [[f64; 6]; 3]) -> SplittingEstimate {
        let pair = synthetic_pair(
            &SynthConfig::new()
                .with_n_samples(200)
                .with_fast(20.0)
                .with_lag(2)
                .with_noise(0.1)
                .with_seed(1)
                .with_delta(0.5),
        )
        .unwrap();
        let config = GridConfig::new(6).with_step_angle(30.0).with_step_shift(2);
        let mut surface = grideigcov(&pair, &config).unwrap();
        let mut lam2 = Grid::filled(3, 6, 0.0);
        for (r, row) in values.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                lam2.set(r, c, v);
            }
        }
        surface.lam2 = lam2;
        SplittingEstimate::from_surface(pair, surface).unwrap()
    }

    const FLAT: [f64; 6] = [9.0; 6];

    #[test]
    fn angle_half_width_interpolates_crossings() {
        let est = hand_surface([[1.0, 1.5, 4.0, 9.0, 9.0, 3.0], FLAT, FLAT]);
        // right: 30 + (2 - 1.5) / (4 - 1.5) * 30 = 36
        // left wraps to 150: (2 - 1) / (3 - 1) * 30 = 15
        assert_abs_diff_eq!(est.angle_half_width(0, 0, 2.0), 25.5, epsilon = 1e-12);
    }

    #[test]
    fn angle_half_width_wraps_from_last_column() {
        let est = hand_surface([[3.0, 9.0, 9.0, 9.0, 4.0, 1.0], FLAT, FLAT]);
        // right wraps to 0 at distance 30: 15; left to 120: 10
        assert_abs_diff_eq!(est.angle_half_width(0, 5, 2.0), 12.5, epsilon = 1e-12);
    }

    #[test]
    fn angle_half_width_caps_at_ninety() {
        let est = hand_surface([[1.0, 1.5, 1.2, 1.9, 1.1, 1.3], FLAT, FLAT]);
        assert_abs_diff_eq!(est.angle_half_width(0, 0, 2.0), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(est.angle_half_width(0, 0, f64::INFINITY), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn lag_half_width_stops_at_first_row() {
        let mut values = [FLAT; 3];
        values[0][2] = 1.0;
        values[1][2] = 3.0;
        let est = hand_surface(values);
        // lags in time units are 0, 1, 2; up crossing at 0.5, down edge at 0
        assert_abs_diff_eq!(est.lag_half_width(0, 2, 2.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn lag_half_width_stops_at_last_row() {
        let mut values = [FLAT; 3];
        values[1][4] = 1.5;
        values[2][4] = 1.0;
        let est = hand_surface(values);
        // down: 1 + (2 - 1.5) / (9 - 1.5) * 1, up edge at 0
        let expected = (1.0 + 0.5 / 7.5) / 2.0;
        assert_abs_diff_eq!(est.lag_half_width(2, 4, 2.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn lag_half_width_spans_grid_when_inside() {
        let mut values = [FLAT; 3];
        values[0][1] = 1.0;
        values[1][1] = 1.5;
        values[2][1] = 1.2;
        let est = hand_surface(values);
        assert_abs_diff_eq!(est.lag_half_width(0, 1, 2.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn formal_errors_follow_lam2_95() {
        let mut values = [[10.0; 6]; 3];
        values[0][0] = 1.0;
        let est = hand_surface(values);
        assert_eq!(est.best_index(), (0, 0));
        // default window is 60 samples, so 30 degrees of freedom
        assert_abs_diff_eq!(est.ndf(), 30.0, epsilon = 1e-12);
        let t = lam2_threshold(1.0, 30.0, DEFAULT_CONFIDENCE);
        assert_abs_diff_eq!(est.lam2_95(), t, epsilon = 1e-12);
        let frac = (t - 1.0) / 9.0;
        assert_abs_diff_eq!(est.fdfast(), frac * 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(est.fdlag(), frac / 2.0, epsilon = 1e-9);
    }
}
