//! Covariance eigenvalues of a two-component signal.

use splitwave_pair::WaveformPair;
use splitwave_stats::{covariance2, sym2_eigen};

/// Eigenvalues of the 2x2 sample covariance matrix of `pair`, sorted
/// ascending.
///
/// Both values are non-negative. A pair with fewer than two samples has a
/// zero covariance matrix and yields `[0.0, 0.0]`.
///
/// ```
/// use splitwave_eigen::eigcov;
/// use splitwave_pair::WaveformPair;
///
/// let p = WaveformPair::new(vec![1.0, -1.0, 1.0, -1.0], vec![0.0; 4], 1.0).unwrap();
/// let [lam2, lam1] = eigcov(&p);
/// assert_eq!(lam2, 0.0);
/// assert!(lam1 > 0.0);
/// ```
pub fn eigcov(pair: &WaveformPair) -> [f64; 2] {
    let e = sym2_eigen(covariance2(pair.x(), pair.y()));
    [e.minor, e.major]
}

/// Result of evaluating one search cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
    pub lam1: f64,
    pub lam2: f64,
    /// Azimuth of the major eigenvector in the rotated frame, degrees.
    pub major_deg: f64,
    pub degenerate: bool,
}

/// Evaluates the covariance eigen-system of raw component slices.
///
/// A cell is degenerate when both variances are exactly zero; its
/// eigenvalues are reported as zero.
pub(crate) fn cell(x: &[f64], y: &[f64]) -> Cell {
    let cov = covariance2(x, y);
    if cov[0] == 0.0 && cov[2] == 0.0 {
        return Cell {
            lam1: 0.0,
            lam2: 0.0,
            major_deg: 0.0,
            degenerate: true,
        };
    }
    let e = sym2_eigen(cov);
    Cell {
        lam1: e.major,
        lam2: e.minor,
        major_deg: e.major_angle.to_degrees(),
        degenerate: false,
    }
}
