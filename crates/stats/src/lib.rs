//! Statistical helper functions for the splitwave workspace.
//!
//! Everything here works on plain slices so the signal and search crates
//! can call it from their inner loops without converting data.

use std::f64::consts::PI;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample covariance matrix of two equal-length series, N-1 denominator.
///
/// Returns `[var(x), cov(x, y), var(y)]`, the upper triangle of the
/// symmetric 2x2 matrix. Returns all zeros if fewer than 2 samples.
///
/// # Panics
///
/// Panics if `x` and `y` differ in length.
pub fn covariance2(x: &[f64], y: &[f64]) -> [f64; 3] {
    assert_eq!(
        x.len(),
        y.len(),
        "covariance2: inputs must have equal length"
    );
    let n = x.len();
    if n < 2 {
        return [0.0; 3];
    }
    let mx = mean(x);
    let my = mean(y);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let denom = (n - 1) as f64;
    [sxx / denom, sxy / denom, syy / denom]
}

/// Eigen-decomposition of a symmetric positive semi-definite 2x2 matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sym2Eigen {
    /// Smaller eigenvalue, clamped at zero.
    pub minor: f64,
    /// Larger eigenvalue.
    pub major: f64,
    /// Angle of the major eigenvector in radians, measured from the first
    /// axis towards the second, in `(-pi/2, pi/2]`.
    pub major_angle: f64,
}

/// Closed-form eigenvalues of `[[a, b], [b, c]]` given as `[a, b, c]`.
///
/// Rounding can push the smaller eigenvalue of a near-singular matrix a hair
/// below zero; it is clamped so that `0 <= minor <= major` always holds.
pub fn sym2_eigen(m: [f64; 3]) -> Sym2Eigen {
    let [a, b, c] = m;
    let half_trace = 0.5 * (a + c);
    let disc = (0.5 * (a - c)).hypot(b);
    let major = (half_trace + disc).max(0.0);
    let minor = (half_trace - disc).clamp(0.0, major);
    let major_angle = if b == 0.0 && a == c {
        0.0
    } else {
        0.5 * (2.0 * b).atan2(a - c)
    };
    Sym2Eigen {
        minor,
        major,
        major_angle,
    }
}

/// Removes the least-squares straight line from `data`.
///
/// Series shorter than 2 samples are returned mean-removed.
pub fn detrend_linear(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    if n < 2 {
        let m = mean(data);
        return data.iter().map(|&v| v - m).collect();
    }
    let nf = n as f64;
    let t_mean = (nf - 1.0) / 2.0;
    let y_mean = mean(data);

    let mut stt = 0.0;
    let mut sty = 0.0;
    for (i, &v) in data.iter().enumerate() {
        let dt = i as f64 - t_mean;
        stt += dt * dt;
        sty += dt * (v - y_mean);
    }
    let slope = sty / stt;

    data.iter()
        .enumerate()
        .map(|(i, &v)| v - y_mean - slope * (i as f64 - t_mean))
        .collect()
}

/// Tukey (tapered cosine) window of length `n`.
///
/// `alpha` is the fraction of the window inside the cosine tapers:
/// `alpha <= 0` gives a rectangular window, `alpha >= 1` a Hann window.
pub fn tukey(n: usize, alpha: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 || alpha <= 0.0 {
        return vec![1.0; n];
    }
    let alpha = alpha.min(1.0);
    let m = (n - 1) as f64;
    let width = (alpha * m / 2.0).floor() as usize;

    (0..n)
        .map(|i| {
            let x = i as f64;
            if i <= width {
                0.5 * (1.0 + (PI * (-1.0 + 2.0 * x / alpha / m)).cos())
            } else if i >= n - width - 1 {
                0.5 * (1.0 + (PI * (-2.0 / alpha + 1.0 + 2.0 * x / alpha / m)).cos())
            } else {
                1.0
            }
        })
        .collect()
}
