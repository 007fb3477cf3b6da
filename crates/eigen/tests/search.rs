//! End-to-end behaviour of the eigenvalue grid search.

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use splitwave_eigen::{
    EigenError, GridConfig, SplittingEstimate, eigcov, grideigcov,
};
use splitwave_pair::{ErrorKind, SynthConfig, WaveformPair, Window, synthetic_pair};
use splitwave_stats::variance;

fn noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| <StandardNormal as Distribution<f64>>::sample(&StandardNormal, &mut rng))
        .collect()
}

#[test]
fn grid_shape_follows_steps() {
    let pair = WaveformPair::new(noise(500, 1), noise(500, 2), 0.1).unwrap();
    let cases = [(40, 2.0, 2, (20, 90)), (30, 7.0, 4, (8, 26)), (5, 45.0, 1, (5, 4))];
    for (max_shift, step_angle, step_shift, shape) in cases {
        let config = GridConfig::new(max_shift)
            .with_step_angle(step_angle)
            .with_step_shift(step_shift);
        let surface = grideigcov(&pair, &config).unwrap();
        assert_eq!(surface.shape(), shape);
        assert_eq!(surface.lam1().shape(), shape);
        assert_eq!(surface.lam2().shape(), shape);
        assert_eq!(surface.degs().shape(), shape);
        assert_eq!(surface.lags().shape(), shape);
    }
}

#[test]
fn lam2_never_exceeds_lam1() {
    let pair = WaveformPair::new(noise(300, 3), noise(300, 4), 1.0).unwrap();
    let surface = grideigcov(&pair, &GridConfig::new(20)).unwrap();
    for (l1, l2) in surface.lam1().as_slice().iter().zip(surface.lam2().as_slice()) {
        assert!(*l2 >= 0.0);
        assert!(l2 <= l1);
    }
}

#[test]
fn eigcov_ascending_on_random_pairs() {
    for seed in 0..20 {
        let pair = WaveformPair::new(noise(64, seed), noise(64, seed + 100), 1.0).unwrap();
        let [lo, hi] = eigcov(&pair);
        assert!(0.0 <= lo && lo <= hi);
    }
}

#[test]
fn reference_scenario_recovers_fast_and_lag() {
    let pair = synthetic_pair(
        &SynthConfig::new()
            .with_n_samples(1000)
            .with_srcpol(70.0)
            .with_fast(30.0)
            .with_lag(20)
            .with_noise(0.03)
            .with_seed(2024),
    )
    .unwrap();
    let config = GridConfig::new(40).with_step_angle(2.0).with_step_shift(2);
    let est = SplittingEstimate::new(pair, &config).unwrap();
    assert!((28.0..=32.0).contains(&est.fast()), "fast = {}", est.fast());
    assert!((18.0..=22.0).contains(&est.lag()), "lag = {}", est.lag());
}

#[test]
fn recovery_within_one_grid_step() {
    let cases = [(10.0, 6), (75.0, 14), (120.0, 10), (165.0, 22)];
    for (fast, lag) in cases {
        let pair = synthetic_pair(
            &SynthConfig::new()
                .with_n_samples(800)
                .with_srcpol(fast + 40.0)
                .with_fast(fast)
                .with_lag(lag)
                .with_noise(0.02)
                .with_seed(lag as u64),
        )
        .unwrap();
        let est = SplittingEstimate::new(pair, &GridConfig::new(30)).unwrap();
        let dfast = (est.fast() - fast).rem_euclid(180.0);
        let dfast = dfast.min(180.0 - dfast);
        assert!(dfast <= 2.0, "fast {fast}: got {}", est.fast());
        assert!(est.lag_samples().abs_diff(lag) <= 2, "lag {lag}: got {}", est.lag_samples());
    }
}

#[test]
fn identical_components_give_zero_lam2() {
    let shared = noise(200, 9);
    let pair = WaveformPair::new(shared.clone(), shared, 1.0).unwrap();
    let config = GridConfig::new(2).with_step_shift(2);
    let surface = grideigcov(&pair, &config).unwrap();
    assert_eq!(surface.shape().0, 1);

    let w = surface.search_grid().window();
    let windowed = &pair.x()[w.start()..w.end()];
    let total = 2.0 * variance(windowed);
    for c in 0..surface.shape().1 {
        assert_abs_diff_eq!(surface.lam2().get(0, c), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(surface.lam1().get(0, c), total, epsilon = 1e-10);
    }
}

#[test]
fn lam2_95_lies_between_surface_extremes() {
    let pair = synthetic_pair(
        &SynthConfig::new()
            .with_n_samples(600)
            .with_srcpol(20.0)
            .with_fast(100.0)
            .with_lag(12)
            .with_noise(0.1)
            .with_seed(5),
    )
    .unwrap();
    let est = SplittingEstimate::new(pair, &GridConfig::new(30)).unwrap();
    assert!(est.lam2().min() < est.lam2_95());
    assert!(est.lam2_95() < est.lam1().max());
}

#[test]
fn lags_reported_in_time_units() {
    let pair = synthetic_pair(
        &SynthConfig::new()
            .with_fast(45.0)
            .with_lag(10)
            .with_delta(0.025)
            .with_noise(0.01)
            .with_seed(8),
    )
    .unwrap();
    let est = SplittingEstimate::new(pair, &GridConfig::new(20)).unwrap();
    assert_eq!(est.lag_samples(), 10);
    assert_abs_diff_eq!(est.lag(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(est.lags().get(1, 0), 0.05, epsilon = 1e-12);
    assert_eq!(est.units(), "s");
}

#[test]
fn structural_errors_abort_search() {
    let pair = WaveformPair::new(noise(100, 1), noise(100, 2), 1.0).unwrap();

    let err = grideigcov(&pair, &GridConfig::new(0)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Range));

    let err = grideigcov(&pair, &GridConfig::new(10).with_step_angle(0.0)).unwrap_err();
    assert!(matches!(err, EigenError::NonPositiveParameter { name: "step_angle", .. }));

    let err =
        grideigcov(&pair, &GridConfig::new(10).with_step_angle(f64::MIN_POSITIVE)).unwrap_err();
    assert!(matches!(err, EigenError::TooManyAngles { .. }));

    let err = grideigcov(&pair, &GridConfig::new(usize::MAX).with_step_shift(1)).unwrap_err();
    assert!(matches!(err, EigenError::WindowExceedsLag { .. }));

    let w = Window::new(40, 41, 100).unwrap();
    let err = grideigcov(&pair, &GridConfig::new(10).with_window(w)).unwrap_err();
    assert!(matches!(err, EigenError::WindowTooShort { .. }));

    let w = Window::new(0, 100, 100).unwrap();
    let err = grideigcov(&pair, &GridConfig::new(10).with_window(w)).unwrap_err();
    assert!(matches!(err, EigenError::WindowExceedsLag { .. }));
    assert_eq!(err.kind(), Some(ErrorKind::Range));
}

#[test]
fn attached_window_is_used() {
    let x = noise(400, 6);
    let y = noise(400, 7);
    let w = Window::new(100, 300, 400).unwrap();
    let pair = WaveformPair::new(x, y, 1.0).unwrap().with_window(w).unwrap();
    let surface = grideigcov(&pair, &GridConfig::new(20)).unwrap();
    assert_eq!(surface.search_grid().window(), w);
}
