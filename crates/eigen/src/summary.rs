//! Serializable summary of a splitting measurement.

use serde::Serialize;
use tracing::warn;

use crate::error::EigenError;
use crate::estimate::SplittingEstimate;

/// Flat record of a [`SplittingEstimate`], suitable for JSON output.
///
/// Non-finite values (an unbounded threshold, an infinite SNR) serialize
/// as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplittingSummary {
    pub fast: f64,
    pub fdfast: f64,
    pub lag: f64,
    pub fdlag: f64,
    pub units: String,
    pub lag_samples: usize,
    pub srcpol: f64,
    pub snr: Option<f64>,
    pub lam2_min: f64,
    pub lam2_95: f64,
    pub ndf: f64,
    pub confidence_cells: usize,
    pub degenerate_cells: usize,
    pub window_start: usize,
    pub window_end: usize,
    pub delta: f64,
    pub n_samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceRecord>,
}

/// The eigenvalue grids, nested as `[lag][angle]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceRecord {
    pub angles: Vec<f64>,
    pub lags: Vec<f64>,
    pub lam1: Vec<Vec<f64>>,
    pub lam2: Vec<Vec<f64>>,
}

impl SplittingSummary {
    /// Builds a summary, optionally carrying the full surface.
    pub fn from_estimate(est: &SplittingEstimate, include_surface: bool) -> Self {
        let grid = est.surface().search_grid();
        let surface = include_surface.then(|| SurfaceRecord {
            angles: grid.angles().to_vec(),
            lags: grid
                .lags()
                .iter()
                .map(|&l| l as f64 * grid.delta())
                .collect(),
            lam1: est.lam1().to_nested(),
            lam2: est.lam2().to_nested(),
        });
        let snr = match est.snr() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "signal-to-noise ratio unavailable");
                None
            }
        };
        Self {
            fast: est.fast(),
            fdfast: est.fdfast(),
            lag: est.lag(),
            fdlag: est.fdlag(),
            units: est.units().to_string(),
            lag_samples: est.lag_samples(),
            srcpol: est.srcpol(),
            snr,
            lam2_min: est.lam2_min(),
            lam2_95: est.lam2_95(),
            ndf: est.ndf(),
            confidence_cells: est.confidence_cells(),
            degenerate_cells: est.surface().n_degenerate(),
            window_start: grid.window().start(),
            window_end: grid.window().end(),
            delta: grid.delta(),
            n_samples: grid.trace_len(),
            surface,
        }
    }

    /// Renders the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EigenError::Serialization`] | the serializer fails |
    pub fn to_json(&self) -> Result<String, EigenError> {
        serde_json::to_string_pretty(self).map_err(|e| EigenError::Serialization {
            reason: e.to_string(),
        })
    }
}
