//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use splitwave_eigen::{DofMethod, GridConfig};
use splitwave_pair::{SynthConfig, Window};

use crate::cli::{MeasureArgs, SynthArgs};
use crate::config::{SearchToml, SynthToml};

/// Parses a degrees-of-freedom method name into the corresponding enum variant.
pub fn parse_dof(s: &str) -> Result<DofMethod> {
    match s.to_lowercase().as_str() {
        "half-window" | "half_window" => Ok(DofMethod::HalfWindow),
        "spectral" => Ok(DofMethod::Spectral),
        other => bail!("unknown degrees-of-freedom method: {other:?}"),
    }
}

/// Builds a [`GridConfig`] for a record of `len` samples from the TOML
/// search section, with command-line values taking precedence.
pub fn build_grid_config(search: &SearchToml, args: &MeasureArgs, len: usize) -> Result<GridConfig> {
    let Some(max_shift) = args.max_shift.or(search.max_shift) else {
        bail!("no maximum shift: pass --max-shift or set [search].max_shift");
    };
    let mut cfg = GridConfig::new(max_shift)
        .with_dof(parse_dof(&search.dof)?)
        .with_units(search.units.clone());
    if let Some(step) = args.step_angle.or(search.step_angle) {
        cfg = cfg.with_step_angle(step);
    }
    if let Some(step) = args.step_shift.or(search.step_shift) {
        cfg = cfg.with_step_shift(step);
    }
    if let Some(w) = search.window {
        cfg = cfg.with_window(Window::new(w.start, w.end, len)?);
    }
    Ok(cfg)
}

/// Builds a [`SynthConfig`] from the TOML synth section, with command-line
/// values taking precedence.
pub fn build_synth_config(synth: &SynthToml, args: &SynthArgs) -> SynthConfig {
    let mut cfg = SynthConfig::new()
        .with_fast(args.fast)
        .with_lag(args.lag)
        .with_n_samples(args.samples.unwrap_or(synth.samples))
        .with_width(args.width.unwrap_or(synth.width))
        .with_srcpol(args.srcpol.unwrap_or(synth.srcpol))
        .with_noise(args.noise.unwrap_or(synth.noise))
        .with_delta(args.delta.unwrap_or(synth.delta));
    if let Some(seed) = args.seed.or(synth.seed) {
        cfg = cfg.with_seed(seed);
    }
    cfg
}
