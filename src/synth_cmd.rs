//! Synth command: write a synthetic split shear wave.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use splitwave_pair::synthetic_pair;

use crate::cli::SynthArgs;
use crate::convert;
use crate::measure_cmd::load_config;
use crate::traces;

/// Generate a synthetic pair and write it as two-column text.
pub fn run(args: SynthArgs) -> Result<()> {
    let _cmd = info_span!("synth").entered();
    let config = load_config(args.config.as_deref())?;
    let synth_cfg = convert::build_synth_config(&config.synth, &args);

    let pair = synthetic_pair(&synth_cfg).context("failed to generate synthetic pair")?;
    let header = format!(
        "synthetic split shear wave\nfast = {}\nlag = {}\nsrcpol = {}\nnoise = {}\ndelta = {}",
        synth_cfg.fast(),
        synth_cfg.lag(),
        synth_cfg.srcpol(),
        synth_cfg.noise(),
        synth_cfg.delta(),
    );
    traces::write_pair(&args.output, &pair, &header)?;
    info!(
        path = %args.output.display(),
        n_samples = pair.len(),
        "synthetic pair written"
    );
    Ok(())
}
